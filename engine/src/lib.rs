// Engine library root

pub mod config;
pub mod data;
pub mod error;
pub mod services;

pub use error::{EngineError, Result};
