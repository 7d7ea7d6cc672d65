// Engine configuration module
pub mod settings;

pub use settings::{EngineSettings, PaymentProvider, CONFIG_ENV_VAR};
