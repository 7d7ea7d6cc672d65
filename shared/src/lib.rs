pub mod models;
pub mod utils;

// Models and formatting helpers shared by the engine and any front-end that
// renders family projects. Nothing in this crate performs I/O.
