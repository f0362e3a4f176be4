pub mod constants;
pub mod engine;
