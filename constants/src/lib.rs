//! Compile-time defaults shared by the reflector render engine.

pub mod flow;
pub mod post_processing;
pub mod render_settings;
pub mod texture;
