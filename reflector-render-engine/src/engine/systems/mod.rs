//! Runtime diagnostics.

/// Native FPS overlay updates.
pub mod fps_tracking;
