//! Offscreen reflection rendering and the main camera's post-processing.

/// Fullscreen effects, SMAA and bloom setup, and effect chain ordering.
pub mod post_processing;

/// Mirrored camera executing each reflector's pass sequence.
pub mod reflection_camera;

/// Offscreen image the reflection is rendered into.
pub mod reflection_target;
