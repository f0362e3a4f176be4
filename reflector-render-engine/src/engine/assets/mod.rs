//! Asset types for the reflector: configuration and surface textures.

/// Reflector options loaded from JSON, with validation and conversions to
/// the camera and post-processing components.
pub mod reflector_config;

/// Tileable floor textures and ripple normal maps.
pub mod surface_textures;
