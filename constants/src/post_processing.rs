use bevy::math::Vec2;

/// SMAA edge-detection threshold.
pub const SMAA_EDGE_THRESHOLD: f32 = 0.05;

/// SMAA depth predication threshold.
pub const SMAA_PREDICATION_THRESHOLD: f32 = 0.002;

/// SMAA depth predication scale.
pub const SMAA_PREDICATION_SCALE: f32 = 1.0;

pub const BLOOM_INTENSITY: f32 = 0.5;

/// Softness of the bloom luminance threshold.
pub const BLOOM_LUMINANCE_SMOOTHING: f32 = 0.3;

/// Opacity of the colour-dodge noise layer.
pub const NOISE_OPACITY: f32 = 0.03;

/// Per-channel UV offset of the chromatic aberration pass.
pub const CHROMATIC_ABERRATION_OFFSET: Vec2 = Vec2::new(0.001, 0.001);
