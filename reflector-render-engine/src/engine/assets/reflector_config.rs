use bevy::core_pipeline::bloom::{Bloom, BloomPrefilter};
use bevy::core_pipeline::dof::{DepthOfField, DepthOfFieldMode};
use bevy::core_pipeline::smaa::SmaaPreset;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::render_settings::{
    BLOOM_THRESHOLD, COC_PIXELS_PER_BOKEH_SCALE, F_STOPS_PER_FOCAL_RANGE,
};
use crate::engine::error::ReflectorError;
use constants::{flow, post_processing, render_settings, texture};

/// Depth-of-field blur applied to the reflection image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthOfFieldConfig {
    /// Distance in focus, as a fraction of the camera far plane.
    pub focus_distance: f32,
    /// Width of the sharp band, normalised.
    pub focal_length: f32,
    pub bokeh_scale: f32,
}

impl Default for DepthOfFieldConfig {
    fn default() -> Self {
        Self {
            focus_distance: render_settings::DOF_FOCUS_DISTANCE,
            focal_length: render_settings::DOF_FOCAL_LENGTH,
            bokeh_scale: render_settings::DOF_BOKEH_SCALE,
        }
    }
}

impl DepthOfFieldConfig {
    /// Bokeh depth of field for a camera whose far plane is `far`.
    pub fn to_depth_of_field(&self, far: f32) -> DepthOfField {
        DepthOfField {
            mode: DepthOfFieldMode::Bokeh,
            focal_distance: self.focus_distance * far,
            aperture_f_stops: self.focal_length * F_STOPS_PER_FOCAL_RANGE,
            max_circle_of_confusion_diameter: self.bokeh_scale * COC_PIXELS_PER_BOKEH_SCALE,
            max_depth: far,
            ..default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntialiasConfig {
    pub edge_threshold: f32,
    /// Depth predication is accepted for completeness but has no GPU counterpart.
    pub predication_threshold: f32,
    pub predication_scale: f32,
}

impl Default for AntialiasConfig {
    fn default() -> Self {
        Self {
            edge_threshold: post_processing::SMAA_EDGE_THRESHOLD,
            predication_threshold: post_processing::SMAA_PREDICATION_THRESHOLD,
            predication_scale: post_processing::SMAA_PREDICATION_SCALE,
        }
    }
}

impl AntialiasConfig {
    /// Closest SMAA quality preset for the edge-detection threshold.
    pub fn preset(&self) -> SmaaPreset {
        if self.edge_threshold <= 0.05 {
            SmaaPreset::Ultra
        } else if self.edge_threshold <= 0.1 {
            SmaaPreset::High
        } else {
            SmaaPreset::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub speed: f32,
    pub cycle: f32,
    pub direction: [f32; 2],
    pub ripple_distortion: f32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            speed: flow::FLOW_SPEED,
            cycle: flow::FLOW_CYCLE,
            direction: flow::FLOW_DIRECTION.to_array(),
            ripple_distortion: flow::RIPPLE_DISTORTION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub bloom_intensity: f32,
    pub bloom_luminance_smoothing: f32,
    pub noise_opacity: f32,
    pub chromatic_aberration_offset: [f32; 2],
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            bloom_intensity: post_processing::BLOOM_INTENSITY,
            bloom_luminance_smoothing: post_processing::BLOOM_LUMINANCE_SMOOTHING,
            noise_opacity: post_processing::NOISE_OPACITY,
            chromatic_aberration_offset: post_processing::CHROMATIC_ABERRATION_OFFSET.to_array(),
        }
    }
}

impl EffectsConfig {
    pub fn to_bloom(&self) -> Bloom {
        Bloom {
            intensity: self.bloom_intensity,
            prefilter: BloomPrefilter {
                threshold: BLOOM_THRESHOLD,
                threshold_softness: self.bloom_luminance_smoothing,
            },
            ..Bloom::NATURAL
        }
    }
}

/// Reflector options, loaded from `assets/config/reflector.json`.
///
/// Every field falls back to the workspace defaults when absent.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectorConfig {
    pub texture_width: u32,
    pub texture_height: u32,
    pub clip_bias: f32,
    pub reflector_opacity: f32,
    pub depth_of_field: DepthOfFieldConfig,
    pub antialias: AntialiasConfig,
    pub flow: FlowConfig,
    pub effects: EffectsConfig,
}

impl Default for ReflectorConfig {
    fn default() -> Self {
        Self {
            texture_width: texture::REFLECTION_TEXTURE_WIDTH,
            texture_height: texture::REFLECTION_TEXTURE_HEIGHT,
            clip_bias: render_settings::CLIP_BIAS,
            reflector_opacity: render_settings::REFLECTOR_OPACITY,
            depth_of_field: DepthOfFieldConfig::default(),
            antialias: AntialiasConfig::default(),
            flow: FlowConfig::default(),
            effects: EffectsConfig::default(),
        }
    }
}

impl ReflectorConfig {
    pub fn validate(&self) -> Result<(), ReflectorError> {
        if self.texture_width == 0 || self.texture_height == 0 {
            return Err(ReflectorError::invalid_config(
                "texture_width/texture_height",
                format!("must be non-zero, got {}x{}", self.texture_width, self.texture_height),
            ));
        }
        if !(0.0..1.0).contains(&self.clip_bias) {
            return Err(ReflectorError::invalid_config(
                "clip_bias",
                format!("must be in [0, 1), got {}", self.clip_bias),
            ));
        }
        if self.reflector_opacity < 0.0 {
            return Err(ReflectorError::invalid_config(
                "reflector_opacity",
                format!("must not be negative, got {}", self.reflector_opacity),
            ));
        }
        if self.flow.cycle <= 0.0 {
            return Err(ReflectorError::invalid_config(
                "flow.cycle",
                format!("must be positive, got {}", self.flow.cycle),
            ));
        }
        if self.flow.speed <= 0.0 {
            return Err(ReflectorError::invalid_config(
                "flow.speed",
                format!("must be positive, got {}", self.flow.speed),
            ));
        }
        Ok(())
    }

    pub fn flow_direction(&self) -> Vec2 {
        Vec2::from_array(self.flow.direction)
    }

    pub fn chromatic_aberration_offset(&self) -> Vec2 {
        Vec2::from_array(self.effects.chromatic_aberration_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ReflectorConfig =
            serde_json::from_str(r#"{ "texture_width": 256, "flow": { "speed": 50.0 } }"#)
                .unwrap();

        assert_eq!(config.texture_width, 256);
        assert_eq!(config.texture_height, 512);
        assert_eq!(config.flow.speed, 50.0);
        assert_eq!(config.flow.cycle, 1.0);
        assert_eq!(config.reflector_opacity, 0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let zero_width = ReflectorConfig {
            texture_width: 0,
            ..default()
        };
        assert!(matches!(
            zero_width.validate(),
            Err(ReflectorError::InvalidConfig { .. })
        ));

        let full_bias = ReflectorConfig {
            clip_bias: 1.0,
            ..default()
        };
        assert!(full_bias.validate().is_err());

        let mut stalled = ReflectorConfig::default();
        stalled.flow.speed = 0.0;
        assert!(stalled.validate().is_err());
    }

    #[test]
    fn depth_of_field_scales_with_far_plane() {
        let dof = DepthOfFieldConfig::default().to_depth_of_field(100.0);
        assert!((dof.focal_distance - 30.0).abs() < 1e-4);
        assert!((dof.aperture_f_stops - 2.4).abs() < 1e-4);
        assert_eq!(dof.max_depth, 100.0);
        assert_eq!(dof.mode, DepthOfFieldMode::Bokeh);
    }

    #[test]
    fn smaa_preset_follows_edge_threshold() {
        let mut antialias = AntialiasConfig::default();
        assert!(antialias.preset() == SmaaPreset::Ultra);
        antialias.edge_threshold = 0.1;
        assert!(antialias.preset() == SmaaPreset::High);
        antialias.edge_threshold = 0.2;
        assert!(antialias.preset() == SmaaPreset::Low);
    }
}
