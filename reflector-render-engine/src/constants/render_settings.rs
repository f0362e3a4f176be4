use crate::engine::render::post_processing::chromatic_aberration::ChromaticAberrationSettings;
use crate::engine::render::post_processing::color_noise::ColorNoiseSettings;
use bevy::math::Vec2;

pub const COLOR_NOISE_SETTINGS: ColorNoiseSettings = ColorNoiseSettings {
    opacity: constants::post_processing::NOISE_OPACITY,
    seed: 0.0,
    _padding: Vec2::ZERO,
};

pub const CHROMATIC_ABERRATION_SETTINGS: ChromaticAberrationSettings =
    ChromaticAberrationSettings {
        offset: constants::post_processing::CHROMATIC_ABERRATION_OFFSET,
        _padding: Vec2::ZERO,
    };

/// Aperture in f-stops per unit of normalised focal length.
pub const F_STOPS_PER_FOCAL_RANGE: f32 = 4.0;

/// Largest bokeh circle, in pixels, per unit of bokeh scale.
pub const COC_PIXELS_PER_BOKEH_SCALE: f32 = 16.0;

pub const BLOOM_THRESHOLD: f32 = 0.0;
