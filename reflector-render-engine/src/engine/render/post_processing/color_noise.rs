use bevy::{
    prelude::*,
    render::{extract_component::ExtractComponent, render_graph::RenderLabel, render_resource::ShaderType},
};

use crate::constants::path::COLOR_NOISE_SHADER_PATH;
use crate::engine::render::post_processing::fullscreen_pass::FullscreenEffect;

#[derive(Debug, Hash, PartialEq, Eq, Clone, RenderLabel)]
pub struct ColorNoiseLabel;

/// Film grain blended over the frame in colour-dodge mode.
#[derive(Component, Debug, Default, Clone, Copy, ExtractComponent, ShaderType)]
pub struct ColorNoiseSettings {
    pub opacity: f32,
    /// Varies the noise pattern between frames.
    pub seed: f32,
    pub _padding: Vec2,
}

impl FullscreenEffect for ColorNoiseSettings {
    const NAME: &'static str = "color_noise_pass";
    const SHADER_PATH: &'static str = COLOR_NOISE_SHADER_PATH;
}

pub fn animate_color_noise(time: Res<Time>, mut settings: Query<&mut ColorNoiseSettings>) {
    for mut noise in &mut settings {
        noise.seed = time.elapsed_secs().fract();
    }
}
