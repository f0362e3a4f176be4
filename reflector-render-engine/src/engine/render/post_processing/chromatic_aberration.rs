use bevy::{
    prelude::*,
    render::{extract_component::ExtractComponent, render_graph::RenderLabel, render_resource::ShaderType},
};

use crate::constants::path::CHROMATIC_ABERRATION_SHADER_PATH;
use crate::engine::render::post_processing::fullscreen_pass::FullscreenEffect;

#[derive(Debug, Hash, PartialEq, Eq, Clone, RenderLabel)]
pub struct ChromaticAberrationLabel;

/// Shifts red and blue by `offset` in opposite directions, in UV units.
#[derive(Component, Debug, Default, Clone, Copy, ExtractComponent, ShaderType)]
pub struct ChromaticAberrationSettings {
    pub offset: Vec2,
    pub _padding: Vec2,
}

impl FullscreenEffect for ChromaticAberrationSettings {
    const NAME: &'static str = "chromatic_aberration_pass";
    const SHADER_PATH: &'static str = CHROMATIC_ABERRATION_SHADER_PATH;
}
