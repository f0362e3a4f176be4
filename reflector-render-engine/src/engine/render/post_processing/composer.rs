use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::core_3d::graph::{Core3d, Node3d};
use bevy::core_pipeline::smaa::Smaa;
use bevy::prelude::*;
use bevy::render::RenderApp;
use bevy::render::render_graph::RenderGraphApp;
use bevy::window::WindowResized;

use crate::constants::render_settings::{CHROMATIC_ABERRATION_SETTINGS, COLOR_NOISE_SETTINGS};
use crate::engine::assets::reflector_config::ReflectorConfig;
use crate::engine::error::ReflectorError;
use crate::engine::reflection::{PassSequence, ReflectionPass};
use crate::engine::render::post_processing::chromatic_aberration::{
    ChromaticAberrationLabel, ChromaticAberrationSettings,
};
use crate::engine::render::post_processing::color_noise::{
    ColorNoiseLabel, ColorNoiseSettings, animate_color_noise,
};
use crate::engine::render::post_processing::fullscreen_pass::FullscreenEffectPlugin;

/// Sub-passes of subpixel morphological antialiasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntialiasStage {
    EdgeDetection,
    BlendingWeights,
    NeighborhoodBlending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStage {
    Reflection(ReflectionPass),
    MainRender,
    Antialias(AntialiasStage),
    Bloom,
    ColorNoise,
    ChromaticAberration,
}

/// Ordered description of every pass that produces one frame.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct EffectChain {
    stages: Vec<ChainStage>,
    viewport: UVec2,
}

impl EffectChain {
    /// Main render followed by antialiasing, bloom, noise and chromatic aberration.
    pub fn new(viewport: UVec2) -> Self {
        Self {
            stages: vec![
                ChainStage::MainRender,
                ChainStage::Antialias(AntialiasStage::EdgeDetection),
                ChainStage::Antialias(AntialiasStage::BlendingWeights),
                ChainStage::Antialias(AntialiasStage::NeighborhoodBlending),
                ChainStage::Bloom,
                ChainStage::ColorNoise,
                ChainStage::ChromaticAberration,
            ],
            viewport,
        }
    }

    /// Inserts the reflection passes immediately before the main render.
    pub fn splice_reflection(&mut self, sequence: &PassSequence) -> Result<(), ReflectorError> {
        let main = self
            .stages
            .iter()
            .position(|stage| *stage == ChainStage::MainRender)
            .ok_or(ReflectorError::MissingMainRender)?;

        let passes = sequence.passes().iter().copied().map(ChainStage::Reflection);
        self.stages.splice(main..main, passes);
        self.validate()
    }

    /// Every reflection pass must run before the main render.
    pub fn validate(&self) -> Result<(), ReflectorError> {
        let main = self
            .stages
            .iter()
            .position(|stage| *stage == ChainStage::MainRender)
            .ok_or(ReflectorError::MissingMainRender)?;

        for stage in &self.stages[main..] {
            if let ChainStage::Reflection(pass) = stage {
                return Err(ReflectorError::ReflectionAfterMainRender(pass.label()));
            }
        }
        Ok(())
    }

    /// Records a new output size. Returns whether anything changed.
    pub fn resize(&mut self, viewport: UVec2) -> bool {
        if self.viewport == viewport {
            return false;
        }
        self.viewport = viewport;
        true
    }

    pub fn stages(&self) -> &[ChainStage] {
        &self.stages
    }

    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }
}

impl Default for EffectChain {
    fn default() -> Self {
        Self::new(UVec2::ZERO)
    }
}

/// Post-processing components for the main camera.
pub fn main_camera_effects(
    config: &ReflectorConfig,
) -> (Smaa, Bloom, ColorNoiseSettings, ChromaticAberrationSettings) {
    if config.antialias.predication_threshold > 0.0 {
        debug!(
            "SMAA depth predication (threshold {}, scale {}) is not available, using luma edges",
            config.antialias.predication_threshold, config.antialias.predication_scale
        );
    }

    (
        Smaa {
            preset: config.antialias.preset(),
        },
        config.effects.to_bloom(),
        ColorNoiseSettings {
            opacity: config.effects.noise_opacity,
            ..COLOR_NOISE_SETTINGS
        },
        ChromaticAberrationSettings {
            offset: config.chromatic_aberration_offset(),
            ..CHROMATIC_ABERRATION_SETTINGS
        },
    )
}

/// Keeps the main camera's effect parameters in step with the loaded config.
pub fn apply_config_to_effects(
    config: Res<ReflectorConfig>,
    mut cameras: Query<(
        &mut Smaa,
        &mut Bloom,
        &mut ColorNoiseSettings,
        &mut ChromaticAberrationSettings,
    )>,
) {
    if !config.is_changed() {
        return;
    }

    let (smaa, bloom, noise, aberration) = main_camera_effects(&config);
    for (mut s, mut b, mut n, mut a) in &mut cameras {
        *s = smaa.clone();
        *b = bloom.clone();
        n.opacity = noise.opacity;
        *a = aberration;
    }
}

pub fn rebuild_chain_on_resize(
    mut resize_events: EventReader<WindowResized>,
    windows: Query<&Window>,
    mut chain: ResMut<EffectChain>,
) {
    let Some(event) = resize_events.read().last() else {
        return;
    };
    let Ok(window) = windows.get(event.window) else {
        return;
    };

    let size = window.physical_size();
    if chain.resize(size) {
        info!("Effect chain rebuilt for {}x{}", size.x, size.y);
    }
}

pub struct PostProcessingPlugin;

impl Plugin for PostProcessingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            FullscreenEffectPlugin::<ColorNoiseSettings, _>::new(ColorNoiseLabel),
            FullscreenEffectPlugin::<ChromaticAberrationSettings, _>::new(
                ChromaticAberrationLabel,
            ),
        ))
        .init_resource::<EffectChain>()
        .add_systems(
            Update,
            (
                animate_color_noise,
                rebuild_chain_on_resize,
                apply_config_to_effects.run_if(resource_exists::<ReflectorConfig>),
            ),
        );

        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app.add_render_graph_edges(
            Core3d,
            (
                Node3d::Smaa,
                ColorNoiseLabel,
                ChromaticAberrationLabel,
                Node3d::EndMainPassPostProcessing,
            ),
        );
    }
}
