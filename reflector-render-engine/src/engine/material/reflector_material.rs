use bevy::pbr::{ExtendedMaterial, MaterialExtension};
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderRef, ShaderType};

use crate::constants::path::REFLECTOR_SHADER_PATH;
use crate::engine::assets::reflector_config::ReflectorConfig;
use crate::engine::material::flow::FlowState;
use crate::engine::reflection::ReflectorState;

pub type ReflectorMaterial = ExtendedMaterial<StandardMaterial, ReflectorExtension>;

/// Per-frame parameters of the reflector fragment shader.
#[derive(Debug, Clone, Copy, ShaderType, Reflect)]
pub struct ReflectorUniform {
    pub texture_matrix: Mat4,
    pub local_from_world: Mat4,
    pub flow_direction: Vec2,
    /// Tiling applied to mesh UVs before sampling ripple and roughness maps.
    pub surface_uv_scale: Vec2,
    pub flow_offset_0: f32,
    pub flow_offset_1: f32,
    pub half_cycle: f32,
    pub reflector_opacity: f32,
    pub ripple_distortion: f32,
}

impl Default for ReflectorUniform {
    fn default() -> Self {
        let flow = FlowState::default();
        Self {
            texture_matrix: Mat4::IDENTITY,
            local_from_world: Mat4::IDENTITY,
            flow_direction: constants::flow::FLOW_DIRECTION,
            surface_uv_scale: constants::texture::SURFACE_TEXTURE_REPEAT,
            flow_offset_0: flow.offset_a,
            flow_offset_1: flow.offset_b,
            half_cycle: flow.half_cycle(),
            reflector_opacity: constants::render_settings::REFLECTOR_OPACITY,
            ripple_distortion: constants::flow::RIPPLE_DISTORTION,
        }
    }
}

/// Adds the projected reflection and flowing ripples on top of a standard PBR surface.
#[derive(Asset, AsBindGroup, Reflect, Debug, Clone)]
pub struct ReflectorExtension {
    #[uniform(100)]
    pub params: ReflectorUniform,

    #[texture(101)]
    #[sampler(102)]
    pub reflection_texture: Handle<Image>,

    #[texture(103)]
    #[sampler(104)]
    pub ripple_normal_a: Handle<Image>,

    #[texture(105)]
    #[sampler(106)]
    pub ripple_normal_b: Handle<Image>,

    #[texture(107)]
    #[sampler(108)]
    pub roughness_texture: Handle<Image>,
}

impl MaterialExtension for ReflectorExtension {
    fn fragment_shader() -> ShaderRef {
        REFLECTOR_SHADER_PATH.into()
    }
}

/// Flow-map phase of one reflector surface.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ReflectorFlow(pub FlowState);

pub fn advance_reflector_flow(time: Res<Time>, mut flows: Query<&mut ReflectorFlow>) {
    let delta = time.delta_secs();
    for mut flow in &mut flows {
        flow.0.advance(delta);
    }
}

/// Copies the texture matrix and flow offsets into each reflector's material.
pub fn sync_reflector_uniforms(
    reflectors: Query<(
        &ReflectorState,
        &ReflectorFlow,
        &MeshMaterial3d<ReflectorMaterial>,
    )>,
    mut materials: ResMut<Assets<ReflectorMaterial>>,
) {
    for (state, flow, material_handle) in &reflectors {
        let Some(material) = materials.get_mut(&material_handle.0) else {
            continue;
        };

        let params = &mut material.extension.params;
        params.texture_matrix = state.texture_matrix;
        params.local_from_world = state.world_from_reflector.inverse();
        params.flow_offset_0 = flow.0.offset_a;
        params.flow_offset_1 = flow.0.offset_b;
        params.half_cycle = flow.0.half_cycle();
    }
}

/// Pushes reloaded flow and opacity settings into live reflectors.
pub fn apply_config_to_reflectors(
    config: Res<ReflectorConfig>,
    mut reflectors: Query<(
        &mut ReflectorFlow,
        &mut ReflectorState,
        &MeshMaterial3d<ReflectorMaterial>,
    )>,
    mut materials: ResMut<Assets<ReflectorMaterial>>,
) {
    if !config.is_changed() {
        return;
    }

    for (mut flow, mut state, material_handle) in &mut reflectors {
        if flow.0.speed != config.flow.speed || flow.0.cycle != config.flow.cycle {
            flow.0 = FlowState::new(config.flow.speed, config.flow.cycle);
        }
        state.clip_bias = config.clip_bias;

        let Some(material) = materials.get_mut(&material_handle.0) else {
            continue;
        };
        let params = &mut material.extension.params;
        params.flow_direction = config.flow_direction();
        params.reflector_opacity = config.reflector_opacity;
        params.ripple_distortion = config.flow.ripple_distortion;
    }
}
