use std::f32::consts::FRAC_PI_2;

use bevy::math::Affine2;
use bevy::prelude::*;
use bevy::render::view::RenderLayers;

use crate::constants::scene::*;
use crate::engine::assets::reflector_config::ReflectorConfig;
use crate::engine::assets::surface_textures::SurfaceTextures;
use crate::engine::material::flow::FlowState;
use crate::engine::material::reflector_material::{
    ReflectorExtension, ReflectorFlow, ReflectorMaterial, ReflectorUniform,
};
use crate::engine::reflection::{PassSequence, ReflectorState};
use crate::engine::render::post_processing::composer::EffectChain;
use crate::engine::render::reflection_camera::{Reflector, spawn_reflection_camera};
use crate::engine::render::reflection_target::{ReflectionTarget, ReflectionTargetDescriptor};
use crate::engine::scene::props::{SceneGroup, main_perspective};
use constants::render_settings::REFLECTOR_LAYER;

/// Normal map strength of the floor surface.
const NORMAL_MAP_SCALE: f32 = 0.7;

pub fn create_reflection_target(
    mut commands: Commands,
    config: Res<ReflectorConfig>,
    mut images: ResMut<Assets<Image>>,
) {
    let descriptor = ReflectionTargetDescriptor::new(config.texture_width, config.texture_height);
    let target = ReflectionTarget::create(&mut images, descriptor);
    info!(
        "Reflection target created at {}x{}",
        descriptor.width, descriptor.height
    );
    commands.insert_resource(target);
}

/// PBR floor carrying the reflection, flow and roughness inputs.
pub fn build_floor_material(
    config: &ReflectorConfig,
    textures: &SurfaceTextures,
    target: &ReflectionTarget,
) -> ReflectorMaterial {
    let flow = FlowState::new(config.flow.speed, config.flow.cycle);
    debug!("Normal map scale {NORMAL_MAP_SCALE} approximated by the full-strength map");

    ReflectorMaterial {
        base: StandardMaterial {
            base_color_texture: Some(textures.base_color.clone()),
            occlusion_texture: Some(textures.occlusion.clone()),
            normal_map_texture: Some(textures.normal.clone()),
            metallic: SURFACE_METALLIC,
            perceptual_roughness: SURFACE_ROUGHNESS,
            clearcoat: SURFACE_CLEARCOAT,
            double_sided: true,
            cull_mode: None,
            uv_transform: Affine2::from_scale(constants::texture::SURFACE_TEXTURE_REPEAT),
            ..default()
        },
        extension: ReflectorExtension {
            params: ReflectorUniform {
                flow_direction: config.flow_direction(),
                flow_offset_0: flow.offset_a,
                flow_offset_1: flow.offset_b,
                half_cycle: flow.half_cycle(),
                reflector_opacity: config.reflector_opacity,
                ripple_distortion: config.flow.ripple_distortion,
                ..default()
            },
            reflection_texture: target.image.clone(),
            ripple_normal_a: textures.ripple_normals[0].clone(),
            ripple_normal_b: textures.ripple_normals[1].clone(),
            roughness_texture: textures.roughness.clone(),
        },
    }
}

/// Spawns the reflective floor under the scene group, its reflection camera,
/// and splices its passes into the effect chain.
pub fn spawn_reflector_floor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ReflectorMaterial>>,
    mut chain: ResMut<EffectChain>,
    config: Res<ReflectorConfig>,
    textures: Res<SurfaceTextures>,
    target: Res<ReflectionTarget>,
    group: Query<Entity, With<SceneGroup>>,
) {
    let Ok(group) = group.single() else {
        error!("Scene group missing, reflector floor not spawned");
        return;
    };

    let sequence = PassSequence::standard();
    if let Err(err) = chain.splice_reflection(&sequence) {
        error!("Reflection passes rejected by the effect chain: {err}");
        return;
    }

    let mesh = Circle::new(FLOOR_RADIUS)
        .mesh()
        .resolution(256)
        .build()
        .with_generated_tangents();
    let mesh = match mesh {
        Ok(mesh) => meshes.add(mesh),
        Err(err) => {
            error!("Could not generate floor tangents: {err}");
            return;
        }
    };

    let reflector = Reflector { sequence };
    let material = materials.add(build_floor_material(&config, &textures, &target));

    let floor = commands
        .spawn((
            Name::new("Reflector Floor"),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_xyz(0.0, FLOOR_HEIGHT, 0.0)
                .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            RenderLayers::layer(REFLECTOR_LAYER),
            reflector.clone(),
            ReflectorState::new(config.clip_bias),
            ReflectorFlow(FlowState::new(config.flow.speed, config.flow.cycle)),
        ))
        .id();
    commands.entity(group).add_child(floor);

    spawn_reflection_camera(
        &mut commands,
        floor,
        &reflector,
        &target,
        &config,
        main_perspective(),
    );

    info!("Reflector floor ready, {} stages in the effect chain", chain.stages().len());
}
