use std::f32::consts::FRAC_PI_4;

use bevy::prelude::*;
use bevy::render::view::RenderLayers;

use crate::constants::scene::*;
use crate::engine::assets::reflector_config::ReflectorConfig;
use crate::engine::render::post_processing::composer::main_camera_effects;
use crate::engine::render::reflection_camera::MainCamera;
use constants::render_settings::{REFLECTOR_LAYER, SCENE_LAYER};

/// Root of every prop; the reflector floor is attached to it once loading ends.
#[derive(Component)]
pub struct SceneGroup;

#[derive(Component)]
pub struct HoveringSphere;

pub fn main_perspective() -> PerspectiveProjection {
    PerspectiveProjection {
        fov: CAMERA_FOV_DEGREES.to_radians(),
        near: CAMERA_NEAR,
        far: CAMERA_FAR,
        ..default()
    }
}

/// Main camera with the full post-processing chain. It sees both the scene
/// and the reflector layer.
pub fn spawn_main_camera(commands: &mut Commands) {
    let (smaa, bloom, noise, aberration) = main_camera_effects(&ReflectorConfig::default());

    commands.spawn((
        Name::new("Main Camera"),
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Msaa::Off,
        Projection::Perspective(main_perspective()),
        Transform::from_translation(CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        RenderLayers::from_layers(&[SCENE_LAYER, REFLECTOR_LAYER]),
        MainCamera,
        (smaa, bloom, noise, aberration),
    ));
}

pub fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        SpotLight {
            shadows_enabled: true,
            outer_angle: SPOT_LIGHT_ANGLE,
            inner_angle: 0.0,
            range: SPOT_LIGHT_RANGE,
            ..default()
        },
        Transform::from_translation(SPOT_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
}

/// Three pillars and the hovering sphere, grouped and pushed back along Z.
pub fn spawn_props(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let material = materials.add(StandardMaterial::default());
    let totem = meshes.add(Cuboid::new(TOTEM_SIZE.x, TOTEM_SIZE.y, TOTEM_SIZE.z));
    let sphere = meshes.add(Sphere::new(SPHERE_RADIUS).mesh().uv(64, 64));

    commands
        .spawn((
            Name::new("Scene Group"),
            Transform::from_translation(SCENE_GROUP_OFFSET),
            Visibility::default(),
            SceneGroup,
        ))
        .with_children(|group| {
            for x in TOTEM_X_POSITIONS {
                // The outer pillars are turned to face the camera corner-on.
                let rotation = if x == 0.0 {
                    Quat::IDENTITY
                } else {
                    Quat::from_rotation_y(FRAC_PI_4)
                };
                group.spawn((
                    Mesh3d(totem.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(x, 0.0, 0.0).with_rotation(rotation),
                ));
            }

            group.spawn((
                Mesh3d(sphere),
                MeshMaterial3d(material),
                Transform::default(),
                HoveringSphere,
            ));
        });
}

/// Lissajous path of the hovering sphere at `t` seconds.
pub fn hover_position(t: f32) -> Vec3 {
    Vec3::new(5.0 * t.sin(), 1.0 + (2.33 * t).sin(), 2.0 * (3.0 * t).cos())
}

pub fn animate_hovering_sphere(
    time: Res<Time>,
    mut spheres: Query<&mut Transform, With<HoveringSphere>>,
) {
    let position = hover_position(time.elapsed_secs());
    for mut transform in &mut spheres {
        transform.translation = position;
    }
}
