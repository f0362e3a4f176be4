use std::f32::consts::FRAC_PI_2;

use bevy::math::{Mat4, Quat, UVec2, Vec3};
use reflector_render_engine::engine::assets::reflector_config::ReflectorConfig;
use reflector_render_engine::engine::error::ReflectorError;
use reflector_render_engine::engine::material::flow::FlowState;
use reflector_render_engine::engine::material::shading::{
    SamplingPath, distorted_uv, reflected_contribution, sampling_path,
};
use reflector_render_engine::engine::reflection::math::look_at;
use reflector_render_engine::engine::reflection::{
    CameraState, CameraUpdate, PassResource, PassSequence, ReflectionPass, ReflectorState,
    project_to_texture,
};
use reflector_render_engine::engine::render::post_processing::composer::{
    ChainStage, EffectChain,
};
use reflector_render_engine::engine::render::reflection_target::ReflectionTargetDescriptor;

const EPSILON: f32 = 1e-4;

fn camera(eye: Vec3, target: Vec3) -> CameraState {
    CameraState {
        world_from_view: look_at(eye, target, Vec3::Y),
        clip_from_view: Mat4::perspective_rh_gl(60f32.to_radians(), 16.0 / 9.0, 0.1, 100.0),
        far: 100.0,
    }
}

/// The demo floor: lying flat, facing up, under the scene group.
fn floor() -> Mat4 {
    Mat4::from_rotation_translation(
        Quat::from_rotation_x(-FRAC_PI_2),
        Vec3::new(0.0, -3.001, -5.0),
    )
}

#[test]
fn camera_in_front_of_xy_reflector_is_mirrored_behind_it() {
    let mut state = ReflectorState::default();
    let outcome = state.update(&camera(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO), &Mat4::IDENTITY);

    assert_eq!(outcome, CameraUpdate::Updated);
    let virtual_camera = &state.virtual_camera;
    assert!(virtual_camera.position.distance(Vec3::new(0.0, 0.0, -10.0)) < EPSILON);
    assert!(virtual_camera.forward().distance(Vec3::Z) < EPSILON);
    assert!(virtual_camera.up.distance(Vec3::Y) < EPSILON);
    assert_eq!(virtual_camera.far, 100.0);
}

#[test]
fn mirrored_position_is_equidistant_from_the_floor() {
    let eye = Vec3::new(2.0, 4.0, 8.0);
    let mut state = ReflectorState::default();
    state.update(&camera(eye, Vec3::ZERO), &floor());

    let plane = state.scratch.plane;
    let mirrored = state.virtual_camera.position;
    assert!((plane.distance_to_point(eye) + plane.distance_to_point(mirrored)).abs() < EPSILON);
    assert!((mirrored.x - eye.x).abs() < EPSILON);
    assert!((mirrored.z - eye.z).abs() < EPSILON);
}

#[test]
fn camera_below_the_floor_keeps_the_last_reflection() {
    let mut state = ReflectorState::default();
    state.update(&camera(Vec3::new(0.0, 2.0, 10.0), Vec3::ZERO), &floor());
    let texture_matrix = state.texture_matrix;

    let below = camera(Vec3::new(0.0, -10.0, 0.0), Vec3::new(0.0, -3.0, -5.0));
    let outcome = state.update(&below, &floor());

    assert_eq!(outcome, CameraUpdate::FacingAway);
    assert_eq!(state.texture_matrix, texture_matrix);
    assert!(state.transitioned_from(Some(CameraUpdate::Updated)));
}

#[test]
fn visible_reflector_points_project_inside_the_texture() {
    let mut state = ReflectorState::default();
    state.update(&camera(Vec3::new(0.0, 2.0, 10.0), Vec3::ZERO), &Mat4::IDENTITY);

    let centre = project_to_texture(&state.texture_matrix, Vec3::ZERO);
    assert!(centre.x > 0.4 && centre.x < 0.6);

    for local in [
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-1.0, 1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(-1.0, -1.0, 0.0),
    ] {
        let uv = project_to_texture(&state.texture_matrix, local);
        assert!((0.0..=1.0).contains(&uv.x), "u out of range for {local}: {uv}");
        assert!((0.0..=1.0).contains(&uv.y), "v out of range for {local}: {uv}");
    }
}

#[test]
fn flow_returns_to_its_start_after_one_cycle() {
    let mut flow = FlowState::new(1.0, 1.0);
    let start = flow;

    flow.advance(0.25);
    assert_eq!((flow.offset_a, flow.offset_b), (0.25, 0.75));

    flow.advance(0.25);
    assert_eq!((flow.offset_a, flow.offset_b), (0.5, 0.0));
    assert_eq!(flow.blend_weight(), 0.0);

    flow.advance(0.25);
    flow.advance(0.25);
    assert_eq!(flow, start);
    assert_eq!(flow.blend_weight(), 1.0);
}

#[test]
fn default_flow_resets_every_frame_at_sixty_hertz() {
    let mut flow = FlowState::default();
    flow.advance(1.0 / 60.0);

    assert_eq!(flow.offset_a, 0.0);
    assert_eq!(flow.offset_b, 0.5);
}

#[test]
fn only_power_of_two_targets_get_mipmaps() {
    assert!(ReflectionTargetDescriptor::new(512, 512).generate_mipmaps);
    assert!(!ReflectionTargetDescriptor::new(500, 500).generate_mipmaps);
}

#[test]
fn roughness_selects_the_sampling_path() {
    assert_eq!(sampling_path(0.8), SamplingPath::Sharp);
    assert_eq!(sampling_path(0.2), SamplingPath::Rippled);

    let sharp = Vec3::ONE;
    let rippled = Vec3::ZERO;
    let dry = reflected_contribution(sharp, rippled, 0.8, 0.2);
    assert!(dry.distance(Vec3::splat(0.2 * 0.2)) < EPSILON);
    assert_eq!(reflected_contribution(sharp, rippled, 0.2, 0.2), Vec3::ZERO);
}

#[test]
fn tilted_ripple_shifts_the_wet_sample_on_the_floor() {
    let mut state = ReflectorState::default();
    state.update(&camera(Vec3::new(0.0, 2.0, 10.0), Vec3::ZERO), &floor());
    let ripple = Vec3::new(0.6, 0.7, 0.4).normalize();

    for local in [Vec3::ZERO, Vec3::new(1.5, 0.5, 0.0), Vec3::new(-2.0, -1.0, 0.0)] {
        let projected = state.texture_matrix * local.extend(1.0);
        let sharp = project_to_texture(&state.texture_matrix, local);
        let rippled = distorted_uv(projected, ripple, 0.05);

        assert!(sharp.z > 0.9, "reflector depth lost at {local}: {sharp}");
        let offset = rippled.distance(sharp.truncate());
        assert!(offset > 0.03, "wet sample not displaced at {local}: {offset}");
    }

    let flat = distorted_uv(state.texture_matrix * Vec3::ZERO.extend(1.0), Vec3::Y, 0.05);
    let sharp = project_to_texture(&state.texture_matrix, Vec3::ZERO);
    assert!(flat.distance(sharp.truncate()) < EPSILON);
}

#[test]
fn out_of_order_passes_are_rejected() {
    use ReflectionPass::*;

    assert_eq!(
        PassSequence::new(vec![HideReflector, Save, SceneColor, ShowReflector]),
        Err(ReflectorError::MissingInput {
            pass: "save",
            resource: PassResource::BlurredColor,
        })
    );
    assert_eq!(
        PassSequence::new(vec![HideReflector, SceneColor, SceneDepth, DepthOfField, Save]),
        Err(ReflectorError::ReflectorLeftHidden)
    );
    assert_eq!(
        PassSequence::new(vec![
            HideReflector,
            SceneColor,
            SceneDepth,
            DepthOfField,
            ShowReflector
        ]),
        Err(ReflectorError::NoReflectionOutput)
    );
}

#[test]
fn reflection_passes_are_spliced_before_the_main_render() {
    let mut chain = EffectChain::new(UVec2::new(1280, 720));
    chain
        .splice_reflection(&PassSequence::standard())
        .expect("standard passes splice cleanly");

    let main = chain
        .stages()
        .iter()
        .position(|stage| *stage == ChainStage::MainRender)
        .expect("main render present");
    assert_eq!(main, ReflectionPass::STANDARD_ORDER.len());
    assert!(chain.validate().is_ok());
}

#[test]
fn shipped_config_is_valid() {
    let config: ReflectorConfig =
        serde_json::from_str(include_str!("../assets/config/reflector.json"))
            .expect("config parses");

    assert!(config.validate().is_ok());
    assert_eq!((config.texture_width, config.texture_height), (512, 512));
    assert_eq!(config.flow.speed, 100.0);
    assert_eq!(config.antialias.predication_threshold, 0.002);
}
