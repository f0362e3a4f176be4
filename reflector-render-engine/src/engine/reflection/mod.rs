pub mod math;
pub mod oblique;
pub mod pipeline;
pub mod texture_matrix;
pub mod virtual_camera;

pub use oblique::{apply_oblique_clip_plane, to_reverse_z};
pub use pipeline::{PassResource, PassSequence, ReflectionHost, ReflectionPass};
pub use texture_matrix::{UV_BIAS, project_to_texture, texture_matrix};
pub use virtual_camera::{CameraState, CameraUpdate, MirrorScratch, VirtualCamera};

use bevy::math::{Mat4, Vec4};
use bevy::prelude::Component;

/// Per-reflector mirror state, reused in place every frame.
///
/// Owning the scratch values here keeps several reflectors independent of
/// each other without any per-frame allocation.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ReflectorState {
    pub virtual_camera: VirtualCamera,
    /// Reflector-local position to reflection UV, built before the oblique patch.
    pub texture_matrix: Mat4,
    /// Reflector transform the texture matrix was built from.
    pub world_from_reflector: Mat4,
    pub clip_bias: f32,
    /// Reflector plane in the virtual camera's view space, before scaling.
    pub view_plane: Vec4,
    /// Scaled plane written into the projection's depth row.
    pub clip_plane: Vec4,
    pub scratch: MirrorScratch,
    pub last_update: Option<CameraUpdate>,
}

impl ReflectorState {
    pub fn new(clip_bias: f32) -> Self {
        Self {
            virtual_camera: VirtualCamera::default(),
            texture_matrix: Mat4::IDENTITY,
            world_from_reflector: Mat4::IDENTITY,
            clip_bias,
            view_plane: Vec4::ZERO,
            clip_plane: Vec4::ZERO,
            scratch: MirrorScratch::default(),
            last_update: None,
        }
    }

    /// Mirrors the camera, patches the near plane and rebuilds the texture matrix.
    ///
    /// On [`CameraUpdate::FacingAway`] the previous frame's camera and texture
    /// matrix are kept as they were.
    pub fn update(&mut self, camera: &CameraState, world_from_reflector: &Mat4) -> CameraUpdate {
        let outcome = self
            .virtual_camera
            .update(&mut self.scratch, camera, world_from_reflector);
        self.last_update = Some(outcome);

        if outcome == CameraUpdate::FacingAway {
            return outcome;
        }

        // Depth row must stay unpatched: the ripple offset scales with it.
        self.texture_matrix = texture_matrix(
            &self.virtual_camera.clip_from_view,
            &self.virtual_camera.view_from_world,
            world_from_reflector,
        );

        let view_plane = self
            .scratch
            .plane
            .transformed(&self.virtual_camera.view_from_world);
        self.view_plane = view_plane.to_vec4();
        self.clip_plane = apply_oblique_clip_plane(
            &mut self.virtual_camera.clip_from_view,
            self.view_plane,
            self.clip_bias,
        );

        self.world_from_reflector = *world_from_reflector;

        outcome
    }

    /// Whether the last update changed the facing state compared to `previous`.
    pub fn transitioned_from(&self, previous: Option<CameraUpdate>) -> bool {
        self.last_update.is_some() && self.last_update != previous
    }
}

impl Default for ReflectorState {
    fn default() -> Self {
        Self::new(constants::render_settings::CLIP_BIAS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::reflection::math::look_at;
    use bevy::math::Vec3;

    fn camera(eye: Vec3) -> CameraState {
        CameraState {
            world_from_view: look_at(eye, Vec3::ZERO, Vec3::Y),
            clip_from_view: Mat4::perspective_rh_gl(60f32.to_radians(), 1.5, 0.1, 100.0),
            far: 100.0,
        }
    }

    #[test]
    fn near_plane_lies_on_the_reflector() {
        let mut state = ReflectorState::default();
        state.update(&camera(Vec3::new(1.0, 2.0, 10.0)), &Mat4::IDENTITY);

        let near = oblique::near_plane(&state.virtual_camera.clip_from_view);
        for p in [Vec3::ZERO, Vec3::new(3.0, -1.0, 0.0), Vec3::new(-2.0, 4.0, 0.0)] {
            let view_p = state.virtual_camera.view_from_world.transform_point3(p);
            assert!(near.dot(view_p.extend(1.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn reflector_depth_survives_the_oblique_patch() {
        let mut state = ReflectorState::default();
        state.update(&camera(Vec3::new(1.0, 2.0, 10.0)), &Mat4::IDENTITY);

        let patched = texture_matrix(
            &state.virtual_camera.clip_from_view,
            &state.virtual_camera.view_from_world,
            &Mat4::IDENTITY,
        );
        for p in [Vec3::ZERO, Vec3::new(2.0, 1.0, 0.0)] {
            let uv = project_to_texture(&state.texture_matrix, p);
            let clipped = project_to_texture(&patched, p);
            assert!(uv.z > 0.5, "depth collapsed for {p}: {uv}");
            assert!(clipped.z.abs() < 1e-3);
            assert!((uv.x - clipped.x).abs() < 1e-5);
            assert!((uv.y - clipped.y).abs() < 1e-5);
        }
    }

    #[test]
    fn facing_away_keeps_the_previous_texture_matrix() {
        let mut state = ReflectorState::default();
        state.update(&camera(Vec3::new(0.0, 0.0, 10.0)), &Mat4::IDENTITY);
        let before = state.texture_matrix;
        let before_camera = state.virtual_camera;

        let outcome = state.update(&camera(Vec3::new(0.0, 0.0, -10.0)), &Mat4::IDENTITY);

        assert_eq!(outcome, CameraUpdate::FacingAway);
        assert_eq!(state.texture_matrix, before);
        assert_eq!(state.virtual_camera, before_camera);
    }

    #[test]
    fn transitions_are_reported_once() {
        let mut state = ReflectorState::default();
        state.update(&camera(Vec3::new(0.0, 0.0, 10.0)), &Mat4::IDENTITY);
        assert!(state.transitioned_from(None));

        let previous = state.last_update;
        state.update(&camera(Vec3::new(0.0, 0.0, 10.0)), &Mat4::IDENTITY);
        assert!(!state.transitioned_from(previous));
    }
}
