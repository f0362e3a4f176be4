use crate::engine::reflection::math::{
    Plane, extract_rotation, look_at, matrix_position, mirror, reflect,
};
use bevy::math::{Mat4, Vec3};

/// Reflector surface normal in its local space.
pub const REFLECTOR_LOCAL_NORMAL: Vec3 = Vec3::Z;

/// Snapshot of the real camera consumed by the reflection update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub world_from_view: Mat4,
    /// Perspective projection in GL clip conventions (z in `[-w, w]`).
    pub clip_from_view: Mat4,
    pub far: f32,
}

/// Result of a per-frame reflection update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraUpdate {
    Updated,
    /// The camera is behind the reflector. Nothing downstream was touched.
    FacingAway,
}

/// Camera mirrored across the reflector plane.
///
/// Every field is overwritten on update; only the allocation survives frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub far: f32,
    pub world_from_view: Mat4,
    pub view_from_world: Mat4,
    pub clip_from_view: Mat4,
}

impl Default for VirtualCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            far: 1000.0,
            world_from_view: Mat4::IDENTITY,
            view_from_world: Mat4::IDENTITY,
            clip_from_view: Mat4::IDENTITY,
        }
    }
}

/// Intermediates of the last update, kept per reflector instance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MirrorScratch {
    pub reflector_position: Vec3,
    pub camera_position: Vec3,
    pub normal: Vec3,
    pub view: Vec3,
    pub look_at: Vec3,
    /// World-space reflector plane.
    pub plane: Plane,
}

impl VirtualCamera {
    /// Mirrors `camera` across the reflector described by `world_from_reflector`.
    ///
    /// Leaves `self` untouched and returns [`CameraUpdate::FacingAway`] when the
    /// camera sits on the back side of the reflector.
    pub fn update(
        &mut self,
        scratch: &mut MirrorScratch,
        camera: &CameraState,
        world_from_reflector: &Mat4,
    ) -> CameraUpdate {
        scratch.reflector_position = matrix_position(world_from_reflector);
        scratch.camera_position = matrix_position(&camera.world_from_view);

        let reflector_rotation = extract_rotation(world_from_reflector);
        scratch.normal = reflector_rotation
            .transform_vector3(REFLECTOR_LOCAL_NORMAL)
            .normalize();

        scratch.view = scratch.reflector_position - scratch.camera_position;
        if scratch.view.dot(scratch.normal) > 0.0 {
            return CameraUpdate::FacingAway;
        }

        let normal = scratch.normal;
        let position = mirror(scratch.view, normal) + scratch.reflector_position;

        let camera_rotation = extract_rotation(&camera.world_from_view);
        scratch.look_at = camera_rotation.transform_vector3(Vec3::NEG_Z) + scratch.camera_position;

        let target =
            mirror(scratch.reflector_position - scratch.look_at, normal) + scratch.reflector_position;
        let up = reflect(camera_rotation.transform_vector3(Vec3::Y), normal);

        self.position = position;
        self.target = target;
        self.up = up;
        self.world_from_view = look_at(position, target, up);
        self.view_from_world = self.world_from_view.inverse();
        self.far = camera.far;
        self.clip_from_view = camera.clip_from_view;

        scratch.plane =
            Plane::from_normal_and_coplanar_point(normal, scratch.reflector_position);

        CameraUpdate::Updated
    }

    /// Forward direction in world space.
    pub fn forward(&self) -> Vec3 {
        -self.world_from_view.z_axis.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Quat;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-4;

    fn camera_at(eye: Vec3, target: Vec3) -> CameraState {
        CameraState {
            world_from_view: look_at(eye, target, Vec3::Y),
            clip_from_view: Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 100.0),
            far: 100.0,
        }
    }

    #[test]
    fn mirrors_through_the_xy_plane() {
        let mut virtual_camera = VirtualCamera::default();
        let mut scratch = MirrorScratch::default();
        let camera = camera_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

        let outcome = virtual_camera.update(&mut scratch, &camera, &Mat4::IDENTITY);

        assert_eq!(outcome, CameraUpdate::Updated);
        assert!((virtual_camera.position - Vec3::new(0.0, 0.0, -10.0)).length() < EPSILON);
        assert!((virtual_camera.forward() - Vec3::Z).length() < EPSILON);
        assert_eq!(virtual_camera.far, 100.0);
        assert_eq!(virtual_camera.clip_from_view, camera.clip_from_view);
    }

    #[test]
    fn floor_reflector_mirrors_height() {
        let mut virtual_camera = VirtualCamera::default();
        let mut scratch = MirrorScratch::default();
        let floor = Mat4::from_rotation_translation(
            Quat::from_rotation_x(-FRAC_PI_2),
            Vec3::new(0.0, -3.0, 0.0),
        );
        let camera = camera_at(Vec3::new(2.0, 4.0, 6.0), Vec3::new(0.0, -1.0, 0.0));

        virtual_camera.update(&mut scratch, &camera, &floor);

        assert!((scratch.normal - Vec3::Y).length() < EPSILON);
        assert!((virtual_camera.position - Vec3::new(2.0, -10.0, 6.0)).length() < EPSILON);
        assert!(virtual_camera.up.y < 0.0);
    }

    #[test]
    fn facing_away_leaves_camera_untouched() {
        let mut virtual_camera = VirtualCamera::default();
        let mut scratch = MirrorScratch::default();
        let before = virtual_camera;
        let camera = camera_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO);

        let outcome = virtual_camera.update(&mut scratch, &camera, &Mat4::IDENTITY);

        assert_eq!(outcome, CameraUpdate::FacingAway);
        assert_eq!(virtual_camera, before);
    }

    #[test]
    fn update_is_idempotent() {
        let mut virtual_camera = VirtualCamera::default();
        let mut scratch = MirrorScratch::default();
        let camera = camera_at(Vec3::new(3.0, 1.0, 8.0), Vec3::new(-1.0, 0.5, 0.0));

        virtual_camera.update(&mut scratch, &camera, &Mat4::IDENTITY);
        let first = virtual_camera;
        virtual_camera.update(&mut scratch, &camera, &Mat4::IDENTITY);

        assert_eq!(first, virtual_camera);
    }
}
