use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::math::EulerRot;
use bevy::prelude::*;

use crate::constants::scene::CAMERA_POSITION;
use crate::engine::render::reflection_camera::MainCamera;

const YAW_SENSITIVITY: f32 = 0.0035;
const PITCH_SENSITIVITY: f32 = 0.0030;
const PITCH_LIMIT: f32 = 1.55;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 60.0;
const PIXELS_PER_LINE: f32 = 20.0;

/// Orbit around a focus point, driven by mouse drag and scroll.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// Interpolation rate towards the target pose, per second.
    pub smoothing: f32,
}

impl OrbitCamera {
    /// Orbit that reproduces a camera at `position` looking at `focus`.
    pub fn looking_at(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let distance = offset.length().max(MIN_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = -(offset.y / distance).clamp(-1.0, 1.0).asin();

        Self {
            focus,
            distance,
            yaw,
            pitch,
            smoothing: 12.0,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Camera position on the orbit sphere.
    pub fn eye(&self) -> Vec3 {
        self.focus + self.rotation() * Vec3::Z * self.distance
    }

    pub fn rotate(&mut self, mouse_delta: Vec2) {
        self.yaw -= mouse_delta.x * YAW_SENSITIVITY;
        self.pitch = (self.pitch - mouse_delta.y * PITCH_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Moves towards the focus for positive `lines`.
    pub fn dolly(&mut self, lines: f32) {
        let step = (self.distance * 0.1).max(0.1);
        self.distance = (self.distance - lines * step).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(CAMERA_POSITION, Vec3::ZERO)
    }
}

pub fn orbit_camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    time: Res<Time>,
) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };

    if mouse_button.any_pressed([MouseButton::Left, MouseButton::Right])
        && mouse_motion.delta != Vec2::ZERO
    {
        orbit.rotate(mouse_motion.delta);
    }

    let lines = match mouse_scroll.unit {
        MouseScrollUnit::Line => mouse_scroll.delta.y,
        MouseScrollUnit::Pixel => mouse_scroll.delta.y / PIXELS_PER_LINE,
    };
    if lines.abs() > f32::EPSILON {
        orbit.dolly(lines);
    }

    let blend = (orbit.smoothing * time.delta_secs()).min(1.0);
    transform.translation = transform.translation.lerp(orbit.eye(), blend);
    transform.rotation = transform.rotation.slerp(orbit.rotation(), blend);
}
