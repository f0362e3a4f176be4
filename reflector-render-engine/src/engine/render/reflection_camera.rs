//! The mirrored camera that renders the reflection image each frame.
//!
//! The reflector's [`PassSequence`] is executed here against the ECS: the
//! camera update writes the mirrored transform and oblique projection, the
//! scene passes activate the camera, and facing-away frames leave it idle so
//! the last saved image stays bound to the material.

use bevy::core_pipeline::dof::DepthOfField;
use bevy::core_pipeline::prepass::DepthPrepass;
use bevy::math::Vec3A;
use bevy::prelude::*;
use bevy::render::camera::{
    CameraProjection, CameraUpdateSystem, RenderTarget, SubCameraView,
};
use bevy::render::view::RenderLayers;

use crate::engine::assets::reflector_config::ReflectorConfig;
use crate::engine::reflection::{
    CameraState, CameraUpdate, PassSequence, ReflectionHost, ReflectionPass, ReflectorState,
    to_reverse_z,
};
use crate::engine::render::reflection_target::ReflectionTarget;
use constants::render_settings::SCENE_LAYER;

/// Camera whose view is mirrored into reflectors.
#[derive(Component, Debug, Default)]
pub struct MainCamera;

/// A planar reflector surface and the passes that refresh its reflection.
#[derive(Component, Debug, Clone, Default)]
pub struct Reflector {
    pub sequence: PassSequence,
}

/// Renders the mirrored scene for `reflector`.
#[derive(Component, Debug, Clone, Copy)]
pub struct ReflectionCamera {
    pub reflector: Entity,
}

/// Perspective projection with an oblique near plane.
///
/// The matrix is precomputed each frame; `update` is a no-op so the camera
/// system never overwrites it.
#[derive(Debug, Clone, Reflect)]
pub struct ObliqueProjection {
    pub perspective: PerspectiveProjection,
    pub clip_from_view: Mat4,
}

impl CameraProjection for ObliqueProjection {
    fn get_clip_from_view(&self) -> Mat4 {
        self.clip_from_view
    }

    fn get_clip_from_view_for_sub(&self, _sub_view: &SubCameraView) -> Mat4 {
        self.clip_from_view
    }

    fn update(&mut self, _width: f32, _height: f32) {}

    fn far(&self) -> f32 {
        self.perspective.far
    }

    fn get_frustum_corners(&self, z_near: f32, z_far: f32) -> [Vec3A; 8] {
        self.perspective.get_frustum_corners(z_near, z_far)
    }
}

/// Reflection camera features implied by the passes of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectionCameraSetup {
    pub depth_prepass: bool,
    pub depth_of_field: bool,
    pub renders_to_target: bool,
}

impl ReflectionCameraSetup {
    pub fn from_sequence(sequence: &PassSequence) -> Self {
        Self {
            depth_prepass: sequence.contains(ReflectionPass::SceneDepth),
            depth_of_field: sequence.contains(ReflectionPass::DepthOfField),
            renders_to_target: sequence.contains(ReflectionPass::Save),
        }
    }
}

/// Spawns the camera that executes `reflector`'s passes.
///
/// It renders before the main camera and only sees the scene layer, so the
/// reflector never appears in its own reflection.
pub fn spawn_reflection_camera(
    commands: &mut Commands,
    reflector_entity: Entity,
    reflector: &Reflector,
    target: &ReflectionTarget,
    config: &ReflectorConfig,
    perspective: PerspectiveProjection,
) -> Entity {
    let setup = ReflectionCameraSetup::from_sequence(&reflector.sequence);
    let far = perspective.far;

    let mut camera = Camera {
        order: -1,
        hdr: false,
        is_active: false,
        clear_color: ClearColorConfig::Custom(Color::BLACK),
        ..default()
    };
    if setup.renders_to_target {
        camera.target = RenderTarget::Image(target.image.clone().into());
    }

    let mut entity = commands.spawn((
        Name::new("Reflection Camera"),
        Camera3d::default(),
        camera,
        Msaa::Off,
        Projection::custom(ObliqueProjection {
            perspective,
            clip_from_view: Mat4::IDENTITY,
        }),
        RenderLayers::layer(SCENE_LAYER),
        ReflectionCamera {
            reflector: reflector_entity,
        },
    ));

    if setup.depth_prepass {
        entity.insert(DepthPrepass);
    }
    if setup.depth_of_field {
        entity.insert(config.depth_of_field.to_depth_of_field(far));
    }

    info!(
        "Reflection camera spawned: {} passes, depth prepass {}, depth of field {}",
        reflector.sequence.passes().len(),
        setup.depth_prepass,
        setup.depth_of_field
    );

    entity.id()
}

/// Runs a reflector's pass sequence against the ECS for one frame.
struct EcsReflectionHost<'a> {
    state: &'a mut ReflectorState,
    camera: &'a CameraState,
    world_from_reflector: Mat4,
    reflector_visible: bool,
    render_requested: bool,
}

impl ReflectionHost for EcsReflectionHost<'_> {
    // Visibility is per view through render layers, so toggling only tracks state.
    fn set_reflector_visible(&mut self, visible: bool) {
        self.reflector_visible = visible;
    }

    fn update_virtual_camera(&mut self) -> CameraUpdate {
        self.state.update(self.camera, &self.world_from_reflector)
    }

    fn run_pass(&mut self, pass: ReflectionPass) {
        if pass == ReflectionPass::SceneColor {
            self.render_requested = true;
        }
    }
}

/// World matrix of `entity`, composed up its parent chain.
///
/// Runs ahead of transform propagation, so `GlobalTransform` would lag a frame.
pub fn world_matrix(
    entity: Entity,
    transforms: &Query<(&Transform, Option<&ChildOf>), Without<ReflectionCamera>>,
) -> Option<Mat4> {
    let (transform, mut parent) = transforms.get(entity).ok()?;
    let mut matrix = transform.compute_matrix();

    while let Some(child_of) = parent {
        let (parent_transform, grandparent) = transforms.get(child_of.parent()).ok()?;
        matrix = parent_transform.compute_matrix() * matrix;
        parent = grandparent;
    }

    Some(matrix)
}

/// GL-convention projection of the main camera used as the mirror's starting point.
fn main_camera_state(world_from_view: Mat4, perspective: &PerspectiveProjection) -> CameraState {
    CameraState {
        world_from_view,
        clip_from_view: Mat4::perspective_rh_gl(
            perspective.fov,
            perspective.aspect_ratio,
            perspective.near,
            perspective.far,
        ),
        far: perspective.far,
    }
}

pub fn update_reflection_cameras(
    main_camera: Query<(Entity, &Projection), (With<MainCamera>, Without<ReflectionCamera>)>,
    mut reflectors: Query<(&Reflector, &mut ReflectorState)>,
    transforms: Query<(&Transform, Option<&ChildOf>), Without<ReflectionCamera>>,
    mut reflection_cameras: Query<(
        &ReflectionCamera,
        &mut Camera,
        &mut Transform,
        &mut GlobalTransform,
        &mut Projection,
    )>,
) {
    let Ok((main_entity, Projection::Perspective(perspective))) = main_camera.single() else {
        return;
    };
    let Some(world_from_view) = world_matrix(main_entity, &transforms) else {
        return;
    };
    let camera_state = main_camera_state(world_from_view, perspective);

    for (link, mut camera, mut transform, mut global_transform, mut projection) in
        &mut reflection_cameras
    {
        let Ok((reflector, mut state)) = reflectors.get_mut(link.reflector) else {
            warn!("Reflection camera points at a missing reflector");
            camera.is_active = false;
            continue;
        };
        let Some(world_from_reflector) = world_matrix(link.reflector, &transforms) else {
            continue;
        };

        let previous = state.last_update;
        let mut host = EcsReflectionHost {
            state: &mut *state,
            camera: &camera_state,
            world_from_reflector,
            reflector_visible: true,
            render_requested: false,
        };
        let outcome = reflector.sequence.run(&mut host);
        let render_requested = host.render_requested;
        debug_assert!(host.reflector_visible);

        if state.transitioned_from(previous) {
            match outcome {
                CameraUpdate::FacingAway => {
                    info!("Camera behind reflector, reusing last reflection")
                }
                CameraUpdate::Updated => info!("Camera in front of reflector, reflection live"),
            }
        }

        camera.is_active = render_requested;
        if outcome == CameraUpdate::FacingAway {
            continue;
        }

        let virtual_camera = &state.virtual_camera;
        *transform = Transform::from_matrix(virtual_camera.world_from_view);
        *global_transform = GlobalTransform::from(virtual_camera.world_from_view);
        *projection = Projection::custom(ObliqueProjection {
            perspective: perspective.clone(),
            clip_from_view: to_reverse_z(&virtual_camera.clip_from_view),
        });
    }
}

/// Follows a config change of the depth-of-field parameters.
pub fn sync_reflection_depth_of_field(
    config: Res<ReflectorConfig>,
    mut cameras: Query<(&mut DepthOfField, &Projection), With<ReflectionCamera>>,
) {
    if !config.is_changed() {
        return;
    }
    for (mut dof, projection) in &mut cameras {
        *dof = config.depth_of_field.to_depth_of_field(projection.far());
    }
}

pub struct ReflectionCameraPlugin;

impl Plugin for ReflectionCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            update_reflection_cameras.before(CameraUpdateSystem),
        )
        .add_systems(
            Update,
            sync_reflection_depth_of_field.run_if(resource_exists::<ReflectorConfig>),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_sequence_needs_every_camera_feature() {
        let setup = ReflectionCameraSetup::from_sequence(&PassSequence::standard());
        assert!(setup.depth_prepass);
        assert!(setup.depth_of_field);
        assert!(setup.renders_to_target);
    }

    #[test]
    fn oblique_projection_reports_its_matrix() {
        let clip_from_view = Mat4::from_diagonal(Vec4::new(1.0, 2.0, 3.0, 1.0));
        let projection = ObliqueProjection {
            perspective: PerspectiveProjection::default(),
            clip_from_view,
        };
        assert_eq!(projection.get_clip_from_view(), clip_from_view);
        assert_eq!(projection.far(), PerspectiveProjection::default().far);
    }

    #[test]
    fn main_camera_state_uses_gl_depth() {
        let perspective = PerspectiveProjection {
            near: 0.1,
            far: 100.0,
            ..default()
        };
        let state = main_camera_state(Mat4::IDENTITY, &perspective);
        let near = state.clip_from_view.project_point3(Vec3::new(0.0, 0.0, -0.1));
        assert!((near.z + 1.0).abs() < 1e-4);
        assert_eq!(state.far, 100.0);
    }
}
