use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::reflector_config::ReflectorConfig;
use crate::engine::camera::orbit_camera::{OrbitCamera, orbit_camera_controller};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{
    ConfigLoader, reload_config_system, resolve_config_system, start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::texture_loader::check_texture_loading;
use crate::engine::material::reflector_material::{
    ReflectorMaterial, advance_reflector_flow, apply_config_to_reflectors, sync_reflector_uniforms,
};
use crate::engine::render::post_processing::composer::PostProcessingPlugin;
use crate::engine::render::reflection_camera::{ReflectionCameraPlugin, update_reflection_cameras};
use crate::engine::render::reflection_target::sync_reflection_target_size;
use crate::engine::scene::props::{
    animate_hovering_sphere, spawn_lighting, spawn_main_camera, spawn_props,
};
use crate::engine::scene::reflector_floor::{create_reflection_target, spawn_reflector_floor};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::{core::app_state::FpsText, systems::fps_tracking::fps_text_update_system};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MaterialPlugin::<ReflectorMaterial>::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers ReflectorConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ReflectorConfig>::new(&["json"]))
        .add_plugins(ReflectionCameraPlugin)
        // Needs the core 3d graph from DefaultPlugins for its edges.
        .add_plugins(PostProcessingPlugin);

    app.insert_resource(ClearColor(Color::BLACK))
        .init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<OrbitCamera>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                resolve_config_system,
                check_texture_loading,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            OnEnter(AppState::Running),
            (create_reflection_target, spawn_reflector_floor).chain(),
        );

    app.add_systems(
        Update,
        (
            reload_config_system,
            (apply_config_to_reflectors, sync_reflection_target_size),
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    )
    .add_systems(
        Update,
        (
            advance_reflector_flow,
            animate_hovering_sphere,
            orbit_camera_controller,
        )
            .run_if(in_state(AppState::Running)),
    )
    .add_systems(
        PostUpdate,
        sync_reflector_uniforms
            .after(update_reflection_cameras)
            .run_if(in_state(AppState::Running)),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system: camera, lights and props; the floor waits for loading.
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_main_camera(&mut commands);
    spawn_lighting(&mut commands);
    spawn_props(&mut commands, &mut meshes, &mut materials);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
