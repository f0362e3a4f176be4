use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::constants::path::REFLECTOR_CONFIG_PATH;
use crate::engine::assets::reflector_config::ReflectorConfig;
use crate::engine::assets::surface_textures::load_surface_textures;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<ReflectorConfig>>,
}

/// Starts loading the config file and every surface texture.
pub fn start_loading(
    mut commands: Commands,
    mut config_loader: ResMut<ConfigLoader>,
    asset_server: Res<AssetServer>,
) {
    config_loader.handle = Some(asset_server.load(REFLECTOR_CONFIG_PATH));
    commands.insert_resource(load_surface_textures(&asset_server));
}

/// Inserts the loaded config as a resource once it is available.
///
/// A missing or invalid file keeps the defaults; neither stops the app.
pub fn resolve_config_system(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    config_loader: Res<ConfigLoader>,
    configs: Res<Assets<ReflectorConfig>>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.config_resolved {
        return;
    }
    let Some(handle) = &config_loader.handle else {
        return;
    };

    if let Some(config) = configs.get(handle) {
        match config.validate() {
            Ok(()) => {
                info!("Reflector config loaded from {REFLECTOR_CONFIG_PATH}");
                commands.insert_resource(config.clone());
            }
            Err(err) => {
                error!("{err}, keeping default reflector config");
                commands.insert_resource(ReflectorConfig::default());
            }
        }
        loading_progress.config_resolved = true;
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        warn!("Could not load {REFLECTOR_CONFIG_PATH} ({err}), using defaults");
        commands.insert_resource(ReflectorConfig::default());
        loading_progress.config_resolved = true;
    }
}

/// Applies edits of the config file while the app is running.
pub fn reload_config_system(
    mut events: EventReader<AssetEvent<ReflectorConfig>>,
    config_loader: Res<ConfigLoader>,
    configs: Res<Assets<ReflectorConfig>>,
    mut active: ResMut<ReflectorConfig>,
) {
    let Some(handle) = &config_loader.handle else {
        return;
    };

    for event in events.read() {
        if !event.is_modified(handle) {
            continue;
        }
        let Some(config) = configs.get(handle) else {
            continue;
        };
        match config.validate() {
            Ok(()) if *config != *active => {
                info!("Reflector config changed, applying");
                *active = config.clone();
            }
            Ok(()) => {}
            Err(err) => error!("{err}, keeping current reflector config"),
        }
    }
}
