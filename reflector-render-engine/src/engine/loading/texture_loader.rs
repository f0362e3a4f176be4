use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::surface_textures::SurfaceTextures;
use crate::engine::loading::progress::LoadingProgress;

/// Marks textures as settled once each has either loaded or failed.
///
/// A failed texture is swapped for Bevy's 1×1 white placeholder so the
/// floor material can still be prepared.
pub fn check_texture_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    textures: Option<ResMut<SurfaceTextures>>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.textures_loaded {
        return;
    }
    let Some(mut textures) = textures else {
        return;
    };

    let mut pending = 0;
    for handle in textures.all_mut() {
        match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => {}
            Some(LoadState::Failed(err)) => {
                warn!("Surface texture failed to load, using placeholder: {err}");
                *handle = Handle::default();
            }
            // The placeholder is not tracked by the asset server.
            None if *handle == Handle::default() => {}
            _ => pending += 1,
        }
    }

    if pending == 0 {
        info!("Surface textures ready");
        loading_progress.textures_loaded = true;
    }
}
