use bevy::prelude::*;

#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    /// Config loaded and validated, or defaults kept after a failure.
    pub config_resolved: bool,
    pub textures_loaded: bool,
}

impl LoadingProgress {
    pub fn is_complete(&self) -> bool {
        self.config_resolved && self.textures_loaded
    }
}
