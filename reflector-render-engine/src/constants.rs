/// Asset paths for shaders and configuration files.
pub mod path;

/// Default settings of the render-graph effects owned by this crate.
pub mod render_settings;

/// Placement and dimensions of the demo scene props.
pub mod scene;
