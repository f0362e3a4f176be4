//! Main-camera effect chain: antialiasing, bloom and the custom fullscreen passes.

/// Chromatic aberration fullscreen pass.
pub mod chromatic_aberration;

/// Colour-dodge film grain fullscreen pass.
pub mod color_noise;

/// Effect chain ordering, reflection splicing and main-camera effect setup.
pub mod composer;

/// Generic render-graph node and pipeline for fullscreen effects.
pub mod fullscreen_pass;
