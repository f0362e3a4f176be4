use crate::engine::reflection::pipeline::PassResource;
use thiserror::Error;

/// Construction-time failures of the reflection pipeline and its configuration.
///
/// Per-frame degenerate geometry is not an error; see
/// [`CameraUpdate`](crate::engine::reflection::CameraUpdate).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReflectorError {
    #[error("pass `{pass}` reads {resource:?} before any earlier pass writes it")]
    MissingInput {
        pass: &'static str,
        resource: PassResource,
    },

    #[error("pass `{0}` appears more than once")]
    DuplicatePass(&'static str),

    #[error("the reflector is still hidden after the last pass")]
    ReflectorLeftHidden,

    #[error("no pass writes the reflection texture")]
    NoReflectionOutput,

    #[error("reflection pass `{0}` is placed after the main render pass")]
    ReflectionAfterMainRender(&'static str),

    #[error("effect chain has no main render pass")]
    MissingMainRender,

    #[error("invalid configuration: `{field}` {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl ReflectorError {
    pub fn invalid_config<T: ToString>(field: &'static str, reason: T) -> Self {
        ReflectorError::InvalidConfig {
            field,
            reason: reason.to_string(),
        }
    }
}
