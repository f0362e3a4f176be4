//! Ordered reflection passes with declared inputs and outputs.
//!
//! Each pass names the frame resources it reads, writes and invalidates, so a
//! sequence can be checked once at construction instead of trusting the order
//! of shared mutable state at render time.

use crate::engine::error::ReflectorError;
use crate::engine::reflection::CameraUpdate;
use std::collections::HashSet;

/// Frame-local resources flowing between reflection passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassResource {
    /// The reflector is excluded from what is being rendered.
    ReflectorHidden,
    /// The mirrored camera, its oblique projection and the texture matrix.
    VirtualCamera,
    SceneColor,
    SceneDepth,
    BlurredColor,
    /// The persistent texture sampled by the reflector material.
    ReflectionTexture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectionPass {
    /// Hides the reflector and recomputes the virtual camera.
    HideReflector,
    SceneColor,
    SceneDepth,
    DepthOfField,
    /// Persists the blurred image into the reflection texture.
    Save,
    ShowReflector,
}

impl ReflectionPass {
    pub const STANDARD_ORDER: [ReflectionPass; 6] = [
        ReflectionPass::HideReflector,
        ReflectionPass::SceneColor,
        ReflectionPass::SceneDepth,
        ReflectionPass::DepthOfField,
        ReflectionPass::Save,
        ReflectionPass::ShowReflector,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReflectionPass::HideReflector => "hide_reflector",
            ReflectionPass::SceneColor => "scene_color",
            ReflectionPass::SceneDepth => "scene_depth",
            ReflectionPass::DepthOfField => "depth_of_field",
            ReflectionPass::Save => "save",
            ReflectionPass::ShowReflector => "show_reflector",
        }
    }

    pub fn reads(self) -> &'static [PassResource] {
        use PassResource::*;
        match self {
            ReflectionPass::HideReflector => &[],
            ReflectionPass::SceneColor | ReflectionPass::SceneDepth => {
                &[ReflectorHidden, VirtualCamera]
            }
            ReflectionPass::DepthOfField => &[SceneColor, SceneDepth],
            ReflectionPass::Save => &[BlurredColor],
            ReflectionPass::ShowReflector => &[ReflectorHidden],
        }
    }

    pub fn writes(self) -> &'static [PassResource] {
        use PassResource::*;
        match self {
            ReflectionPass::HideReflector => &[ReflectorHidden, VirtualCamera],
            ReflectionPass::SceneColor => &[SceneColor],
            ReflectionPass::SceneDepth => &[SceneDepth],
            ReflectionPass::DepthOfField => &[BlurredColor],
            ReflectionPass::Save => &[ReflectionTexture],
            ReflectionPass::ShowReflector => &[],
        }
    }

    /// Resources no longer valid once the pass has run.
    pub fn invalidates(self) -> &'static [PassResource] {
        match self {
            ReflectionPass::ShowReflector => &[PassResource::ReflectorHidden],
            _ => &[],
        }
    }

    /// GPU passes are skipped on frames where the camera faces away.
    pub fn is_gpu_pass(self) -> bool {
        !matches!(
            self,
            ReflectionPass::HideReflector | ReflectionPass::ShowReflector
        )
    }
}

/// Executes reflection passes on behalf of a [`PassSequence`].
pub trait ReflectionHost {
    fn set_reflector_visible(&mut self, visible: bool);

    /// Recomputes the virtual camera, oblique projection and texture matrix.
    fn update_virtual_camera(&mut self) -> CameraUpdate;

    fn run_pass(&mut self, pass: ReflectionPass);
}

/// A validated, immutable pass order. Built once per reflector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSequence {
    passes: Vec<ReflectionPass>,
}

impl PassSequence {
    /// Hide → scene colour → depth → depth of field → save → show.
    pub fn standard() -> Self {
        Self {
            passes: ReflectionPass::STANDARD_ORDER.to_vec(),
        }
    }

    pub fn new(passes: Vec<ReflectionPass>) -> Result<Self, ReflectorError> {
        validate(&passes)?;
        Ok(Self { passes })
    }

    pub fn passes(&self) -> &[ReflectionPass] {
        &self.passes
    }

    pub fn contains(&self, pass: ReflectionPass) -> bool {
        self.passes.contains(&pass)
    }

    /// Runs one frame. Visibility is always restored, even when the camera
    /// update reports [`CameraUpdate::FacingAway`] and the GPU passes are skipped.
    pub fn run<H: ReflectionHost>(&self, host: &mut H) -> CameraUpdate {
        let mut outcome = CameraUpdate::Updated;

        for &pass in &self.passes {
            match pass {
                ReflectionPass::HideReflector => {
                    host.set_reflector_visible(false);
                    outcome = host.update_virtual_camera();
                }
                ReflectionPass::ShowReflector => host.set_reflector_visible(true),
                gpu_pass => {
                    if outcome == CameraUpdate::Updated {
                        host.run_pass(gpu_pass);
                    }
                }
            }
        }

        outcome
    }
}

impl Default for PassSequence {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate(passes: &[ReflectionPass]) -> Result<(), ReflectorError> {
    let mut seen = HashSet::new();
    let mut available: HashSet<PassResource> = HashSet::new();

    for &pass in passes {
        if !seen.insert(pass) {
            return Err(ReflectorError::DuplicatePass(pass.label()));
        }

        if let Some(&resource) = pass.reads().iter().find(|r| !available.contains(r)) {
            return Err(ReflectorError::MissingInput {
                pass: pass.label(),
                resource,
            });
        }

        available.extend(pass.writes().iter().copied());
        for resource in pass.invalidates() {
            available.remove(resource);
        }
    }

    if available.contains(&PassResource::ReflectorHidden) {
        return Err(ReflectorError::ReflectorLeftHidden);
    }
    if !available.contains(&PassResource::ReflectionTexture) {
        return Err(ReflectorError::NoReflectionOutput);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        facing_away: bool,
        log: Vec<String>,
    }

    impl ReflectionHost for RecordingHost {
        fn set_reflector_visible(&mut self, visible: bool) {
            self.log.push(format!("visible={visible}"));
        }

        fn update_virtual_camera(&mut self) -> CameraUpdate {
            self.log.push("update".into());
            if self.facing_away {
                CameraUpdate::FacingAway
            } else {
                CameraUpdate::Updated
            }
        }

        fn run_pass(&mut self, pass: ReflectionPass) {
            self.log.push(pass.label().into());
        }
    }

    #[test]
    fn standard_order_is_valid() {
        assert!(PassSequence::new(ReflectionPass::STANDARD_ORDER.to_vec()).is_ok());
    }

    #[test]
    fn runs_every_pass_in_order() {
        let mut host = RecordingHost::default();
        let outcome = PassSequence::standard().run(&mut host);

        assert_eq!(outcome, CameraUpdate::Updated);
        assert_eq!(
            host.log,
            vec![
                "visible=false",
                "update",
                "scene_color",
                "scene_depth",
                "depth_of_field",
                "save",
                "visible=true",
            ]
        );
    }

    #[test]
    fn facing_away_skips_gpu_passes_but_restores_visibility() {
        let mut host = RecordingHost {
            facing_away: true,
            ..Default::default()
        };
        let outcome = PassSequence::standard().run(&mut host);

        assert_eq!(outcome, CameraUpdate::FacingAway);
        assert_eq!(host.log, vec!["visible=false", "update", "visible=true"]);
    }

    #[test]
    fn blur_before_depth_is_rejected() {
        use ReflectionPass::*;
        let err = PassSequence::new(vec![
            HideReflector,
            SceneColor,
            DepthOfField,
            SceneDepth,
            Save,
            ShowReflector,
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ReflectorError::MissingInput {
                pass: "depth_of_field",
                resource: PassResource::SceneDepth,
            }
        );
    }

    #[test]
    fn rendering_after_show_is_rejected() {
        use ReflectionPass::*;
        let err = PassSequence::new(vec![
            HideReflector,
            ShowReflector,
            SceneColor,
            SceneDepth,
            DepthOfField,
            Save,
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            ReflectorError::MissingInput {
                pass: "scene_color",
                resource: PassResource::ReflectorHidden,
            }
        ));
    }

    #[test]
    fn missing_show_leaves_reflector_hidden() {
        use ReflectionPass::*;
        let err = PassSequence::new(vec![HideReflector, SceneColor, SceneDepth, DepthOfField, Save])
            .unwrap_err();
        assert_eq!(err, ReflectorError::ReflectorLeftHidden);
    }

    #[test]
    fn duplicates_are_rejected() {
        use ReflectionPass::*;
        let err = PassSequence::new(vec![HideReflector, HideReflector]).unwrap_err();
        assert_eq!(err, ReflectorError::DuplicatePass("hide_reflector"));
    }
}
