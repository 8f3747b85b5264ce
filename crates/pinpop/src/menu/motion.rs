use crate::config::{AnimationConfig, Spring};
use serde::Serialize;

/// How the renderer should animate into a snapshot. Interpolation is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Transition {
    Engage(Spring),
    Release(Spring),
    /// Follow the finger with the renderer's default curve.
    Track,
    None,
}

impl Transition {
    pub fn engage(cfg: &AnimationConfig) -> Self {
        Self::Engage(cfg.engage)
    }

    pub fn release(cfg: &AnimationConfig) -> Self {
        Self::Release(cfg.release)
    }
}
