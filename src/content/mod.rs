//! Declarative scene population.
//!
//! Scene content is a list of [`ContentModule`]s the orchestrator walks in
//! deterministic order; disabled modules are skipped without touching the
//! orchestration control flow, which is how experimental content (orbiting
//! satellites, the hull model) stays in the tree without rendering.

use crate::{
    config::Configuration,
    data_structures::{NodeId, SceneGraph},
    resources::{AssetRegistry, LoadError, ManifestEntry},
};

pub mod night;

/// Everything a module may consult while attaching its nodes.
///
/// The registry is complete before any module runs: builders resolve named
/// assets through [`AssetRegistry::require`] and can rely on the whole
/// manifest having loaded.
pub struct BuildContext<'a> {
    pub scene: &'a mut SceneGraph,
    pub assets: &'a AssetRegistry,
    pub config: &'a Configuration,
    /// Set by the reflector module so the frame loop can find its driver.
    pub reflector: Option<NodeId>,
}

pub trait ContentModule {
    fn name(&self) -> &str;

    /// Disabled modules contribute no nodes; their manifest entries still
    /// load.
    fn enabled(&self) -> bool {
        true
    }

    fn build(&self, ctx: &mut BuildContext) -> Result<NodeId, LoadError>;
}

/// The manifest of the shipped night scene. Includes the hull model even
/// though its module is disabled, mirroring the production asset list.
pub fn night_scene_manifest() -> Vec<ManifestEntry> {
    vec![
        ManifestEntry::font("titleFont", "fonts/roboto_slab.typeface.json"),
        ManifestEntry::texture("ripple", "img/waterdudv.jpg"),
        ManifestEntry::texture("moon", "img/moon.jpg"),
        ManifestEntry::texture("starSprite", "img/star32.png"),
        ManifestEntry::model("hull", "models/hull.glb"),
    ]
}
