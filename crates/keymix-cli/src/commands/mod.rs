//! CLI command implementations

pub mod export;
pub mod import;
pub mod inspect;
pub mod path;

use anyhow::{Context, Result};
use keymix_clip::ShapeMix;
use keymix_scene::{resolve_object_path, SceneGraph};
use serde::{Deserialize, Serialize};

/// A `[weights]` table of shape-key weights, in file order
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WeightsFile {
    #[serde(default)]
    pub weights: ShapeMix,
}

/// Engine path of a named object
pub fn object_path(graph: &SceneGraph, name: &str) -> Result<String> {
    let node = graph
        .find(name)
        .with_context(|| format!("Object '{}' not found in scene", name))?;
    Ok(resolve_object_path(node))
}
