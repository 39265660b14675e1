//! Path command

use super::object_path;
use anyhow::{Context, Result};
use keymix_scene::load_scene;

pub fn run(scene_path: &str, object: &str) -> Result<()> {
    let (graph, _) = load_scene(scene_path).context("Failed to load scene")?;
    println!("{}", object_path(&graph, object)?);
    Ok(())
}
