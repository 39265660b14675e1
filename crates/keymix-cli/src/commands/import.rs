//! Import command

use super::{object_path, WeightsFile};
use anyhow::{Context, Result};
use keymix_clip::file::load_shape_mix;
use keymix_scene::load_scene;
use keymix_scene::shape_keys::{apply_shape_mix, ApplyOptions};
use std::path::Path;

pub fn run(clip_path: &str, scene_path: &str, object: &str, format: &str) -> Result<()> {
    if !matches!(format, "json" | "toml") {
        anyhow::bail!("Unknown format: {}", format);
    }

    let (graph, description) = load_scene(scene_path).context("Failed to load scene")?;
    let target = object_path(&graph, object)?;

    let clip = Path::new(clip_path);
    let mix = load_shape_mix(clip, &target)
        .with_context(|| format!("Failed to read clip: {}", clip_path))?;

    // Check the mix against the mesh's own keys when the scene lists them
    let mut keys = description
        .object(object)
        .map(|o| o.shape_keys.clone())
        .unwrap_or_default();
    let report = apply_shape_mix(&mut keys, &mix, ApplyOptions::default());
    if !keys.is_empty() {
        for name in &report.skipped {
            tracing::warn!("'{}' has no shape key '{}'", object, name);
        }
    }

    let file_name = clip
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| clip_path.to_string());
    let (is_warning, message) = report.message(&file_name);
    if is_warning {
        tracing::warn!("{}", message);
    } else {
        tracing::info!("{}", message);
    }

    let output = match format {
        "json" => serde_json::to_string_pretty(&mix)?,
        _ => toml::to_string(&WeightsFile { weights: mix })?,
    };
    println!("{}", output);

    Ok(())
}
