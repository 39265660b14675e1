//! Export commands

use super::{object_path, WeightsFile};
use anyhow::{Context, Result};
use keymix_clip::file::{clip_name_from_path, write_clip_text};
use keymix_clip::{encode_blend_shape_clip, ShapeMix, ToggleClipPair, EXPORT_MIN_WEIGHT};
use keymix_scene::load_scene;
use keymix_scene::shape_keys::export_mix;
use std::fs;
use std::path::Path;

pub struct ShapeArgs {
    pub scene: String,
    pub object: String,
    pub weights: Option<String>,
    pub output: String,
}

pub fn run_shapes(args: ShapeArgs) -> Result<()> {
    let (graph, description) = load_scene(&args.scene).context("Failed to load scene")?;
    let target = object_path(&graph, &args.object)?;

    let mix = match &args.weights {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read weights file: {}", path))?;
            let file: WeightsFile = toml::from_str(&content)
                .with_context(|| format!("Failed to parse weights file: {}", path))?;
            ShapeMix::from_weights(file.weights.iter(), EXPORT_MIN_WEIGHT)
        }
        None => {
            let object = description
                .object(&args.object)
                .with_context(|| format!("Object '{}' not found in scene", args.object))?;
            export_mix(&object.shape_keys)
        }
    };

    if mix.is_empty() {
        tracing::warn!(
            "No shape key of '{}' reaches {}; writing an empty clip",
            args.object,
            EXPORT_MIN_WEIGHT
        );
    }

    let output = Path::new(&args.output);
    let text = encode_blend_shape_clip(&clip_name_from_path(output), &target, &mix);
    write_clip_text(output, &text)
        .with_context(|| format!("Failed to write clip: {}", output.display()))?;

    tracing::info!(
        "Exported {} shape key weight(s) for '{}' to {}",
        mix.len(),
        target,
        output.display()
    );
    Ok(())
}

pub struct ToggleArgs {
    pub scene: String,
    pub objects: Vec<String>,
    pub dir: String,
    pub enable: Option<String>,
    pub disable: Option<String>,
}

pub fn run_toggles(args: ToggleArgs) -> Result<()> {
    let (graph, _) = load_scene(&args.scene).context("Failed to load scene")?;
    let paths = args
        .objects
        .iter()
        .map(|name| object_path(&graph, name))
        .collect::<Result<Vec<_>>>()?;

    let mut pair = ToggleClipPair::for_object(args.objects.first().map(String::as_str));
    if let Some(enable) = args.enable {
        pair.enable_file = enable;
    }
    if let Some(disable) = args.disable {
        pair.disable_file = disable;
    }

    let dir = Path::new(&args.dir);
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let (enable_text, disable_text) = pair.encode(&paths);
    for (file, text) in [(&pair.enable_file, enable_text), (&pair.disable_file, disable_text)] {
        let path = dir.join(file);
        write_clip_text(&path, &text)
            .with_context(|| format!("Failed to write clip: {}", path.display()))?;
    }

    tracing::info!(
        "Exported {} and {} for {} object(s)",
        pair.enable_file,
        pair.disable_file,
        paths.len()
    );
    Ok(())
}
