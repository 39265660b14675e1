//! Inspect command

use anyhow::{Context, Result};
use keymix_clip::file::load_clip;
use keymix_clip::{AttributeBinding, Curve};
use std::path::Path;

pub fn run(clip_path: &str) -> Result<()> {
    let clip = load_clip(Path::new(clip_path))
        .with_context(|| format!("Failed to read clip: {}", clip_path))?;

    println!("{} ({} curve(s))", clip.name, clip.curves.len());
    for curve in &clip.curves {
        println!("  {}", describe(curve));
    }

    Ok(())
}

fn describe(curve: &Curve) -> String {
    let binding = match &curve.binding {
        AttributeBinding::Toggle => "active".to_string(),
        AttributeBinding::BlendShape { key } => format!("blend shape '{}'", key),
        AttributeBinding::Unrecognized(raw) => format!("unrecognized '{}'", raw),
    };
    let value = curve
        .first_value()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} [class {}] {} = {}",
        curve.path,
        curve.class_id.id(),
        binding,
        value
    )
}
