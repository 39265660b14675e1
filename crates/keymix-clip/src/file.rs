//! Reading and writing `.anim` files

use crate::clip::AnimationClip;
use crate::decode::{decode_clip, decode_shape_mix_file};
use crate::encode::encode_clip;
use crate::format::strip_preamble;
use crate::mix::ShapeMix;
use keymix_core::Result;
use std::fs;
use std::path::Path;

/// Clip name for a file path: its stem (`Smile.anim` -> `Smile`)
pub fn clip_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Write clip text produced by the encoder.
pub fn write_clip_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text)?;
    tracing::debug!("Wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}

/// Encode and write a clip.
pub fn save_clip(path: &Path, clip: &AnimationClip) -> Result<()> {
    write_clip_text(path, &encode_clip(clip))
}

/// Load a full clip from an `.anim` file.
pub fn load_clip(path: &Path) -> Result<AnimationClip> {
    let raw = fs::read_to_string(path)?;
    let clip = decode_clip(strip_preamble(&raw))?;
    tracing::debug!("Loaded clip '{}' with {} curve(s)", clip.name, clip.curves.len());
    Ok(clip)
}

/// Load the blend-shape weights an `.anim` file sets for `target_path`.
pub fn load_shape_mix(path: &Path, target_path: &str) -> Result<ShapeMix> {
    let raw = fs::read_to_string(path)?;
    let mix = decode_shape_mix_file(&raw, target_path)?;
    tracing::debug!(
        "{}: {} shape key weight(s) for '{}'",
        path.display(),
        mix.len(),
        target_path
    );
    Ok(mix)
}
