//! Shape-key utilities: export selection, applying a decoded mix, and
//! finding keys that do not deform anything

use keymix_clip::{ShapeMix, EXPORT_MIN_WEIGHT};
use keymix_core::Vec3;
use serde::{Deserialize, Serialize};

/// Keys whose every vertex stays within this distance of the relative key
/// count as empty.
pub const EMPTY_SHAPE_KEY_THRESHOLD: f32 = 0.0001;

/// Current weight of one shape key on a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeKeyWeight {
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

impl ShapeKeyWeight {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The mix an export should write: every key weighted at least
/// [`EXPORT_MIN_WEIGHT`], in key order.
pub fn export_mix(keys: &[ShapeKeyWeight]) -> ShapeMix {
    ShapeMix::from_weights(
        keys.iter().map(|k| (k.name.as_str(), k.value)),
        EXPORT_MIN_WEIGHT,
    )
}

/// How a decoded mix is applied to a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Zero every key the mix does not set
    pub clear: bool,
    /// Release the "show only active shape key" pin
    pub unpin_active: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            clear: true,
            unpin_active: true,
        }
    }
}

/// Outcome of [`apply_shape_mix`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplyReport {
    /// Entries in the mix
    pub loaded: usize,
    /// Entries that matched a key on the mesh
    pub applied: usize,
    /// Mix entries with no key of that name
    pub skipped: Vec<String>,
    pub unpin_active: bool,
}

impl ApplyReport {
    /// Status line for the user. Returns `(is_warning, text)`.
    pub fn message(&self, source: &str) -> (bool, String) {
        if self.loaded > 0 {
            (
                false,
                format!("{}: loaded {} shape key weight(s)", source, self.loaded),
            )
        } else {
            (true, format!("{}: no applicable shape keys found", source))
        }
    }
}

/// Set mesh shape-key weights from a mix. Names the mesh lacks are skipped.
pub fn apply_shape_mix(
    keys: &mut [ShapeKeyWeight],
    mix: &ShapeMix,
    options: ApplyOptions,
) -> ApplyReport {
    if options.clear {
        for key in keys.iter_mut() {
            key.value = 0.0;
        }
    }

    let mut report = ApplyReport {
        loaded: mix.len(),
        unpin_active: options.unpin_active,
        ..ApplyReport::default()
    };
    for (name, weight) in mix.iter() {
        match keys.iter_mut().find(|k| k.name == name) {
            Some(key) => {
                key.value = weight;
                report.applied += 1;
            }
            None => report.skipped.push(name.to_string()),
        }
    }
    report
}

/// Vertex positions of one shape key
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeKeyData {
    pub name: String,
    /// Key this one is relative to; the basis is relative to itself
    pub relative_key: String,
    pub muted: bool,
    pub coords: Vec<Vec3>,
}

/// Names of keys that move no vertex further than `threshold` (per axis)
/// from their relative key.
///
/// Basis keys are never reported; muted keys only with `include_muted`.
pub fn find_empty_shape_keys(
    keys: &[ShapeKeyData],
    threshold: f32,
    include_muted: bool,
) -> Vec<String> {
    keys.iter()
        .filter(|key| key.name != key.relative_key)
        .filter(|key| include_muted || !key.muted)
        .filter(|key| {
            let Some(relative) = keys.iter().find(|k| k.name == key.relative_key) else {
                return false;
            };
            key.coords.len() == relative.coords.len()
                && key
                    .coords
                    .iter()
                    .zip(&relative.coords)
                    .all(|(co, rel)| (*co - *rel).max_abs() < threshold)
        })
        .map(|key| key.name.clone())
        .collect()
}
