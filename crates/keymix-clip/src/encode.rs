//! Clip encoding

use crate::clip::{AnimationClip, AttributeBinding, ClassId, Curve};
use crate::format::{clip_document, PREAMBLE};
use crate::mix::ShapeMix;

/// Full file text for a clip, preamble included
pub fn encode_clip(clip: &AnimationClip) -> String {
    let mut text = String::from(PREAMBLE);
    text.push_str(&keymix_yaml::to_string(&clip_document(clip)));
    text
}

/// Scaled weights are snapped to this many decimals before rounding, so
/// binary error in `weight * 100` cannot move a `.5` tie down.
const TIE_SNAP: f64 = 1e9;

/// Engine blend-shape weights are integers in 0..=100.
///
/// Rounds half away from zero at every hundredth-and-a-half, so `0.005`
/// becomes `1` and `0.145` becomes `15`. Weights outside `[0, 1]` are not
/// clamped.
pub fn blend_shape_value(weight: f64) -> i64 {
    let scaled = ((weight * 100.0) * TIE_SNAP).round() / TIE_SNAP;
    scaled.round() as i64
}

/// Clip setting each shape key of the object at `path` to its weight
pub fn encode_blend_shape_clip(name: &str, path: &str, weights: &ShapeMix) -> String {
    let curves = weights
        .iter()
        .map(|(key, weight)| {
            Curve::sample(
                path,
                ClassId::SkinnedMeshRenderer,
                AttributeBinding::blend_shape(key),
                blend_shape_value(weight) as f64,
            )
        })
        .collect();
    encode_clip(&AnimationClip {
        name: name.to_string(),
        curves,
    })
}

/// Clip setting every object in `paths` active or inactive
pub fn encode_toggle_clip<S: AsRef<str>>(name: &str, paths: &[S], is_active: bool) -> String {
    let value = if is_active { 1.0 } else { 0.0 };
    let curves = paths
        .iter()
        .map(|path| {
            Curve::sample(
                path.as_ref(),
                ClassId::GameObject,
                AttributeBinding::Toggle,
                value,
            )
        })
        .collect();
    encode_clip(&AnimationClip {
        name: name.to_string(),
        curves,
    })
}
