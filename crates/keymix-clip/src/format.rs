//! Fixed layout of the engine's `.anim` asset
//!
//! Everything here except the clip name and curves is constant for the clips
//! this crate produces: a 60 Hz single-frame looping clip with zero bounds.

use crate::clip::{AnimationClip, Curve, Keyframe};
use keymix_yaml::{Mapping, Node};

/// Serialization header that precedes the document in every `.anim` file
pub const PREAMBLE: &str = "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n--- !u!74 &7400000\n";

/// Number of lines in [`PREAMBLE`]
pub const PREAMBLE_LINES: usize = 3;

pub const SAMPLE_RATE: i64 = 60;

/// One frame at [`SAMPLE_RATE`], as the engine stores it (f32 precision)
pub const STOP_TIME: f64 = 0.016666668;

pub const KEYFRAME_WEIGHT: f64 = 0.33333334;

/// Free tangents, broken
pub const TANGENT_MODE: i64 = 136;

/// Drop the preamble lines from raw file content.
///
/// Content shorter than the preamble yields an empty string.
pub fn strip_preamble(raw: &str) -> &str {
    let mut rest = raw;
    for _ in 0..PREAMBLE_LINES {
        match rest.find('\n') {
            Some(end) => rest = &rest[end + 1..],
            None => return "",
        }
    }
    rest
}

fn file_id() -> Mapping {
    Mapping::flow().with("fileID", 0)
}

fn zero_vector() -> Mapping {
    Mapping::flow().with("x", 0).with("y", 0).with("z", 0)
}

fn keyframe_node(keyframe: &Keyframe) -> Node {
    Mapping::new()
        .with("serializedVersion", 3)
        .with("time", number(keyframe.time))
        .with("value", number(keyframe.value))
        .with("inSlope", 0)
        .with("outSlope", 0)
        .with("tangentMode", TANGENT_MODE)
        .with("weightedMode", 0)
        .with("inWeight", KEYFRAME_WEIGHT)
        .with("outWeight", KEYFRAME_WEIGHT)
        .into()
}

/// Integral values are written as integers, matching the engine's output.
fn number(value: f64) -> Node {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Node::from(value as i64)
    } else {
        Node::from(value)
    }
}

pub(crate) fn curve_node(curve: &Curve) -> Node {
    let keyframes: Vec<Node> = curve.keyframes.iter().map(keyframe_node).collect();
    Mapping::new()
        .with(
            "curve",
            Mapping::new()
                .with("serializedVersion", 2)
                .with("m_Curve", keyframes)
                .with("m_PreInfinity", 2)
                .with("m_PostInfinity", 2)
                .with("m_RotationOrder", 4),
        )
        .with("attribute", curve.binding.attribute())
        .with("path", curve.path.as_str())
        .with("classID", curve.class_id.id())
        .with("script", file_id())
        .into()
}

fn clip_settings() -> Mapping {
    Mapping::new()
        .with("serializedVersion", 2)
        .with("m_AdditiveReferencePoseClip", file_id())
        .with("m_AdditiveReferencePoseTime", 0)
        .with("m_StartTime", 0)
        .with("m_StopTime", STOP_TIME)
        .with("m_OrientationOffsetY", 0)
        .with("m_Level", 0)
        .with("m_CycleOffset", 0)
        .with("m_HasAdditiveReferencePose", 0)
        .with("m_LoopTime", 1)
        .with("m_LoopBlend", 0)
        .with("m_LoopBlendOrientation", 0)
        .with("m_LoopBlendPositionY", 0)
        .with("m_LoopBlendPositionXZ", 0)
        .with("m_KeepOriginalOrientation", 0)
        .with("m_KeepOriginalPositionY", 1)
        .with("m_KeepOriginalPositionXZ", 0)
        .with("m_HeightFromFeet", 0)
        .with("m_Mirror", 0)
}

/// The whole document for a clip, preamble excluded
pub fn clip_document(clip: &AnimationClip) -> Node {
    let curves: Vec<Node> = clip.curves.iter().map(curve_node).collect();
    let empty = Vec::<Node>::new;

    let body = Mapping::new()
        .with("m_ObjectHideFlags", 0)
        .with("m_CorrespondingSourceObject", file_id())
        .with("m_PrefabInstance", file_id())
        .with("m_PrefabAsset", file_id())
        .with("m_Name", clip.name.as_str())
        .with("serializedVersion", 6)
        .with("m_Legacy", 0)
        .with("m_Compressed", 0)
        .with("m_UseHighQualityCurve", 1)
        .with("m_RotationCurves", empty())
        .with("m_CompressedRotationCurves", empty())
        .with("m_EulerCurves", empty())
        .with("m_PositionCurves", empty())
        .with("m_ScaleCurves", empty())
        .with("m_FloatCurves", curves.clone())
        .with("m_PPtrCurves", empty())
        .with("m_SampleRate", SAMPLE_RATE)
        .with("m_WrapMode", 0)
        .with(
            "m_Bounds",
            Mapping::new()
                .with("m_Center", zero_vector())
                .with("m_Extent", zero_vector()),
        )
        .with("m_AnimationClipSettings", clip_settings())
        .with("m_EditorCurves", curves)
        .with("m_EulerEditorCurves", empty())
        .with("m_HasGenericRootTransform", 0)
        .with("m_HasMotionFloatCurves", 0)
        .with("m_Events", empty());

    Mapping::new().with("AnimationClip", body).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_preamble() {
        let raw = format!("{}AnimationClip:\n  m_Name: x\n", PREAMBLE);
        assert_eq!(strip_preamble(&raw), "AnimationClip:\n  m_Name: x\n");
    }

    #[test]
    fn test_strip_short_content() {
        assert_eq!(strip_preamble("%YAML 1.1\n"), "");
        assert_eq!(strip_preamble(""), "");
    }

    #[test]
    fn test_strip_handles_crlf() {
        let raw = "%YAML 1.1\r\n%TAG !u! tag:unity3d.com,2011:\r\n--- !u!74 &7400000\r\nAnimationClip:\r\n";
        assert_eq!(strip_preamble(raw), "AnimationClip:\r\n");
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(number(100.0), Node::from(100));
        assert_eq!(number(0.5), Node::from(0.5));
    }

    #[test]
    fn test_document_key_order() {
        let doc = clip_document(&AnimationClip::new("Empty"));
        let body = doc.get("AnimationClip").and_then(Node::as_mapping).unwrap();
        let keys: Vec<&str> = body.iter().map(|(k, _)| k).collect();
        assert_eq!(keys[4], "m_Name");
        assert_eq!(keys.last(), Some(&"m_Events"));
        assert_eq!(body.get("m_SampleRate"), Some(&Node::from(60)));
    }
}
