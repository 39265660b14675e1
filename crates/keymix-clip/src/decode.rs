//! Clip decoding

use crate::clip::{AnimationClip, AttributeBinding, ClassId, Curve, Keyframe};
use crate::format::strip_preamble;
use crate::mix::ShapeMix;
use keymix_core::{KeymixError, Result};
use keymix_yaml::{Mapping, Node};

/// Parse clip text (preamble already removed) into its name and float curves.
pub fn decode_clip(text: &str) -> Result<AnimationClip> {
    let document = keymix_yaml::from_str(text)?;
    AnimationClip::from_node(&document)
}

/// Blend-shape weights the clip sets on the object at `target_path`.
///
/// Each matching curve contributes its first keyframe divided by 100. Curves
/// for other paths, other attributes or without keyframes are skipped, so an
/// empty mix is a normal result. Only the first keyframe of a matching curve
/// is read. Input is expected without the preamble.
pub fn decode_shape_mix(text: &str, target_path: &str) -> Result<ShapeMix> {
    let document = keymix_yaml::from_str(text)?;
    let mut mix = ShapeMix::new();
    for (i, node) in float_curves(&document)?.iter().enumerate() {
        let entry = CurveEntry::read(node, format!("m_FloatCurves[{}]", i))?;
        let AttributeBinding::BlendShape { key } = AttributeBinding::parse(&entry.attribute)
        else {
            continue;
        };
        if entry.path != target_path {
            continue;
        }
        let Some(first) = entry.frames.first() else {
            continue;
        };
        let context = entry.frames_context();
        let frame = mapping(first, &context)?;
        let value = number(field(frame, "value", &context)?, &context)?;
        mix.insert(key, value / 100.0);
    }
    Ok(mix)
}

/// [`decode_shape_mix`] for raw file content that still carries the preamble
pub fn decode_shape_mix_file(raw: &str, target_path: &str) -> Result<ShapeMix> {
    decode_shape_mix(strip_preamble(raw), target_path)
}

fn field<'a>(mapping: &'a Mapping, key: &str, context: &str) -> Result<&'a Node> {
    mapping
        .get(key)
        .ok_or_else(|| KeymixError::MissingField(format!("{}.{}", context, key)))
}

fn mapping<'a>(node: &'a Node, context: &str) -> Result<&'a Mapping> {
    node.as_mapping()
        .ok_or_else(|| KeymixError::MissingField(format!("{} (expected a mapping)", context)))
}

fn sequence<'a>(node: &'a Node, context: &str) -> Result<&'a [Node]> {
    node.as_sequence()
        .ok_or_else(|| KeymixError::MissingField(format!("{} (expected a sequence)", context)))
}

fn text(node: &Node, context: &str) -> Result<String> {
    node.as_scalar()
        .map(|s| s.to_text())
        .ok_or_else(|| KeymixError::MissingField(format!("{} (expected a scalar)", context)))
}

fn number(node: &Node, context: &str) -> Result<f64> {
    node.as_f64()
        .ok_or_else(|| KeymixError::MissingField(format!("{} (expected a number)", context)))
}

fn float_curves(document: &Node) -> Result<&[Node]> {
    let root = mapping(document, "document")?;
    let body = mapping(field(root, "AnimationClip", "document")?, "AnimationClip")?;
    sequence(
        field(body, "m_FloatCurves", "AnimationClip")?,
        "AnimationClip.m_FloatCurves",
    )
}

/// The fields every float curve must carry
struct CurveEntry<'a> {
    context: String,
    entry: &'a Mapping,
    attribute: String,
    path: String,
    frames: &'a [Node],
}

impl<'a> CurveEntry<'a> {
    fn read(node: &'a Node, context: String) -> Result<Self> {
        let entry = mapping(node, &context)?;
        let attribute = text(field(entry, "attribute", &context)?, &context)?;
        let path = text(field(entry, "path", &context)?, &context)?;
        let curve_context = format!("{}.curve", context);
        let body = mapping(field(entry, "curve", &context)?, &curve_context)?;
        let frames = sequence(field(body, "m_Curve", &curve_context)?, &curve_context)?;
        Ok(Self {
            context,
            entry,
            attribute,
            path,
            frames,
        })
    }

    fn frames_context(&self) -> String {
        format!("{}.curve.m_Curve", self.context)
    }
}

impl AnimationClip {
    /// Read a clip from a parsed document rooted at `AnimationClip`.
    pub fn from_node(document: &Node) -> Result<Self> {
        let root = mapping(document, "document")?;
        let body = mapping(field(root, "AnimationClip", "document")?, "AnimationClip")?;

        let name = match body.get("m_Name") {
            Some(node) => text(node, "AnimationClip.m_Name")?,
            None => String::new(),
        };

        let curves = float_curves(document)?
            .iter()
            .enumerate()
            .map(|(i, node)| Curve::from_node(node, format!("m_FloatCurves[{}]", i)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { name, curves })
    }
}

impl Curve {
    /// A missing `classID` reads as `ClassId::Other(0)`.
    fn from_node(node: &Node, context: String) -> Result<Self> {
        let entry = CurveEntry::read(node, context)?;
        let class_id = match entry.entry.get("classID") {
            Some(id) => id
                .as_scalar()
                .and_then(|s| s.as_i64())
                .map(ClassId::from_id)
                .ok_or_else(|| {
                    KeymixError::MissingField(format!(
                        "{}.classID (expected an integer)",
                        entry.context
                    ))
                })?,
            None => ClassId::Other(0),
        };

        let frames_context = entry.frames_context();
        let keyframes = entry
            .frames
            .iter()
            .map(|frame| Keyframe::from_node(frame, &frames_context))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            path: entry.path,
            class_id,
            binding: AttributeBinding::parse(&entry.attribute),
            keyframes,
        })
    }
}

impl Keyframe {
    fn from_node(node: &Node, context: &str) -> Result<Self> {
        let frame = mapping(node, context)?;
        let value = number(field(frame, "value", context)?, context)?;
        let time = match frame.get("time") {
            Some(time) => number(time, context)?,
            None => 0.0,
        };
        Ok(Self { time, value })
    }
}
