//! Clip data types

use serde::Serialize;

/// Engine component class a curve animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassId {
    /// The object itself (`m_IsActive`)
    GameObject,
    /// Skinned mesh renderer (`blendShape.*`)
    SkinnedMeshRenderer,
    /// Any other class found in a parsed clip
    Other(i64),
}

impl ClassId {
    pub fn id(self) -> i64 {
        match self {
            ClassId::GameObject => 1,
            ClassId::SkinnedMeshRenderer => 137,
            ClassId::Other(id) => id,
        }
    }

    pub fn from_id(id: i64) -> Self {
        match id {
            1 => ClassId::GameObject,
            137 => ClassId::SkinnedMeshRenderer,
            other => ClassId::Other(other),
        }
    }
}

/// What a curve's `attribute` string drives, resolved once per curve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttributeBinding {
    /// `m_IsActive`
    Toggle,
    /// `blendShape.<key>`
    BlendShape { key: String },
    /// Anything else, kept verbatim
    Unrecognized(String),
}

impl AttributeBinding {
    pub const TOGGLE_ATTRIBUTE: &'static str = "m_IsActive";
    pub const BLEND_SHAPE_PREFIX: &'static str = "blendShape";

    /// Blend-shape bindings are exactly two dot-separated parts; a key that
    /// itself contains a dot does not bind.
    pub fn parse(attribute: &str) -> Self {
        if attribute == Self::TOGGLE_ATTRIBUTE {
            return AttributeBinding::Toggle;
        }
        let mut parts = attribute.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("blendShape"), Some(key), None) => AttributeBinding::BlendShape {
                key: key.to_string(),
            },
            _ => AttributeBinding::Unrecognized(attribute.to_string()),
        }
    }

    pub fn blend_shape(key: impl Into<String>) -> Self {
        AttributeBinding::BlendShape { key: key.into() }
    }

    pub fn attribute(&self) -> String {
        match self {
            AttributeBinding::Toggle => Self::TOGGLE_ATTRIBUTE.to_string(),
            AttributeBinding::BlendShape { key } => {
                format!("{}.{}", Self::BLEND_SHAPE_PREFIX, key)
            }
            AttributeBinding::Unrecognized(raw) => raw.clone(),
        }
    }
}

/// A keyframe: a value at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
}

/// One float curve of a clip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    /// Slash-delimited object path
    pub path: String,
    pub class_id: ClassId,
    pub binding: AttributeBinding,
    pub keyframes: Vec<Keyframe>,
}

impl Curve {
    /// A curve holding a single sample at time zero
    pub fn sample(
        path: impl Into<String>,
        class_id: ClassId,
        binding: AttributeBinding,
        value: f64,
    ) -> Self {
        Self {
            path: path.into(),
            class_id,
            binding,
            keyframes: vec![Keyframe { time: 0.0, value }],
        }
    }

    /// Value of the first keyframe
    pub fn first_value(&self) -> Option<f64> {
        self.keyframes.first().map(|k| k.value)
    }
}

/// A named, ordered set of curves
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationClip {
    pub name: String,
    pub curves: Vec<Curve>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            curves: Vec::new(),
        }
    }

    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curves.push(curve);
        self
    }
}
