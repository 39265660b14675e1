//! Shape-key weight mixes

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Weights below this are left out of exported clips
pub const EXPORT_MIN_WEIGHT: f64 = 0.01;

/// Shape-key name to normalized weight, in insertion order, names unique
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeMix {
    entries: Vec<(String, f64)>,
}

impl ShapeMix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the weights an export should carry: those at or above `min_weight`.
    pub fn from_weights<I, S>(weights: I, min_weight: f64) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        weights
            .into_iter()
            .filter(|(_, weight)| *weight >= min_weight)
            .collect()
    }

    /// Set a weight. An existing name keeps its position and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, weight: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = weight,
            None => self.entries.push((name, weight)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| *w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, w)| (n.as_str(), *w))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ShapeMix {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut mix = ShapeMix::new();
        for (name, weight) in iter {
            mix.insert(name, weight);
        }
        mix
    }
}

impl Serialize for ShapeMix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, weight) in &self.entries {
            map.serialize_entry(name, weight)?;
        }
        map.end()
    }
}

struct ShapeMixVisitor;

impl<'de> Visitor<'de> for ShapeMixVisitor {
    type Value = ShapeMix;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a table of shape-key weights")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ShapeMix, A::Error> {
        let mut mix = ShapeMix::new();
        while let Some((name, weight)) = access.next_entry::<String, f64>()? {
            mix.insert(name, weight);
        }
        Ok(mix)
    }
}

impl<'de> Deserialize<'de> for ShapeMix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ShapeMixVisitor)
    }
}
