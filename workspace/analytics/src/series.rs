//! Ordered label → value series.
//!
//! The server emits every series as a JSON object whose key order carries
//! meaning (the daily trend is already chronological). `Series` keeps that
//! order exactly as it arrives instead of collecting into a hash or sorted map.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named, ordered mapping from label to value forming one chart's input.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<V> {
    points: Vec<(String, V)>,
}

impl<V> Default for Series<V> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<V> Series<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a point. A repeated label overwrites the value in place and
    /// keeps the label's original position.
    pub fn insert(&mut self, label: impl Into<String>, value: V) {
        let label = label.into();
        match self.points.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.points.push((label, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.points.iter().map(|(_, value)| value).collect()
    }

    pub fn get(&self, label: &str) -> Option<&V> {
        self.points
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value)
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Series<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut series = Series::new();
        for (label, value) in iter {
            series.insert(label, value);
        }
        series
    }
}

impl<V: Serialize> Serialize for Series<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.points.len()))?;
        for (label, value) in &self.points {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

struct SeriesVisitor<V> {
    marker: PhantomData<V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for SeriesVisitor<V> {
    type Value = Series<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping labels to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut series = Series {
            points: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((label, value)) = access.next_entry::<String, V>()? {
            series.insert(label, value);
        }
        Ok(series)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Series<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SeriesVisitor {
            marker: PhantomData,
        })
    }
}
