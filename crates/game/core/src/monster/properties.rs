use std::collections::BTreeMap;

use crate::geometry::Direction;

/// A single spawn property value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Key/value properties attached to one placement of a monster in a room.
///
/// Read exactly once, when the monster is initialized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpawnProperties {
    values: BTreeMap<String, PropertyValue>,
}

impl SpawnProperties {
    pub const VARIANT: &'static str = "variant";
    pub const DIRECTION: &'static str = "direction";

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(PropertyValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(PropertyValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(PropertyValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Color or behavior variant tag, e.g. `"red"`.
    pub fn variant(&self) -> Option<&str> {
        self.get_text(Self::VARIANT)
    }

    /// Initial facing. Unparseable values are ignored.
    pub fn direction(&self) -> Option<Direction> {
        self.get_text(Self::DIRECTION)?.parse().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
