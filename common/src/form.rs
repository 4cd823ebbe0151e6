//! Form snapshot
//!
//! Immutable copy of the form taken when a report is generated. Holds every
//! declared field in entry order; values are trimmed, never parsed.

use crate::error::{Error, Result};
use crate::fields::{self, FieldDefinition, FIELDS};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    entries: Vec<(&'static FieldDefinition, String)>,
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl FormSnapshot {
    /// All declared fields, empty
    pub fn empty() -> Self {
        Self {
            entries: FIELDS.iter().map(|field| (field, String::new())).collect(),
        }
    }

    /// Build from `(name, value)` pairs; missing fields stay empty.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut snapshot = Self::empty();
        for (name, value) in pairs {
            snapshot.set(name.as_ref(), value.as_ref())?;
        }
        Ok(snapshot)
    }

    /// Set one field. The value is trimmed.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let slot = self
            .entries
            .iter_mut()
            .find(|(field, _)| field.name == name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;
        slot.1 = value.trim().to_string();
        Ok(())
    }

    /// Value of a field; undeclared names read as empty.
    pub fn get(&self, name: &str) -> &str {
        self.entries
            .iter()
            .find(|(field, _)| field.name == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn station_name(&self) -> &str {
        self.get(fields::STATION_NAME)
    }

    pub fn station_number(&self) -> &str {
        self.get(fields::STATION_NUMBER)
    }

    pub fn date_inspected(&self) -> &str {
        self.get(fields::DATE_INSPECTED)
    }

    /// `(definition, value)` in entry order
    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldDefinition, &str)> + '_ {
        self.entries.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a form file body
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        Ok(snapshot)
    }

    /// Blank form as pretty JSON, used as a fill-in template
    pub fn template_json() -> Result<String> {
        Ok(serde_json::to_string_pretty(&Self::empty())?)
    }
}

impl Serialize for FormSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw: HashMap<String, String> = HashMap::deserialize(deserializer)?;
        FormSnapshot::from_pairs(raw).map_err(serde::de::Error::custom)
    }
}
