use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

use super::NO_PROGRAM_DICTIONARY_ENTRY;
use crate::units::Quantity;

/// A term from a document together with the URI it was hyperlinked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLink {
    pub label: String,
    pub uri: Option<String>,
}

impl NamedLink {
    pub fn new(label: impl Into<String>) -> NamedLink {
        NamedLink {
            label: label.into(),
            uri: None,
        }
    }

    pub fn with_uri(label: impl Into<String>, uri: impl Into<String>) -> NamedLink {
        NamedLink {
            label: label.into(),
            uri: Some(uri.into()),
        }
    }

    /// Name a term, attaching the URL its text was linked to in the cell.
    pub fn lookup(label: &str, links: &BTreeMap<String, String>) -> NamedLink {
        let label = label.trim();
        NamedLink {
            label: label.to_string(),
            uri: links
                .get(label)
                .filter(|uri| !uri.is_empty())
                .cloned(),
        }
    }

    /// The URI if there is one, otherwise the label.
    pub fn uri_or_label(&self) -> &str {
        self.uri
            .as_deref()
            .unwrap_or(&self.label)
    }
}

impl Serialize for NamedLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("label", &self.label)?;
        map.serialize_entry(
            "sbh_uri",
            self.uri
                .as_deref()
                .unwrap_or(NO_PROGRAM_DICTIONARY_ENTRY),
        )?;
        map.end()
    }
}

/// What a contents entry holds for its reagent.
#[derive(Debug, Clone, PartialEq)]
pub enum ReagentValue {
    Amount(Quantity),
    Named(NamedLink),
    Integer(i64),
    Text(String),
    Flag(bool),
}

/// One entry in the contents of a measurement or control: a reagent or
/// media, an optional value, and the time it was added if known.
#[derive(Debug, Clone, PartialEq)]
pub struct ReagentEntry {
    pub name: NamedLink,
    pub value: Option<ReagentValue>,
    pub timepoint: Option<Quantity>,
}

impl ReagentEntry {
    pub fn new(name: NamedLink, value: Option<ReagentValue>) -> ReagentEntry {
        ReagentEntry {
            name,
            value,
            timepoint: None,
        }
    }

    pub fn at(mut self, timepoint: Option<Quantity>) -> ReagentEntry {
        self.timepoint = timepoint;
        self
    }
}

impl Serialize for ReagentEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        match &self.value {
            Some(ReagentValue::Amount(quantity)) => {
                map.serialize_entry("value", &quantity.value)?;
                map.serialize_entry("unit", &quantity.unit)?;
            }
            Some(ReagentValue::Named(media)) => map.serialize_entry("value", &media.label)?,
            Some(ReagentValue::Integer(value)) => map.serialize_entry("value", value)?,
            Some(ReagentValue::Text(text)) => map.serialize_entry("value", text)?,
            Some(ReagentValue::Flag(flag)) => map.serialize_entry("value", flag)?,
            None => {}
        }
        if let Some(timepoint) = &self.timepoint {
            map.serialize_entry("timepoint", timepoint)?;
        }
        map.end()
    }
}
