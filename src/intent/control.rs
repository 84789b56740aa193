use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::{NamedLink, ReagentEntry};
use crate::units::Quantity;

/// One row of a control table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlIntent {
    pub control_type: Option<String>,
    pub strains: Vec<NamedLink>,
    pub channel: Option<String>,
    pub contents: Vec<ReagentEntry>,
    pub timepoints: Vec<Quantity>,
}

impl ControlIntent {
    pub fn is_empty(&self) -> bool {
        self.control_type
            .is_none()
            && self
                .strains
                .is_empty()
            && self
                .channel
                .is_none()
            && self
                .contents
                .is_empty()
            && self
                .timepoints
                .is_empty()
    }
}

impl Serialize for ControlIntent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(control_type) = &self.control_type {
            map.serialize_entry("type", control_type)?;
        }
        if !self
            .strains
            .is_empty()
        {
            let strains: Vec<&str> = self
                .strains
                .iter()
                .map(NamedLink::uri_or_label)
                .collect();
            map.serialize_entry("strains", &strains)?;
        }
        if let Some(channel) = &self.channel {
            map.serialize_entry("channel", channel)?;
        }
        if !self
            .contents
            .is_empty()
        {
            map.serialize_entry("contents", &self.contents)?;
        }
        if !self
            .timepoints
            .is_empty()
        {
            map.serialize_entry("timepoints", &self.timepoints)?;
        }
        map.end()
    }
}

/// Everything parsed from one control table, with the keys other tables use
/// to refer to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlTableIntent {
    /// Position of the table in the document.
    pub table: usize,
    pub caption: Option<u32>,
    pub bookmark_ids: Vec<String>,
    pub controls: Vec<ControlIntent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_fields_are_omitted() {
        let control = ControlIntent {
            control_type: Some("HIGH_FITC".to_string()),
            strains: vec![NamedLink::new("MG1655")],
            channel: None,
            contents: Vec::new(),
            timepoints: vec![Quantity::new(8.0, "hour")],
        };
        assert_eq!(
            serde_json::to_value(&control).unwrap(),
            json!({
                "type": "HIGH_FITC",
                "strains": ["MG1655"],
                "timepoints": [{"value": 8.0, "unit": "hour"}]
            })
        );
        assert!(!control.is_empty());
        assert!(ControlIntent::default().is_empty());
    }
}
