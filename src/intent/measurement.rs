use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::{ControlIntent, NamedLink, ReagentEntry};
use crate::units::Quantity;

/// A pointer from a measurement row to a control table, as written in the
/// row's control cell. Resolved once every table has been parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlReference {
    pub text: String,
    pub bookmark_ids: Vec<String>,
    pub captions: Vec<u32>,
}

/// One row of a measurement table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementIntent {
    pub measurement_type: Option<String>,
    pub file_types: Vec<String>,
    pub replicates: Option<i64>,
    pub strains: Vec<NamedLink>,
    pub ods: Vec<f64>,
    pub temperatures: Vec<Quantity>,
    pub timepoints: Vec<Quantity>,
    pub batches: Vec<i64>,
    pub controls: Vec<ControlIntent>,
    pub contents: Vec<ReagentEntry>,
    pub control_reference: Option<ControlReference>,
    /// Row of the table this measurement was read from.
    pub row: usize,
}

impl MeasurementIntent {
    pub fn is_empty(&self) -> bool {
        self.measurement_type
            .is_none()
            && self
                .file_types
                .is_empty()
            && self
                .replicates
                .is_none()
            && self
                .strains
                .is_empty()
            && self
                .ods
                .is_empty()
            && self
                .temperatures
                .is_empty()
            && self
                .timepoints
                .is_empty()
            && self
                .batches
                .is_empty()
            && self
                .contents
                .is_empty()
            && self
                .control_reference
                .is_none()
    }
}

impl Serialize for MeasurementIntent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(measurement_type) = &self.measurement_type {
            map.serialize_entry("measurement_type", measurement_type)?;
        }
        if !self
            .file_types
            .is_empty()
        {
            map.serialize_entry("file_type", &self.file_types)?;
        }
        if let Some(replicates) = self.replicates {
            map.serialize_entry("replicates", &replicates)?;
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
        if !self
            .ods
            .is_empty()
        {
            map.serialize_entry("ods", &self.ods)?;
        }
        if !self
            .temperatures
            .is_empty()
        {
            map.serialize_entry("temperatures", &self.temperatures)?;
        }
        if !self
            .timepoints
            .is_empty()
        {
            map.serialize_entry("timepoints", &self.timepoints)?;
        }
        if !self
            .batches
            .is_empty()
        {
            map.serialize_entry("batch", &self.batches)?;
        }
        if !self
            .controls
            .is_empty()
        {
            map.serialize_entry("controls", &self.controls)?;
        }
        if !self
            .contents
            .is_empty()
        {
            // one group of contents per measurement
            map.serialize_entry("contents", &[&self.contents])?;
        }
        map.end()
    }
}

/// Everything parsed from one measurement table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementTableIntent {
    /// Position of the table in the document.
    pub table: usize,
    pub caption: Option<u32>,
    pub measurements: Vec<MeasurementIntent>,
}
