use chrono::NaiveDateTime;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

use super::UNKNOWN;

/// Experiment ids, each mapped to the caption of the status table that
/// tracks it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperimentSpecification {
    pub table: usize,
    pub caption: Option<u32>,
    pub experiments: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatusState {
    Flag(bool),
    Name(String),
}

/// One stage of the data processing pipeline for an experiment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperimentStatus {
    pub status_type: Option<String>,
    pub last_updated: Option<NaiveDateTime>,
    pub state: Option<StatusState>,
    pub path: Option<String>,
}

impl ExperimentStatus {
    pub fn is_empty(&self) -> bool {
        self.status_type
            .is_none()
            && self
                .last_updated
                .is_none()
            && self
                .state
                .is_none()
            && self
                .path
                .is_none()
    }
}

impl Serialize for ExperimentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(
            "status_type",
            self.status_type
                .as_deref()
                .unwrap_or(UNKNOWN),
        )?;
        if let Some(last_updated) = &self.last_updated {
            map.serialize_entry("last_updated", last_updated)?;
        }
        if let Some(state) = &self.state {
            map.serialize_entry("state", state)?;
        }
        if let Some(path) = &self.path {
            map.serialize_entry("path", path)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperimentStatusTable {
    pub table: usize,
    pub caption: Option<u32>,
    pub statuses: Vec<ExperimentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn status_projection() {
        let status = ExperimentStatus {
            status_type: None,
            last_updated: NaiveDate::from_ymd_opt(2020, 6, 30)
                .and_then(|date| date.and_hms_opt(21, 12, 31)),
            state: Some(StatusState::Flag(true)),
            path: Some("agave://data-sd2e-community/path".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({
                "status_type": "Unknown",
                "last_updated": "2020-06-30T21:12:31",
                "state": true,
                "path": "agave://data-sd2e-community/path"
            })
        );
    }
}
