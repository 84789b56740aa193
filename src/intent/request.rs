use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

use super::{ExperimentStatus, LabIntent, MeasurementIntent, ParameterIntent, ParameterValue};
use super::{UNDEFINED, UNKNOWN};

/// The measurements of one measurement table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Run {
    pub measurements: Vec<MeasurementIntent>,
}

/// The structured request for a whole document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub name: String,
    pub challenge_problem: Option<String>,
    pub experiment_reference: Option<String>,
    pub experiment_reference_url: String,
    pub experiment_version: u32,
    pub lab: LabIntent,
    pub runs: Vec<Run>,
    pub parameters: Option<ParameterIntent>,
    pub doc_revision_id: String,
}

impl Serialize for Request {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry(
            "challenge_problem",
            self.challenge_problem
                .as_deref()
                .unwrap_or(UNDEFINED),
        )?;
        map.serialize_entry(
            "experiment_reference",
            self.experiment_reference
                .as_deref()
                .unwrap_or(UNKNOWN),
        )?;
        map.serialize_entry("experiment_reference_url", &self.experiment_reference_url)?;
        map.serialize_entry("experiment_version", &self.experiment_version)?;
        map.serialize_entry(
            "experiment_id",
            &self
                .lab
                .qualified_experiment_id(),
        )?;
        map.serialize_entry("lab", self.lab.lab())?;
        map.serialize_entry("runs", &self.runs)?;
        if let Some(parameters) = &self.parameters {
            map.serialize_entry("parameters", &[&parameters.default_parameters])?;
        }
        map.serialize_entry("doc_revision_id", &self.doc_revision_id)?;
        map.end()
    }
}

/// What is needed to submit the experiment to a lab's execution system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentRunRequest {
    pub xplan_base_dir: Option<String>,
    pub xplan_reactor: String,
    pub plate_size: Option<i64>,
    pub protocol: Option<String>,
    pub plate_number: Option<i64>,
    pub container_search_string: Vec<String>,
    pub strain_property: Option<String>,
    pub xplan_path: Option<String>,
    pub submit: bool,
    pub protocol_id: Option<String>,
    pub test_mode: bool,
    pub experiment_reference_url_for_xplan: Option<String>,
    pub default_parameters: BTreeMap<String, ParameterValue>,
}

impl ExperimentRunRequest {
    pub fn new(parameters: &ParameterIntent) -> ExperimentRunRequest {
        ExperimentRunRequest {
            xplan_base_dir: parameters
                .xplan_base_dir
                .clone(),
            xplan_reactor: parameters
                .xplan_reactor
                .clone()
                .unwrap_or_else(|| "xplan".to_string()),
            plate_size: parameters.plate_size,
            protocol: parameters
                .protocol
                .clone(),
            plate_number: parameters.plate_number,
            container_search_string: parameters
                .container_search_strings
                .clone(),
            strain_property: parameters
                .strain_property
                .clone(),
            xplan_path: parameters
                .xplan_path
                .clone(),
            submit: parameters
                .submit
                .unwrap_or(true),
            protocol_id: parameters
                .protocol_id
                .clone(),
            test_mode: parameters
                .test_mode
                .unwrap_or(false),
            experiment_reference_url_for_xplan: parameters
                .experiment_reference_url_for_xplan
                .clone(),
            default_parameters: parameters
                .default_parameters
                .clone(),
        }
    }

    /// Names of the settings that have no value.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut result = Vec::new();
        if self
            .xplan_base_dir
            .is_none()
        {
            result.push("xplan_base_dir");
        }
        if self
            .plate_size
            .is_none()
        {
            result.push("plate_size");
        }
        if self
            .protocol
            .is_none()
        {
            result.push("protocol");
        }
        if self
            .plate_number
            .is_none()
        {
            result.push("plate_number");
        }
        if self
            .container_search_string
            .is_empty()
        {
            result.push("container_search_string");
        }
        if self
            .strain_property
            .is_none()
        {
            result.push("strain_property");
        }
        if self
            .xplan_path
            .is_none()
        {
            result.push("xplan_path");
        }
        if self
            .protocol_id
            .is_none()
        {
            result.push("protocol_id");
        }
        if self
            .experiment_reference_url_for_xplan
            .is_none()
        {
            result.push("experiment_reference_url_for_xplan");
        }
        result
    }
}

/// Where each experiment of a document stands in the data pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperimentStatusRequest {
    pub lab: String,
    pub experiment_id: BTreeMap<String, u32>,
    pub status_element: BTreeMap<u32, Vec<ExperimentStatus>>,
}
