//! The protocol interface document: the experiment expressed as a protocol,
//! its parameters and their values, the measurements to take, and the
//! control samples, in the vocabulary of the Open Protocol Interface
//! Language.

use serde::Serialize;
use serde_json::Value;

use super::{ControlTableIntent, ParameterIntent, ParameterValue, Request};
use crate::diagnostics::IntentParserError;
use crate::units::Quantity;

const STRATEOS_NAMESPACE: &str = "http://strateos.com/";
const AQUARIUM_NAMESPACE: &str = "http://aquarium.bio/";
const SD2E_NAMESPACE: &str = "http://sd2e.org#";

/// The namespace identities are minted in, which depends on the lab that
/// runs the protocol.
pub fn namespace(lab: &str) -> &'static str {
    match lab {
        "Transcriptic" | "Strateos" => STRATEOS_NAMESPACE,
        "Duke_Haase" => AQUARIUM_NAMESPACE,
        _ => SD2E_NAMESPACE,
    }
}

/// Mints identities in one namespace, numbered in order of creation.
struct Identities {
    namespace: &'static str,
    count: usize,
}

impl Identities {
    fn next(&mut self, kind: &str) -> String {
        self.count += 1;
        format!("{}{}{}", self.namespace, kind, self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolParameter {
    pub identity: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpilMeasurement {
    pub identity: String,
    pub instance_of: Option<String>,
    pub time: Vec<Quantity>,
    pub temperature: Vec<Quantity>,
    pub replicates: Option<i64>,
    pub strains: Vec<String>,
    pub file_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSet {
    pub identity: String,
    pub control_type: Option<String>,
    pub strains: Vec<String>,
    pub channel: Option<String>,
    pub timepoints: Vec<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentalRequest {
    pub identity: String,
    pub name: String,
    pub experiment_id: String,
    pub experiment_reference: Option<String>,
    pub experiment_reference_url: String,
    pub measurements: Vec<OpilMeasurement>,
    pub sample_sets: Vec<SampleSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolInterface {
    pub namespace: String,
    pub protocol_name: String,
    pub measurement_types: Vec<String>,
    pub parameters: Vec<ProtocolParameter>,
    pub experimental_request: ExperimentalRequest,
}

fn protocol_parameters(parameters: &ParameterIntent, identities: &mut Identities) -> Vec<ProtocolParameter> {
    let mut result = Vec::new();
    let mut add = |name: &str, kind: &'static str, value: Value| {
        result.push(ProtocolParameter {
            identity: identities.next("parameter"),
            name: name.to_string(),
            kind,
            value,
        });
    };

    if let Some(value) = &parameters.xplan_base_dir {
        add("xplan_base_dir", "string", Value::from(value.as_str()));
    }
    add(
        "xplan_reactor",
        "string",
        Value::from(
            parameters
                .xplan_reactor
                .as_deref()
                .unwrap_or("xplan"),
        ),
    );
    if let Some(value) = parameters.plate_size {
        add("plate_size", "integer", Value::from(value));
    }
    if let Some(value) = &parameters.protocol {
        add("protocol", "string", Value::from(value.as_str()));
    }
    if let Some(value) = parameters.plate_number {
        add("plate_number", "integer", Value::from(value));
    }
    for (i, value) in parameters
        .container_search_strings
        .iter()
        .enumerate()
    {
        add(
            &format!("container_search_string.{}", i),
            "string",
            Value::from(value.as_str()),
        );
    }
    if let Some(value) = &parameters.strain_property {
        add("strain_property", "string", Value::from(value.as_str()));
    }
    if let Some(value) = &parameters.xplan_path {
        add("xplan_path", "string", Value::from(value.as_str()));
    }
    add(
        "submit",
        "boolean",
        Value::from(
            parameters
                .submit
                .unwrap_or(true),
        ),
    );
    if let Some(value) = &parameters.protocol_id {
        add("protocol_id", "string", Value::from(value.as_str()));
    }
    add(
        "test_mode",
        "boolean",
        Value::from(
            parameters
                .test_mode
                .unwrap_or(false),
        ),
    );
    if let Some(value) = &parameters.experiment_reference_url_for_xplan {
        add(
            "experiment_reference_url_for_xplan",
            "string",
            Value::from(value.as_str()),
        );
    }

    for (field, value) in &parameters.default_parameters {
        let (kind, value) = match value {
            ParameterValue::Boolean(flag) => ("boolean", Value::from(*flag)),
            ParameterValue::Float(number) => ("float", Value::from(*number)),
            ParameterValue::Json(json) => ("json", json.clone()),
            ParameterValue::Text(text) => ("string", Value::from(text.as_str())),
        };
        add(field, kind, value);
    }

    result
}

impl ProtocolInterface {
    /// Express an assembled request as a protocol interface. A protocol
    /// interface needs the protocol's name, which the parameter table
    /// supplies.
    pub fn build(request: &Request, controls: &[ControlTableIntent]) -> Result<ProtocolInterface, IntentParserError> {
        let parameters = request
            .parameters
            .as_ref()
            .ok_or_else(|| {
                IntentParserError::Generic(
                    "Unable to generate opil: No parameter table to parse from document.".to_string(),
                )
            })?;

        let protocol_name = parameters
            .protocol
            .clone()
            .ok_or_else(|| {
                IntentParserError::Generic(
                    "Name of lab must be provided for describing a protocol: the protocol parameter is missing a value".to_string(),
                )
            })?;

        let namespace = namespace(request.lab.lab());
        let mut identities = Identities {
            namespace,
            count: 0,
        };

        let parameters = protocol_parameters(parameters, &mut identities);

        let mut measurement_types: Vec<String> = Vec::new();
        let mut measurements = Vec::new();
        for run in &request.runs {
            for measurement in &run.measurements {
                if let Some(measurement_type) = &measurement.measurement_type {
                    if !measurement_types.contains(measurement_type) {
                        measurement_types.push(measurement_type.clone());
                    }
                }
                measurements.push(OpilMeasurement {
                    identity: identities.next("measurement"),
                    instance_of: measurement
                        .measurement_type
                        .clone(),
                    time: measurement
                        .timepoints
                        .clone(),
                    temperature: measurement
                        .temperatures
                        .clone(),
                    replicates: measurement.replicates,
                    strains: measurement
                        .strains
                        .iter()
                        .map(|strain| {
                            strain
                                .uri_or_label()
                                .to_string()
                        })
                        .collect(),
                    file_types: measurement
                        .file_types
                        .clone(),
                });
            }
        }

        let mut sample_sets = Vec::new();
        for table in controls {
            for control in &table.controls {
                sample_sets.push(SampleSet {
                    identity: identities.next("sample_set"),
                    control_type: control
                        .control_type
                        .clone(),
                    strains: control
                        .strains
                        .iter()
                        .map(|strain| {
                            strain
                                .uri_or_label()
                                .to_string()
                        })
                        .collect(),
                    channel: control
                        .channel
                        .clone(),
                    timepoints: control
                        .timepoints
                        .clone(),
                });
            }
        }

        let experimental_request = ExperimentalRequest {
            identity: identities.next("experimental_request"),
            name: request
                .name
                .clone(),
            experiment_id: request
                .lab
                .qualified_experiment_id(),
            experiment_reference: request
                .experiment_reference
                .clone(),
            experiment_reference_url: request
                .experiment_reference_url
                .clone(),
            measurements,
            sample_sets,
        };

        Ok(ProtocolInterface {
            namespace: namespace.to_string(),
            protocol_name,
            measurement_types,
            parameters,
            experimental_request,
        })
    }
}
