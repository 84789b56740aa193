use serde::Serialize;
use std::collections::BTreeMap;

/// A value given to a protocol parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Boolean(bool),
    Float(f64),
    Json(serde_json::Value),
    Text(String),
}

/// The parameter table: settings for submitting the experiment, and the
/// protocol's own parameters keyed by field id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterIntent {
    pub xplan_base_dir: Option<String>,
    pub xplan_reactor: Option<String>,
    pub plate_size: Option<i64>,
    pub plate_number: Option<i64>,
    pub protocol: Option<String>,
    pub container_search_strings: Vec<String>,
    pub strain_property: Option<String>,
    pub xplan_path: Option<String>,
    pub submit: Option<bool>,
    pub protocol_id: Option<String>,
    pub test_mode: Option<bool>,
    pub experiment_reference_url_for_xplan: Option<String>,
    pub default_parameters: BTreeMap<String, ParameterValue>,
}

impl ParameterIntent {
    /// Record the values for a field. Several values are stored under
    /// numbered fields, `field.0`, `field.1`, and so on.
    pub fn add_values(&mut self, field: &str, values: Vec<ParameterValue>) {
        if values.len() == 1 {
            if let Some(value) = values
                .into_iter()
                .next()
            {
                self.default_parameters
                    .insert(field.to_string(), value);
            }
            return;
        }

        for (i, value) in values
            .into_iter()
            .enumerate()
        {
            self.default_parameters
                .insert(format!("{}.{}", field, i), value);
        }
    }
}
