//! The vocabulary documents are checked against: units, the closed sets of
//! measurement, file and control types, lab names, and the mapping of
//! parameter names to fields. A built-in default covers the common
//! ontology; a JSON file can replace any part of it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::document::{self, LoadingError};

/// How the value of a parameter field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Boolean,
    Float,
    Nested,
    Text,
    Strateos,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Abbreviations {
    pub fluid: BTreeMap<String, String>,
    pub temperature: BTreeMap<String, String>,
    pub timepoint: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub temperature_units: Vec<String>,
    pub timepoint_units: Vec<String>,
    pub fluid_units: Vec<String>,
    pub measurement_types: Vec<String>,
    pub file_types: Vec<String>,
    pub control_types: Vec<String>,
    pub lab_ids: Vec<String>,
    pub parameter_fields: BTreeMap<String, String>,
    pub boolean_fields: Vec<String>,
    pub float_fields: Vec<String>,
    pub nested_fields: Vec<String>,
    pub string_fields: Vec<String>,
    pub pipeline_statuses: BTreeMap<String, String>,
    pub abbreviations: Abbreviations,
}

fn strings(values: &[&str]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.to_string())
        .collect()
}

fn pairs(values: &[(&str, &str)]) -> BTreeMap<String, String> {
    values
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

const BOOLEAN_FIELDS: &[&str] = &[
    "measurement_info.36_hr_read",
    "run_info.read_each_recovery",
    "run_info.read_each_induction",
    "run_info.save_for_rnaseq",
    "run_info.skip_first_flow",
    "run_info.only_endpoint_flow",
    "validate_samples",
    "run_info.incubate_in_reader",
    "rxn_info.rxn_group.rxn_info.mg_glu2",
];

const FLOAT_FIELDS: &[&str] = &["plate_reader_info.gain"];

const NESTED_FIELDS: &[&str] = &[
    "induction_info.induction_reagents",
    "induction_info.induction_reagents.inducer",
    "induction_info.sampling_info",
    "measurement_info.flow_info",
    "measurement_info.plate_reader_info",
    "reagent_info.inducer_info",
    "reagent_info.kill_switch",
    "recovery_info",
    "inducers",
    "plate_reader_info.list_of_gains",
];

const STRING_FIELDS: &[&str] = &["exp_info.media_well_strings"];

const STRATEOS_FIELDS: &[&str] = &[
    "inoc_info.inoc_vol",
    "inoc_info.inoc_media_vol",
    "inoc_info.inc_temp",
    "inoc_info.inoculation_media",
    "recovery_info.recovery_media",
    "reagent_info.inducer_info.inducer_conc",
];

impl Default for Catalog {
    fn default() -> Catalog {
        let mut parameter_fields = BTreeMap::new();
        for field in BOOLEAN_FIELDS
            .iter()
            .chain(FLOAT_FIELDS)
            .chain(NESTED_FIELDS)
            .chain(STRING_FIELDS)
            .chain(STRATEOS_FIELDS)
        {
            parameter_fields.insert(field.to_string(), field.to_string());
        }
        parameter_fields.extend(pairs(&[
            ("Inoculation volume", "inoc_info.inoc_vol"),
            ("Inoculation media volume", "inoc_info.inoc_media_vol"),
            ("Inoculation incubation temperature", "inoc_info.inc_temp"),
            ("Inoculation media", "inoc_info.inoculation_media"),
            ("Recovery media", "recovery_info.recovery_media"),
            ("Media well strings", "exp_info.media_well_strings"),
            ("Plate reader gain", "plate_reader_info.gain"),
            ("Validate samples", "validate_samples"),
            ("Inducers", "inducers"),
        ]));

        Catalog {
            temperature_units: strings(&["celsius", "fahrenheit"]),
            timepoint_units: strings(&[
                "day",
                "hour",
                "femtosecond",
                "microsecond",
                "millisecond",
                "minute",
                "month",
                "nanosecond",
                "picosecond",
                "second",
                "week",
                "year",
            ]),
            fluid_units: strings(&[
                "%",
                "M",
                "mM",
                "X",
                "g/L",
                "ug/ml",
                "micromole",
                "nM",
                "uM",
                "mg/ml",
                "ng/ul",
            ]),
            measurement_types: strings(&[
                "FLOW",
                "IMAGE",
                "RNA_SEQ",
                "DNA_SEQ",
                "PROTEOMICS",
                "SEQUENCING_CHROMATOGRAM",
                "AUTOMATED_TEST",
                "CFU",
                "PLATE_READER",
                "CONDITION_SPACE",
                "EXPERIMENTAL_DESIGN",
            ]),
            file_types: strings(&[
                "CSV", "FCS", "FASTQ", "MZML", "PNG", "JPG", "TXT", "ZIP", "PLAIN", "BAM", "SRA",
            ]),
            control_types: strings(&[
                "HIGH_FITC",
                "EMPTY_VECTOR",
                "BASELINE",
                "TREATMENT_1",
                "TREATMENT_2",
                "BASELINE_MEDIA_PR",
                "CELL_DEATH_NEG_CONTROL",
                "CELL_DEATH_POS_CONTROL",
            ]),
            lab_ids: strings(&[
                "tacc",
                "Ginkgo",
                "Transcriptic",
                "Strateos",
                "Duke_Haase",
                "Caltech",
                "BioFAB",
                "Emerald",
            ]),
            parameter_fields,
            boolean_fields: strings(BOOLEAN_FIELDS),
            float_fields: strings(FLOAT_FIELDS),
            nested_fields: strings(NESTED_FIELDS),
            string_fields: strings(STRING_FIELDS),
            pipeline_statuses: pairs(&[
                ("Xplan Request Submitted", "xplan_request_submitted"),
                ("Uploaded", "uploaded"),
                ("Converted", "converted"),
                ("Mtypes", "mtypes"),
                ("Comparison Passed", "comparison_passed"),
                ("Annotated", "annotated"),
                ("Ingested", "ingested"),
                ("Obs Load", "obs_load"),
            ]),
            abbreviations: Abbreviations::default(),
        }
    }
}

impl Default for Abbreviations {
    fn default() -> Abbreviations {
        Abbreviations {
            fluid: pairs(&[("x", "X"), ("fold", "X"), ("mmol", "mM"), ("um", "micromole")]),
            temperature: pairs(&[
                ("c", "celsius"),
                ("celsius", "celsius"),
                ("f", "fahrenheit"),
                ("fahrenheit", "fahrenheit"),
            ]),
            timepoint: pairs(&[
                ("hours", "hour"),
                ("hrs", "hour"),
                ("hr", "hour"),
                ("h", "hour"),
                ("minutes", "minute"),
                ("min", "minute"),
                ("seconds", "second"),
                ("sec", "second"),
                ("days", "day"),
                ("weeks", "week"),
            ]),
        }
    }
}

impl Catalog {
    /// Read a catalog from a JSON file. Keys absent from the file keep
    /// their default values.
    pub fn load(filename: &Path) -> Result<Catalog, LoadingError<'_>> {
        let content = document::load(filename)?;
        Catalog::parse(filename, &content)
    }

    pub fn parse<'i>(filename: &'i Path, content: &str) -> Result<Catalog, LoadingError<'i>> {
        serde_json::from_str::<Catalog>(content).map_err(|error| {
            debug!(?error);
            LoadingError {
                problem: "Invalid catalog".to_string(),
                details: error.to_string(),
                filename,
            }
        })
    }

    pub fn is_measurement_type(&self, text: &str) -> bool {
        self.measurement_types
            .iter()
            .any(|t| t == text)
    }

    pub fn is_file_type(&self, text: &str) -> bool {
        self.file_types
            .iter()
            .any(|t| t == text)
    }

    pub fn is_control_type(&self, text: &str) -> bool {
        self.control_types
            .iter()
            .any(|t| t == text)
    }

    /// The catalog spelling of a lab, matched without regard to case.
    pub fn lab(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.lab_ids
            .iter()
            .find(|lab| lab.to_lowercase() == name)
            .map(String::as_str)
    }

    /// The field id a parameter name maps to.
    pub fn parameter_field(&self, name: &str) -> Option<&str> {
        self.parameter_fields
            .get(name)
            .map(String::as_str)
    }

    pub fn field_kind(&self, field: &str) -> FieldKind {
        let contains = |list: &[String]| {
            list.iter()
                .any(|f| f == field)
        };

        if contains(&self.boolean_fields) {
            FieldKind::Boolean
        } else if contains(&self.float_fields) {
            FieldKind::Float
        } else if contains(&self.nested_fields) {
            FieldKind::Nested
        } else if contains(&self.string_fields) {
            FieldKind::Text
        } else {
            FieldKind::Strateos
        }
    }

    /// The status type id for the name of a pipeline stage.
    pub fn pipeline_status(&self, name: &str) -> Option<&str> {
        self.pipeline_statuses
            .get(name)
            .map(String::as_str)
    }
}
