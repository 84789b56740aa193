//! Checking the assembled request before it is handed back: schema
//! validation, and reagents that have no entry in the program dictionary.

use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics, IntentParserError};
use crate::document::{self, LoadingError};
use crate::intent::NO_PROGRAM_DICTIONARY_ENTRY;

static STRUCTURED_REQUEST: &str = include_str!("../../schemas/structured_request.json");

pub struct Validator {
    schema: JSONSchema,
}

impl Validator {
    pub fn new(schema: &Value) -> Result<Validator, IntentParserError> {
        let schema = JSONSchema::compile(schema).map_err(|error| IntentParserError::Schema(error.to_string()))?;
        Ok(Validator { schema })
    }

    /// The structured request schema shipped with this crate.
    pub fn bundled() -> Result<Validator, IntentParserError> {
        let schema: Value =
            serde_json::from_str(STRUCTURED_REQUEST).map_err(|error| IntentParserError::Schema(error.to_string()))?;
        Validator::new(&schema)
    }

    /// Read and compile a schema from a file.
    pub fn load(filename: &Path) -> Result<Validator, LoadingError<'_>> {
        let content = document::load(filename)?;
        let invalid = |details: String| LoadingError {
            problem: "Invalid schema".to_string(),
            details,
            filename,
        };

        let schema: Value = serde_json::from_str(&content).map_err(|error| invalid(error.to_string()))?;
        Validator::new(&schema).map_err(|error| invalid(error.message()))
    }

    /// Record every way `request` fails the schema as an error. The request
    /// itself is not changed.
    pub fn validate(&self, request: &Value, diagnostics: &mut Diagnostics) {
        if let Err(errors) = self
            .schema
            .validate(request)
        {
            for error in errors {
                debug!("Schema violation at {}", error.instance_path);
                diagnostics.push(Diagnostic::error(format!(
                    "Schema Validation Error: {}",
                    error
                )));
            }
        }
    }
}

/// Warn about every reagent in the request whose name has no program
/// dictionary URI. Each label is reported once.
pub fn missing_uris(request: &Value, diagnostics: &mut Diagnostics) {
    let mut seen = BTreeSet::new();
    walk(request, &mut seen, diagnostics);
}

fn walk<'v>(value: &'v Value, seen: &mut BTreeSet<&'v str>, diagnostics: &mut Diagnostics) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "contents" {
                    contents(child, seen, diagnostics);
                } else {
                    walk(child, seen, diagnostics);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, seen, diagnostics);
            }
        }
        _ => {}
    }
}

fn contents<'v>(value: &'v Value, seen: &mut BTreeSet<&'v str>, diagnostics: &mut Diagnostics) {
    match value {
        Value::Array(items) => {
            for item in items {
                contents(item, seen, diagnostics);
            }
        }
        Value::Object(entry) => {
            let Some(name) = entry.get("name") else {
                return;
            };
            let uri = name
                .get("sbh_uri")
                .and_then(Value::as_str);
            let label = name
                .get("label")
                .and_then(Value::as_str);

            if let (Some(NO_PROGRAM_DICTIONARY_ENTRY), Some(label)) = (uri, label) {
                if seen.insert(label) {
                    diagnostics.push(Diagnostic::warning(format!("{} does not have a SBH URI.", label)));
                }
            }
        }
        _ => {}
    }
}
