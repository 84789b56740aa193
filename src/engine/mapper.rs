//! Mapping a document to the challenge problem and experiment reference it
//! belongs to. The catalog that knows this lives outside the engine; the
//! engine only sees this trait.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::diagnostics::IntentParserError;
use crate::document::{self, LoadingError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentReference {
    pub challenge_problem: String,
    pub experiment_reference: String,
}

pub trait ReferenceMapper {
    /// The challenge problem and experiment reference of the document at
    /// `url`.
    fn map(&self, url: &str) -> Result<ExperimentReference, IntentParserError>;
}

/// A mapper backed by a fixed table of document URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceTable {
    entries: BTreeMap<String, ExperimentReference>,
}

impl ReferenceTable {
    pub fn new() -> ReferenceTable {
        ReferenceTable::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, reference: ExperimentReference) {
        self.entries
            .insert(url.into(), reference);
    }

    /// Read a table of references from a JSON file mapping document URLs
    /// to their challenge problem and experiment reference.
    pub fn load(filename: &Path) -> Result<ReferenceTable, LoadingError<'_>> {
        let content = document::load(filename)?;
        serde_json::from_str(&content).map_err(|error| LoadingError {
            problem: "Invalid reference table".to_string(),
            details: error.to_string(),
            filename,
        })
    }
}

impl ReferenceMapper for ReferenceTable {
    fn map(&self, url: &str) -> Result<ExperimentReference, IntentParserError> {
        self.entries
            .get(url)
            .cloned()
            .ok_or_else(|| IntentParserError::Mapping(format!("{} is not a known experiment reference", url)))
    }
}
