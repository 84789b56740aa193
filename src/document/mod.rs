//! The document model consumed by the engine, and loading documents from
//! their JSON serialization on disk.

use std::path::Path;
use tracing::debug;

mod error;
mod model;

pub use error::LoadingError;
pub use model::*;

/// Read a file and return an owned String.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Deserialize a document from its JSON form.
pub fn parse<'i>(filename: &'i Path, content: &str) -> Result<Document, LoadingError<'i>> {
    match serde_json::from_str::<Document>(content) {
        Ok(document) => {
            debug!(
                "Found {} table{}",
                document
                    .tables
                    .len(),
                if document
                    .tables
                    .len()
                    == 1
                {
                    ""
                } else {
                    "s"
                }
            );
            Ok(document)
        }
        Err(error) => {
            debug!(?error);
            Err(LoadingError {
                problem: "Invalid document".to_string(),
                details: error.to_string(),
                filename,
            })
        }
    }
}
