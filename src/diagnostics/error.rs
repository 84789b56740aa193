use thiserror::Error;

/// A recoverable problem with a table or one of its cells. Parsers return
/// these and the engine records them against the row being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TableError {
    pub message: String,
}

impl TableError {
    pub fn new(message: impl Into<String>) -> TableError {
        TableError {
            message: message.into(),
        }
    }
}

/// A term that needs a catalog entry which is not there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DictionaryError {
    pub message: String,
}

impl DictionaryError {
    pub fn new(message: impl Into<String>) -> DictionaryError {
        DictionaryError {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum IntentParserError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error("invalid schema: {0}")]
    Schema(String),

    #[error("unable to map experiment reference: {0}")]
    Mapping(String),

    #[error("{0}")]
    Generic(String),
}

impl IntentParserError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}
