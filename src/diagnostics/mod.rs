//! Errors and warnings accumulated while a document is processed.

use serde::Serialize;
use std::fmt;

mod error;

pub use error::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One problem found in a document. Location fields are filled in as far as
/// they are known; `table` is the position of the table in the document,
/// `row` and `column` index into that table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub table: Option<usize>,
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub cell_text: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(Severity::Error, message.into())
    }

    pub fn warning(message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(Severity::Warning, message.into())
    }

    fn new(severity: Severity, message: String) -> Diagnostic {
        Diagnostic {
            severity,
            table: None,
            row: None,
            column: None,
            cell_text: None,
            message,
        }
    }

    pub fn table(mut self, table: usize) -> Diagnostic {
        self.table = Some(table);
        self
    }

    pub fn row(mut self, row: usize) -> Diagnostic {
        self.row = Some(row);
        self
    }

    pub fn column(mut self, column: usize) -> Diagnostic {
        self.column = Some(column);
        self
    }

    pub fn cell_text(mut self, text: impl Into<String>) -> Diagnostic {
        self.cell_text = Some(text.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The ordered list of everything reported during one parse. Order is the
/// order in which problems were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries
            .push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries
            .extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
    }

    pub fn len(&self) -> usize {
        self.entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(Diagnostic::is_error)
    }

    /// Messages of every error, in the order they were recorded.
    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    /// Messages of every warning, in the order they were recorded.
    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| {
                d.message
                    .clone()
            })
            .collect()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_and_warnings_keep_their_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::warning("first"));
        diagnostics.push(
            Diagnostic::error("second")
                .table(1)
                .row(2),
        );
        diagnostics.push(Diagnostic::warning("third"));
        diagnostics.push(Diagnostic::error("fourth"));

        assert_eq!(diagnostics.len(), 4);
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.errors(), vec!["second", "fourth"]);
        assert_eq!(diagnostics.warnings(), vec!["first", "third"]);
    }

    #[test]
    fn location_is_carried() {
        let diagnostic = Diagnostic::error("bad unit")
            .table(3)
            .row(4)
            .column(1)
            .cell_text("5 parsecs");

        assert_eq!(diagnostic.table, Some(3));
        assert_eq!(diagnostic.row, Some(4));
        assert_eq!(diagnostic.column, Some(1));
        assert_eq!(diagnostic.cell_text, Some("5 parsecs".to_string()));
        assert_eq!(diagnostic.to_string(), "bad unit");
    }
}
