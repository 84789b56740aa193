use owo_colors::OwoColorize;
use std::path::Path;

use intent_parser::diagnostics::{Diagnostic, IntentParserError, Severity};
use intent_parser::document::LoadingError;

/// Format a diagnostic with its location and the text of the offending
/// cell underneath.
pub fn full_diagnostic(diagnostic: &Diagnostic, filename: &Path) -> String {
    let heading = concise_diagnostic(diagnostic, filename);

    let Some(text) = &diagnostic.cell_text else {
        return heading;
    };

    let label = match (diagnostic.row, diagnostic.column) {
        (Some(row), Some(column)) => format!("{},{}", row + 1, column + 1),
        (Some(row), None) => (row + 1).to_string(),
        _ => String::new(),
    };
    let width = 3.max(label.len());

    format!(
        r#"
{}

{:width$} {}
{:width$} {} {}
        "#,
        heading,
        ' ',
        '|'.bright_blue(),
        label.bright_blue(),
        '|'.bright_blue(),
        text,
    )
    .trim_ascii()
    .to_string()
}

/// Format a diagnostic on a single line.
pub fn concise_diagnostic(diagnostic: &Diagnostic, filename: &Path) -> String {
    let severity = match diagnostic.severity {
        Severity::Error => "error"
            .bright_red()
            .to_string(),
        Severity::Warning => "warning"
            .bright_yellow()
            .to_string(),
    };

    format!(
        "{}: {}{} {}",
        severity,
        filename.to_string_lossy(),
        location(diagnostic),
        diagnostic
            .message
            .bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .to_string()
            .bold()
    )
}

/// Format an error that stops a request from being produced at all.
pub fn concise_engine_error(error: &IntentParserError, filename: &Path) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        error
            .message()
            .bold()
    )
}

// table, row and column are printed 1-based, as they appear to a person
// reading the document
fn location(diagnostic: &Diagnostic) -> String {
    let mut result = String::new();
    if let Some(table) = diagnostic.table {
        result.push_str(&format!(":table {}", table + 1));
        if let Some(row) = diagnostic.row {
            result.push_str(&format!(":{}", row + 1));
            if let Some(column) = diagnostic.column {
                result.push_str(&format!(":{}", column + 1));
            }
        }
    }
    result
}
