//! Output generation for the intent-parser command line

use owo_colors::OwoColorize;
use serde::Serialize;
use tinytemplate::TinyTemplate;
use tracing::debug;

use intent_parser::engine::{Outcome, TableSummary};

static SUMMARY: &str = r#"{request.name}
  lab:                  {request.lab}
  experiment id:        {experiment_id}
  challenge problem:    {challenge_problem}
  experiment reference: {experiment_reference}
  revision:             {request.doc_revision_id}

Tables
{{ for table in tables }}  {table.index}  {table.kind}{{ if table.caption }}  (Table {table.caption}){{ endif }}
{{ endfor }}
Measurements:  {measurements}
Controls:      {controls}
Parameters:    {parameters}
Errors:        {errors}
Warnings:      {warnings}
"#;

#[derive(Serialize)]
struct Request<'a> {
    name: &'a str,
    lab: &'a str,
    doc_revision_id: &'a str,
}

#[derive(Serialize)]
struct Context<'a> {
    request: Request<'a>,
    experiment_id: String,
    challenge_problem: &'a str,
    experiment_reference: &'a str,
    tables: &'a [TableSummary],
    measurements: usize,
    controls: usize,
    parameters: usize,
    errors: usize,
    warnings: usize,
}

/// Render a plain text overview of what was found in a document.
pub fn summary(outcome: &Outcome) -> Result<String, tinytemplate::error::Error> {
    let request = &outcome.request;

    let context = Context {
        request: Request {
            name: &request.name,
            lab: request
                .lab
                .lab(),
            doc_revision_id: &request.doc_revision_id,
        },
        experiment_id: request
            .lab
            .qualified_experiment_id(),
        challenge_problem: request
            .challenge_problem
            .as_deref()
            .unwrap_or(intent_parser::intent::UNDEFINED),
        experiment_reference: request
            .experiment_reference
            .as_deref()
            .unwrap_or(intent_parser::intent::UNKNOWN),
        tables: &outcome.tables,
        measurements: request
            .runs
            .iter()
            .map(|run| {
                run.measurements
                    .len()
            })
            .sum(),
        controls: outcome
            .controls
            .iter()
            .map(|table| {
                table
                    .controls
                    .len()
            })
            .sum(),
        parameters: request
            .parameters
            .as_ref()
            .map(|parameters| {
                parameters
                    .default_parameters
                    .len()
            })
            .unwrap_or(0),
        errors: outcome
            .diagnostics
            .errors()
            .len(),
        warnings: outcome
            .diagnostics
            .warnings()
            .len(),
    };

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("summary", SUMMARY)?;

    let rendered = tt.render("summary", &context)?;
    debug!("Rendered summary of {} bytes", rendered.len());
    Ok(rendered)
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(error) => {
            eprintln!("{}: Unable to serialize output: {}", "error".bright_red(), error);
            std::process::exit(1);
        }
    }
}
