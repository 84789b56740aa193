//! Experiment status tables: where each stage of the data pipeline is at.

use super::{column_label, IntentTable, TableContext};
use crate::cells;
use crate::diagnostics::{Diagnostic, Diagnostics, TableError};
use crate::document::Row;
use crate::intent::{ExperimentStatus, ExperimentStatusTable, StatusState};
use crate::tokens::HeaderKind;

pub fn parse_statuses(
    table: &IntentTable,
    context: &TableContext,
    diagnostics: &mut Diagnostics,
) -> ExperimentStatusTable {
    let statuses = table
        .data_rows()
        .map(|(i, row)| read_row(table, context, diagnostics, i, row))
        .filter(|status| !status.is_empty())
        .collect();

    ExperimentStatusTable {
        table: table.index,
        caption: table.caption,
        statuses,
    }
}

fn read_row(
    table: &IntentTable,
    context: &TableContext,
    diagnostics: &mut Diagnostics,
    index: usize,
    row: &Row,
) -> ExperimentStatus {
    let mut status = ExperimentStatus::default();

    for (column, cell) in row
        .cells
        .iter()
        .enumerate()
    {
        let text = cell.text();
        if text.is_empty() {
            continue;
        }

        let kind = table.header(column);
        let located = |diagnostic: Diagnostic| {
            diagnostic
                .table(table.index)
                .row(index)
                .column(column)
                .cell_text(text.clone())
        };

        match read_cell(&mut status, context, kind, &text) {
            Ok(Some(warning)) => diagnostics.push(located(Diagnostic::warning(warning))),
            Ok(None) => {}
            Err(error) => diagnostics.push(located(Diagnostic::error(format!(
                "Experiment status table has invalid {} value: {}",
                column_label(kind),
                error
            )))),
        }
    }

    status
}

fn read_cell(
    status: &mut ExperimentStatus,
    context: &TableContext,
    kind: HeaderKind,
    text: &str,
) -> Result<Option<String>, TableError> {
    match kind {
        HeaderKind::PipelineStatus => match context
            .catalog
            .pipeline_status(text)
        {
            Some(id) => status.status_type = Some(id.to_string()),
            None => {
                return Ok(Some(format!(
                    "{} is not an experiment status supported in this document",
                    text
                )))
            }
        },
        HeaderKind::LastUpdated => status.last_updated = Some(cells::datetime(text)?),
        HeaderKind::Path => {
            if !cells::is_name(text) {
                return Err(TableError::new(format!("{} should be a file path.", text)));
            }
            let paths = cells::names(text);
            status.path = paths
                .first()
                .cloned();
            if paths.len() > 1 {
                return Ok(Some(format!(
                    "More than one {} detected from {}. Only the first path will be used.",
                    column_label(kind),
                    text
                )));
            }
        }
        HeaderKind::State => status.state = Some(state(text)),
        _ => {}
    }

    Ok(None)
}

fn state(text: &str) -> StatusState {
    match text
        .to_lowercase()
        .as_str()
    {
        "succeeded" => StatusState::Flag(true),
        "failed" | "not complete" => StatusState::Flag(false),
        _ => match cells::boolean_flag(text) {
            Some(flag) => StatusState::Flag(flag),
            None => StatusState::Name(text.to_string()),
        },
    }
}
