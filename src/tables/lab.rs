//! The lab table: a single column of `key: value` entries naming the lab
//! and the lab's id for the experiment.

use super::{IntentTable, TableContext};
use crate::cells;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::intent::LabIntent;

pub fn parse_lab(table: &IntentTable, context: &TableContext, diagnostics: &mut Diagnostics) -> LabIntent {
    let mut intent = LabIntent::default();

    for (index, row) in table.data_rows() {
        for (column, cell) in row
            .cells
            .iter()
            .enumerate()
        {
            let text = cell.text();
            if text.is_empty() {
                continue;
            }

            let located = |diagnostic: Diagnostic| {
                diagnostic
                    .table(table.index)
                    .row(index)
                    .column(column)
                    .cell_text(text.clone())
            };

            match cells::key(&text).as_deref() {
                Some("lab") => match cells::key_value(&text) {
                    Some((_, name)) => match context
                        .catalog
                        .lab(&name)
                    {
                        Some(lab) => intent.lab = Some(lab.to_string()),
                        None => diagnostics.push(located(Diagnostic::error(format!(
                            "Lab table has invalid Lab value: {} does not match one of the following lab names: {}",
                            text,
                            context
                                .catalog
                                .lab_ids
                                .join(", ")
                        )))),
                    },
                    None => diagnostics.push(located(Diagnostic::error(format!(
                        "Lab table has invalid Lab value: {} does not follow the correct format for specifying a lab name.",
                        text
                    )))),
                },
                Some("experiment_id") => match cells::lab_value(&text) {
                    Some(id) => intent.experiment_id = Some(id),
                    None => diagnostics.push(located(Diagnostic::error(format!(
                        "Lab table has invalid Experiment_id value: {} does not specify an experiment id.",
                        text
                    )))),
                },
                _ => diagnostics.push(located(Diagnostic::warning(format!(
                    "Lab table has invalid value: {} is not supported in this table",
                    text
                )))),
            }
        }
    }

    intent
}
