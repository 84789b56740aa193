//! Experiment specification tables: which status table tracks which
//! experiment.

use super::{column_label, IntentTable, TableContext};
use crate::cells;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::intent::ExperimentSpecification;
use crate::tokens::HeaderKind;

pub fn parse_specification(
    table: &IntentTable,
    context: &TableContext,
    diagnostics: &mut Diagnostics,
) -> ExperimentSpecification {
    let mut specification = ExperimentSpecification {
        table: table.index,
        caption: table.caption,
        ..Default::default()
    };

    for (index, row) in table.data_rows() {
        let mut experiment_id = None;
        let mut status_table = None;

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
            let problem = match kind {
                HeaderKind::ExperimentId => {
                    if cells::is_experiment_id(&text, context.catalog) {
                        experiment_id = Some(text.clone());
                        None
                    } else {
                        Some(format!("{} must follow experiment.lab_name.experiment_id", text))
                    }
                }
                HeaderKind::ExperimentStatus => match cells::caption_index(&text) {
                    Some(caption) => {
                        status_table = Some(caption);
                        None
                    }
                    None => Some(format!("{} does not reference a Table", text)),
                },
                _ => None,
            };

            if let Some(problem) = problem {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Experiment specification table has invalid {} value: {}",
                        column_label(kind),
                        problem
                    ))
                    .table(table.index)
                    .row(index)
                    .column(column)
                    .cell_text(text),
                );
            }
        }

        match (experiment_id, status_table) {
            (Some(id), Some(caption)) => {
                specification
                    .experiments
                    .insert(id, caption);
            }
            (None, None) => {}
            (None, Some(_)) => diagnostics.push(missing(table, index, HeaderKind::ExperimentId)),
            (Some(_), None) => diagnostics.push(missing(table, index, HeaderKind::ExperimentStatus)),
        }
    }

    specification
}

fn missing(table: &IntentTable, row: usize, kind: HeaderKind) -> Diagnostic {
    Diagnostic::error(format!(
        "Experiment specification table has invalid {} value: Unable to parse information from cell",
        column_label(kind)
    ))
    .table(table.index)
    .row(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Table;
    use crate::units::Catalog;

    fn parse(table: &Table) -> (ExperimentSpecification, Diagnostics) {
        let catalog = Catalog::default();
        let context = TableContext::new(&catalog);
        let view = IntentTable::new(0, table);
        let mut diagnostics = Diagnostics::new();
        let result = parse_specification(&view, &context, &mut diagnostics);
        (result, diagnostics)
    }

    #[test]
    fn experiments_map_to_status_tables() {
        let table = Table::from_text(&[
            &["Experiment Id", "Experiment Status"],
            &["experiment.tacc.abc", "Table 4"],
            &["experiment.ginkgo.123", "Table 5"],
        ]);
        let (result, diagnostics) = parse(&table);
        assert!(diagnostics.is_empty());
        assert_eq!(result.experiments.get("experiment.tacc.abc"), Some(&4));
        assert_eq!(result.experiments.get("experiment.ginkgo.123"), Some(&5));
    }

    #[test]
    fn malformed_rows() {
        let table = Table::from_text(&[
            &["Experiment Id", "Experiment Status"],
            &["abc", "Table 4"],
            &["experiment.tacc.abc", "see above"],
        ]);
        let (result, diagnostics) = parse(&table);
        assert!(result
            .experiments
            .is_empty());
        assert_eq!(
            diagnostics.errors(),
            vec![
                "Experiment specification table has invalid Experiment_id value: abc must follow experiment.lab_name.experiment_id",
                "Experiment specification table has invalid Experiment_id value: Unable to parse information from cell",
                "Experiment specification table has invalid Experiment Status value: see above does not reference a Table",
                "Experiment specification table has invalid Experiment Status value: Unable to parse information from cell",
            ]
        );
    }
}
