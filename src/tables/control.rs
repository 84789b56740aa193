//! Control tables: one control per data row.

use tracing::debug;

use super::{column_label, IntentTable, TableContext};
use crate::cells;
use crate::diagnostics::{Diagnostic, Diagnostics, TableError};
use crate::document::{Cell, Row};
use crate::intent::{ControlIntent, ControlTableIntent, NamedLink};
use crate::tokens::HeaderKind;
use crate::units::UnitCategory;

/// Read every data row of a control table. The bookmarks found anywhere in
/// the table are kept so that measurements can refer to it by bookmark.
pub fn parse_controls(
    table: &IntentTable,
    context: &TableContext,
    diagnostics: &mut Diagnostics,
) -> ControlTableIntent {
    let mut bookmark_ids: Vec<String> = Vec::new();
    for row in &table
        .source()
        .rows
    {
        for cell in &row.cells {
            for id in cell.bookmark_ids() {
                if !bookmark_ids.contains(&id) {
                    bookmark_ids.push(id);
                }
            }
        }
    }

    let controls: Vec<ControlIntent> = table
        .data_rows()
        .map(|(i, row)| read_row(table, context, diagnostics, i, row))
        .filter(|control| !control.is_empty())
        .collect();

    debug!("Control table {} has {} controls", table.index, controls.len());

    ControlTableIntent {
        table: table.index,
        caption: table.caption,
        bookmark_ids,
        controls,
    }
}

fn read_row(
    table: &IntentTable,
    context: &TableContext,
    diagnostics: &mut Diagnostics,
    index: usize,
    row: &Row,
) -> ControlIntent {
    let mut control = ControlIntent::default();

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
        let result = read_cell(&mut control, context, kind, cell, &text);

        match result {
            Ok(Some(warning)) => diagnostics.push(
                Diagnostic::warning(warning)
                    .table(table.index)
                    .row(index)
                    .column(column)
                    .cell_text(text),
            ),
            Ok(None) => {}
            Err(error) => diagnostics.push(
                Diagnostic::error(format!(
                    "Controls table has invalid {} value: {}",
                    column_label(kind),
                    error
                ))
                .table(table.index)
                .row(index)
                .column(column)
                .cell_text(text),
            ),
        }
    }

    control
}

/// Read one cell into the control, returning a warning if there is
/// something to say about it.
fn read_cell(
    control: &mut ControlIntent,
    context: &TableContext,
    kind: HeaderKind,
    cell: &Cell,
    text: &str,
) -> Result<Option<String>, TableError> {
    match kind {
        HeaderKind::ControlType => {
            if !context
                .catalog
                .is_control_type(text)
            {
                return Err(TableError::new(format!(
                    "{} does not match one of the following control types: {}",
                    text,
                    context
                        .catalog
                        .control_types
                        .join(", ")
                )));
            }
            control.control_type = Some(text.to_string());
        }
        HeaderKind::Strains => {
            let links = cell.text_with_url();
            control.strains = cells::names(text)
                .iter()
                .map(|name| NamedLink::lookup(name, &links))
                .collect();
        }
        HeaderKind::Channel => {
            let channels = cells::names(text);
            control.channel = channels
                .first()
                .cloned();
            if channels.len() > 1 {
                return Ok(Some(format!(
                    "Controls table has more than one Channel value. Only the first channel will be used from {}.",
                    text
                )));
            }
        }
        HeaderKind::Contents => {
            control.contents = cells::content_items(text, &cell.text_with_url(), &context.resolver)?;
        }
        HeaderKind::Timepoint => {
            control.timepoints = cells::values_with_unit(text, &context.resolver, UnitCategory::Timepoint)?;
        }
        _ => {}
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Run, Table};
    use crate::units::{Catalog, Quantity};

    fn parse(table: &Table) -> (ControlTableIntent, Diagnostics) {
        let catalog = Catalog::default();
        let context = TableContext::new(&catalog);
        let view = IntentTable::new(0, table);
        let mut diagnostics = Diagnostics::new();
        let result = parse_controls(&view, &context, &mut diagnostics);
        (result, diagnostics)
    }

    #[test]
    fn control_rows() {
        let table = Table::from_text(&[
            &["Table 1", "", "", "", ""],
            &["Control Type", "Strains", "Channel", "Contents", "Timepoint"],
            &["HIGH_FITC", "MG1655", "BL1-A", "beta_estradiol 0.05 micromole", "5 hour, 6 hour"],
        ]);
        let (result, diagnostics) = parse(&table);
        assert!(diagnostics.is_empty());
        assert_eq!(result.caption, Some(1));

        let control = &result.controls[0];
        assert_eq!(control.control_type.as_deref(), Some("HIGH_FITC"));
        assert_eq!(control.strains[0].label, "MG1655");
        assert_eq!(control.channel.as_deref(), Some("BL1-A"));
        assert_eq!(control.contents[0].name.label, "beta_estradiol");
        assert_eq!(
            control.timepoints,
            vec![Quantity::new(5.0, "hour"), Quantity::new(6.0, "hour")]
        );
    }

    #[test]
    fn several_channels_warns() {
        let table = Table::from_text(&[
            &["Control Type", "Channel"],
            &["HIGH_FITC", "BL1-A, YL2-A"],
        ]);
        let (result, diagnostics) = parse(&table);
        assert_eq!(result.controls[0].channel.as_deref(), Some("BL1-A"));
        assert_eq!(
            diagnostics
                .warnings()
                .len(),
            1
        );
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn unknown_control_type() {
        let table = Table::from_text(&[&["Control Type", "Strains"], &["FANCY", "MG1655"]]);
        let (result, diagnostics) = parse(&table);
        assert_eq!(result.controls[0].control_type, None);
        assert_eq!(
            diagnostics.errors()[0],
            "Controls table has invalid Control Type value: FANCY does not match one of the following control types: \
             HIGH_FITC, EMPTY_VECTOR, BASELINE, TREATMENT_1, TREATMENT_2, BASELINE_MEDIA_PR, \
             CELL_DEATH_NEG_CONTROL, CELL_DEATH_POS_CONTROL"
        );
    }

    #[test]
    fn bookmarks_collected() {
        let mut table = Table::from_text(&[&["Control Type"], &["HIGH_FITC"]]);
        table.rows[0].cells[0] = Cell::from_runs(vec![Run::new("Control Type").with_bookmark("id.abc")]);
        let (result, _) = parse(&table);
        assert_eq!(result.bookmark_ids, vec!["id.abc"]);
    }
}
