//! Measurement tables: one measurement per data row, columns dispatched on
//! their header. Columns without a known name are reagents or media.

use tracing::debug;

use super::{column_label, IntentTable, TableContext};
use crate::cells;
use crate::diagnostics::{Diagnostic, Diagnostics, TableError};
use crate::document::{Cell, Row};
use crate::intent::{
    ControlReference, MeasurementIntent, MeasurementTableIntent, NamedLink, ReagentEntry, ReagentValue,
};
use crate::tokens::HeaderKind;
use crate::units::UnitCategory;

struct MeasurementParser<'a, 'd, 'c> {
    table: &'a IntentTable<'d>,
    context: &'a TableContext<'c>,
    diagnostics: &'a mut Diagnostics,
}

/// Read every data row of a measurement table. Rows with nothing in them
/// are dropped.
pub fn parse_measurements(
    table: &IntentTable,
    context: &TableContext,
    diagnostics: &mut Diagnostics,
) -> MeasurementTableIntent {
    let mut parser = MeasurementParser {
        table,
        context,
        diagnostics,
    };

    let measurements: Vec<MeasurementIntent> = table
        .data_rows()
        .map(|(i, row)| parser.read_row(i, row))
        .filter(|measurement| !measurement.is_empty())
        .collect();

    debug!(
        "Measurement table {} has {} measurements",
        table.index,
        measurements.len()
    );

    MeasurementTableIntent {
        table: table.index,
        caption: table.caption,
        measurements,
    }
}

impl<'a, 'd, 'c> MeasurementParser<'a, 'd, 'c> {
    fn read_row(&mut self, index: usize, row: &Row) -> MeasurementIntent {
        let mut measurement = MeasurementIntent {
            row: index,
            ..Default::default()
        };

        for (column, cell) in row
            .cells
            .iter()
            .enumerate()
        {
            let text = cell.text();
            if text.is_empty() {
                continue;
            }

            let kind = self
                .table
                .header(column);

            if let Err(error) = self.read_cell(&mut measurement, kind, index, column, cell, &text) {
                self.diagnostics
                    .push(
                        Diagnostic::error(format!(
                            "Measurement table at row {} column {} has invalid {} value: {}",
                            index,
                            column,
                            column_label(kind),
                            error
                        ))
                        .table(self.table.index)
                        .row(index)
                        .column(column)
                        .cell_text(text),
                    );
            }
        }

        measurement
    }

    fn read_cell(
        &mut self,
        measurement: &mut MeasurementIntent,
        kind: HeaderKind,
        row: usize,
        column: usize,
        cell: &Cell,
        text: &str,
    ) -> Result<(), TableError> {
        let catalog = self
            .context
            .catalog;
        let resolver = &self
            .context
            .resolver;

        match kind {
            HeaderKind::Samples | HeaderKind::Notes => {}
            HeaderKind::MeasurementType => {
                if !catalog.is_measurement_type(text) {
                    return Err(TableError::new(format!(
                        "{} does not match one of the following measurement types: {}",
                        text,
                        catalog
                            .measurement_types
                            .join(", ")
                    )));
                }
                measurement.measurement_type = Some(text.to_string());
            }
            HeaderKind::FileType => {
                let mut invalid = Vec::new();
                for file_type in cells::names(text) {
                    if catalog.is_file_type(&file_type) {
                        measurement
                            .file_types
                            .push(file_type);
                    } else {
                        invalid.push(file_type);
                    }
                }
                if !invalid.is_empty() {
                    return Err(TableError::new(format!(
                        "{} does not match one of the following file types: {}",
                        invalid.join(", "),
                        catalog
                            .file_types
                            .join(", ")
                    )));
                }
            }
            HeaderKind::Replicate => {
                let replicates = cells::integers(text)?;
                if replicates.len() > 1 {
                    self.diagnostics
                        .push(
                            Diagnostic::warning(format!(
                                "Measurement table at row {} column {} has more than one replicate value. \
                                 Only the first value {} will be used.",
                                row, column, replicates[0]
                            ))
                            .table(self.table.index)
                            .row(row)
                            .column(column)
                            .cell_text(text),
                        );
                }
                measurement.replicates = replicates
                    .first()
                    .copied();
            }
            HeaderKind::Strains => {
                let links = cell.text_with_url();
                measurement
                    .strains
                    .extend(
                        cells::names(text)
                            .iter()
                            .map(|name| NamedLink::lookup(name, &links)),
                    );
            }
            HeaderKind::Ods => {
                measurement.ods = cells::numbers(text)?;
            }
            HeaderKind::Temperature => {
                measurement.temperatures =
                    cells::values_with_unit(text, resolver, UnitCategory::Temperature)?;
            }
            HeaderKind::Timepoint => {
                measurement.timepoints = cells::values_with_unit(text, resolver, UnitCategory::Timepoint)?;
            }
            HeaderKind::Batch => {
                measurement.batches = cells::integers(text)?;
            }
            HeaderKind::Control => {
                measurement.control_reference = Some(ControlReference {
                    text: text.to_string(),
                    bookmark_ids: cell.bookmark_ids(),
                    captions: cells::captions(text),
                });
            }
            HeaderKind::ColumnId
            | HeaderKind::RowId
            | HeaderKind::DnaReactionConcentration
            | HeaderKind::NumNegControls => {
                let name = extra_column_name(kind);
                for value in cells::integers(text)? {
                    measurement
                        .contents
                        .push(ReagentEntry::new(
                            NamedLink::new(name),
                            Some(ReagentValue::Integer(value)),
                        ));
                }
            }
            HeaderKind::LabId | HeaderKind::TemplateDna => {
                let name = extra_column_name(kind);
                for value in cells::names(text) {
                    measurement
                        .contents
                        .push(ReagentEntry::new(
                            NamedLink::new(name),
                            Some(ReagentValue::Text(value)),
                        ));
                }
            }
            HeaderKind::RnaInhibitor => {
                let flag = cells::boolean_flag(text)
                    .ok_or_else(|| TableError::new(format!("{} is not a boolean value", text)))?;
                measurement
                    .contents
                    .push(ReagentEntry::new(
                        NamedLink::new(extra_column_name(kind)),
                        Some(ReagentValue::Flag(flag)),
                    ));
            }
            _ => {
                let entries = self.read_reagent(column, cell, text)?;
                measurement
                    .contents
                    .extend(entries);
            }
        }

        Ok(())
    }

    /// A reagent column holds either amounts of the reagent named in the
    /// header, or the names of media.
    fn read_reagent(&self, column: usize, cell: &Cell, text: &str) -> Result<Vec<ReagentEntry>, TableError> {
        let header = self
            .table
            .header_cell(column)
            .ok_or_else(|| TableError::new(format!("{} has no column header", text)))?;

        let resolver = &self
            .context
            .resolver;

        let (name, timepoint) = cells::reagent_header(&header.text(), &header.text_with_url(), resolver)?;

        if cells::is_valued(text) {
            let amounts = cells::values_with_unit(text, resolver, UnitCategory::Fluid)?;
            Ok(amounts
                .into_iter()
                .map(|amount| {
                    ReagentEntry::new(name.clone(), Some(ReagentValue::Amount(amount))).at(timepoint.clone())
                })
                .collect())
        } else if cells::is_number(text) {
            Err(TableError::new(format!("{} is missing a unit", text)))
        } else if cells::has_loose_number(text) {
            Err(TableError::new(format!(
                "{} contains digits but is not a valid value-unit form",
                text
            )))
        } else {
            let links = cell.text_with_url();
            Ok(cells::names(text)
                .into_iter()
                .map(|media| {
                    let media = NamedLink::lookup(&media, &links);
                    ReagentEntry::new(name.clone(), Some(ReagentValue::Named(media))).at(timepoint.clone())
                })
                .collect())
        }
    }
}

fn extra_column_name(kind: HeaderKind) -> &'static str {
    match kind {
        HeaderKind::ColumnId => "column_id",
        HeaderKind::RowId => "row_id",
        HeaderKind::LabId => "lab_id",
        _ => column_label(kind),
    }
}
