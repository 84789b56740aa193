//! Resolving references between tables once every table has been read:
//! measurements to the control tables they name, and experiment
//! specifications to status tables.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::cells;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::document::DocumentSource;
use crate::intent::{
    ControlIntent, ControlReference, ControlTableIntent, ExperimentSpecification, ExperimentStatusTable,
    MeasurementTableIntent,
};

/// Control tables keyed by caption index and by the bookmarks in them.
pub struct ControlIndex<'a> {
    by_caption: BTreeMap<u32, &'a ControlTableIntent>,
    by_bookmark: BTreeMap<&'a str, &'a ControlTableIntent>,
}

impl<'a> ControlIndex<'a> {
    pub fn new(tables: &'a [ControlTableIntent]) -> ControlIndex<'a> {
        let mut by_caption = BTreeMap::new();
        let mut by_bookmark = BTreeMap::new();

        for table in tables {
            if let Some(caption) = table.caption {
                by_caption.insert(caption, table);
            }
            for id in &table.bookmark_ids {
                by_bookmark.insert(id.as_str(), table);
            }
        }

        ControlIndex {
            by_caption,
            by_bookmark,
        }
    }

    /// The controls a reference points at. Bookmarks are tried first, both
    /// as bookmarks inside a control table and as bookmarks whose label is a
    /// `Table N` caption; if none of them lead anywhere the captions written
    /// in the cell are used.
    pub fn resolve(&self, reference: &ControlReference, document: &dyn DocumentSource) -> Vec<ControlIntent> {
        let mut tables: Vec<&ControlTableIntent> = Vec::new();

        for id in &reference.bookmark_ids {
            let table = self
                .by_bookmark
                .get(id.as_str())
                .copied()
                .or_else(|| {
                    let label = document.bookmark(id)?;
                    let caption = cells::caption_index(label)?;
                    self.by_caption
                        .get(&caption)
                        .copied()
                });
            if let Some(table) = table {
                if !tables.contains(&table) {
                    tables.push(table);
                }
            }
        }

        if tables.is_empty() {
            for caption in &reference.captions {
                if let Some(table) = self
                    .by_caption
                    .get(caption)
                    .copied()
                {
                    if !tables.contains(&table) {
                        tables.push(table);
                    }
                }
            }
        }

        tables
            .into_iter()
            .flat_map(|table| {
                table
                    .controls
                    .iter()
                    .cloned()
            })
            .collect()
    }
}

/// Attach controls to every measurement that refers to them. A reference
/// that leads nowhere is reported and the measurement keeps no controls.
pub fn link_controls(
    measurements: &mut [MeasurementTableIntent],
    controls: &[ControlTableIntent],
    document: &dyn DocumentSource,
    diagnostics: &mut Diagnostics,
) {
    let index = ControlIndex::new(controls);

    for table in measurements.iter_mut() {
        for measurement in table
            .measurements
            .iter_mut()
        {
            let Some(reference) = &measurement.control_reference else {
                continue;
            };

            let resolved = index.resolve(reference, document);
            if resolved.is_empty() {
                let message = if controls.is_empty() {
                    format!(
                        "Unable to process controls from a Measurement table without Control Tables: {} was not found.",
                        reference.text
                    )
                } else {
                    format!(
                        "Measurement table at row {} refers to controls that were not found: {}",
                        measurement.row, reference.text
                    )
                };
                diagnostics.push(
                    Diagnostic::warning(message)
                        .table(table.table)
                        .row(measurement.row)
                        .cell_text(
                            reference
                                .text
                                .clone(),
                        ),
                );
            }

            debug!(
                "Measurement at row {} of table {} has {} controls",
                measurement.row,
                table.table,
                resolved.len()
            );
            measurement.controls = resolved;
        }
    }
}

/// Check that every experiment in a specification refers to a status table
/// that exists.
pub fn check_specifications(
    specifications: &[ExperimentSpecification],
    statuses: &[ExperimentStatusTable],
    diagnostics: &mut Diagnostics,
) {
    let captions: BTreeSet<u32> = statuses
        .iter()
        .filter_map(|table| table.caption)
        .collect();

    for specification in specifications {
        for (experiment, caption) in &specification.experiments {
            if !captions.contains(caption) {
                diagnostics.push(
                    Diagnostic::warning(format!(
                        "{} refers to Table {}, which is not an experiment status table",
                        experiment, caption
                    ))
                    .table(specification.table),
                );
            }
        }
    }
}
