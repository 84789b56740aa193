//! Deciding what a table is about from the column names in its header row.

use std::collections::BTreeSet;
use tracing::debug;

use crate::cells;
use crate::document::{Cell, Row, Table};
use crate::tokens::HeaderKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    Lab,
    Control,
    Measurement,
    Parameter,
    ExperimentSpecification,
    ExperimentStatus,
    Unknown,
}

impl TableKind {
    pub fn name(&self) -> &'static str {
        match self {
            TableKind::Lab => "LAB",
            TableKind::Control => "CONTROL",
            TableKind::Measurement => "MEASUREMENT",
            TableKind::Parameter => "PARAMETER",
            TableKind::ExperimentSpecification => "EXPERIMENT_SPECIFICATION",
            TableKind::ExperimentStatus => "EXPERIMENT_STATUS",
            TableKind::Unknown => "UNKNOWN",
        }
    }
}

/// The kind of table a header row describes. Rules are tried in order and
/// the first whose column names are all present wins.
pub fn kind_of(headers: &BTreeSet<HeaderKind>) -> TableKind {
    let has = |required: &[HeaderKind]| {
        required
            .iter()
            .all(|kind| headers.contains(kind))
    };

    if has(&[
        HeaderKind::Replicate,
        HeaderKind::Strains,
        HeaderKind::MeasurementType,
        HeaderKind::FileType,
    ]) {
        TableKind::Measurement
    } else if has(&[HeaderKind::Parameter, HeaderKind::Value]) {
        TableKind::Parameter
    } else if has(&[HeaderKind::ControlType]) {
        TableKind::Control
    } else if has(&[
        HeaderKind::PipelineStatus,
        HeaderKind::LastUpdated,
        HeaderKind::State,
        HeaderKind::Path,
    ]) {
        TableKind::ExperimentStatus
    } else if has(&[HeaderKind::ExperimentId, HeaderKind::ExperimentStatus]) {
        TableKind::ExperimentSpecification
    } else {
        TableKind::Unknown
    }
}

fn headers_of(row: &Row) -> Vec<HeaderKind> {
    row.cells
        .iter()
        .map(|cell| cells::header_kind(&cell.text()))
        .collect()
}

fn is_lab(table: &Table) -> bool {
    table.column_count() == 1
        && table
            .cell(0, 0)
            .is_some_and(|cell| cells::starts_with_lab(&cell.text()))
}

/// A document table together with what classification found out about
/// it: its kind, its caption index, and where its header and data are.
#[derive(Debug, Clone)]
pub struct IntentTable<'d> {
    pub index: usize,
    pub kind: TableKind,
    pub caption: Option<u32>,
    pub header_row: Option<usize>,
    headers: Vec<HeaderKind>,
    source: &'d Table,
}

impl<'d> IntentTable<'d> {
    /// Classify the `index`th table of a document. The header row is the
    /// first row whose column names identify a kind of table; any row above
    /// it may carry the `Table N` caption.
    pub fn new(index: usize, source: &'d Table) -> IntentTable<'d> {
        if is_lab(source) {
            debug!("Table {} is a lab table", index);
            return IntentTable {
                index,
                kind: TableKind::Lab,
                caption: None,
                header_row: None,
                headers: Vec::new(),
                source,
            };
        }

        for (i, row) in source
            .rows
            .iter()
            .enumerate()
        {
            let headers = headers_of(row);
            let kind = kind_of(
                &headers
                    .iter()
                    .copied()
                    .collect(),
            );
            if kind == TableKind::Unknown {
                continue;
            }

            let caption = source.rows[..i]
                .iter()
                .filter_map(|row| row.cells.first())
                .find_map(|cell| cells::caption_index(&cell.text()));

            debug!(
                "Table {} is a {} table with header at row {}",
                index,
                kind.name(),
                i
            );
            return IntentTable {
                index,
                kind,
                caption,
                header_row: Some(i),
                headers,
                source,
            };
        }

        debug!("Table {} is not recognised", index);
        IntentTable {
            index,
            kind: TableKind::Unknown,
            caption: None,
            header_row: None,
            headers: Vec::new(),
            source,
        }
    }

    pub fn source(&self) -> &'d Table {
        self.source
    }

    /// The column name of a column, by its header cell.
    pub fn header(&self, column: usize) -> HeaderKind {
        self.headers
            .get(column)
            .copied()
            .unwrap_or(HeaderKind::Unknown)
    }

    pub fn header_cell(&self, column: usize) -> Option<&'d Cell> {
        let row = self.header_row?;
        self.source
            .cell(row, column)
    }

    /// The rows following the header, with their index in the table. A lab
    /// table has no header and all its rows are data.
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &'d Row)> {
        let start = match self.header_row {
            Some(row) => row + 1,
            None => 0,
        };
        self.source
            .rows
            .iter()
            .enumerate()
            .skip(start)
    }
}
