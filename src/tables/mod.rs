//! Classifying the tables of a document and reading each kind of table into
//! its intent fragment.

use crate::tokens::HeaderKind;
use crate::units::{Catalog, UnitResolver};

mod classifier;
mod control;
mod lab;
mod measurement;
mod parameter;
mod specification;
mod status;

pub use classifier::{kind_of, IntentTable, TableKind};
pub use control::parse_controls;
pub use lab::parse_lab;
pub use measurement::parse_measurements;
pub use parameter::parse_parameters;
pub use specification::parse_specification;
pub use status::parse_statuses;

/// What every table parser reads against: the catalog of known terms and
/// a unit resolver over it.
#[derive(Debug, Clone, Copy)]
pub struct TableContext<'c> {
    pub catalog: &'c Catalog,
    pub resolver: UnitResolver<'c>,
}

impl<'c> TableContext<'c> {
    pub fn new(catalog: &'c Catalog) -> TableContext<'c> {
        TableContext {
            catalog,
            resolver: UnitResolver::new(catalog),
        }
    }
}

/// The column name as it is written in messages about the column.
pub fn column_label(kind: HeaderKind) -> &'static str {
    match kind {
        HeaderKind::Batch => "batch",
        HeaderKind::Channel => "Channel",
        HeaderKind::ColumnId => "Column_id",
        HeaderKind::Contents => "Contents",
        HeaderKind::ControlType => "Control Type",
        HeaderKind::Control => "control",
        HeaderKind::DnaReactionConcentration => "DNA Reaction Concentration",
        HeaderKind::ExperimentId => "Experiment_id",
        HeaderKind::ExperimentStatus => "Experiment Status",
        HeaderKind::FileType => "file-type",
        HeaderKind::LabId => "Lab_id",
        HeaderKind::LastUpdated => "Last Update",
        HeaderKind::MeasurementType => "measurement-type",
        HeaderKind::Notes => "notes",
        HeaderKind::NumNegControls => "Number of Negative Controls",
        HeaderKind::Ods => "ods",
        HeaderKind::Path => "Output From Pipeline",
        HeaderKind::Parameter => "Parameter",
        HeaderKind::Value => "Value",
        HeaderKind::PipelineStatus => "Pipeline Status",
        HeaderKind::Replicate => "replicate",
        HeaderKind::RnaInhibitor => "Use RNAse Inhibitor in Reaction",
        HeaderKind::RowId => "Row_id",
        HeaderKind::Samples => "samples",
        HeaderKind::State => "Processed",
        HeaderKind::Strains => "Strains",
        HeaderKind::TemplateDna => "Template DNA",
        HeaderKind::Temperature => "temperature",
        HeaderKind::Timepoint => "Timepoint",
        HeaderKind::Unknown => "reagent/media",
    }
}
