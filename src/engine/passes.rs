use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::assembler;
use super::linker;
use super::mapper::ReferenceMapper;
use super::validator::{self, Validator};
use crate::diagnostics::{Diagnostic, Diagnostics, IntentParserError};
use crate::document::DocumentSource;
use crate::intent::{
    ControlTableIntent, ExperimentRunRequest, ExperimentSpecification, ExperimentStatusRequest,
    ExperimentStatusTable, LabIntent, MeasurementTableIntent, ParameterIntent, ProtocolInterface, Request,
};
use crate::tables::{self, IntentTable, TableContext, TableKind};
use crate::units::Catalog;

/// What classification made of one table of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub index: usize,
    pub kind: &'static str,
    pub caption: Option<u32>,
}

/// Everything produced from one document. `diagnostics` covers reading the
/// tables and the structured request; the run and status requests carry
/// their own, as they are only of interest when asked for.
#[derive(Debug)]
pub struct Outcome {
    pub request: Request,
    pub protocol: Result<ProtocolInterface, IntentParserError>,
    pub run_request: Option<ExperimentRunRequest>,
    pub run_diagnostics: Diagnostics,
    pub status_request: ExperimentStatusRequest,
    pub status_diagnostics: Diagnostics,
    pub controls: Vec<ControlTableIntent>,
    pub tables: Vec<TableSummary>,
    pub diagnostics: Diagnostics,
}

/// Drives the passes over a document. The catalog, schema and reference
/// mapper are shared and read-only; each call to `process()` owns its
/// diagnostics, so an engine is consumed by the document it processes.
pub struct Engine<'c> {
    context: TableContext<'c>,
    validator: Option<&'c Validator>,
    mapper: Option<&'c dyn ReferenceMapper>,
    diagnostics: Diagnostics,
}

impl<'c> Engine<'c> {
    pub fn new(catalog: &'c Catalog) -> Engine<'c> {
        Engine {
            context: TableContext::new(catalog),
            validator: None,
            mapper: None,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn with_validator(mut self, validator: &'c Validator) -> Engine<'c> {
        self.validator = Some(validator);
        self
    }

    pub fn with_mapper(mut self, mapper: &'c dyn ReferenceMapper) -> Engine<'c> {
        self.mapper = Some(mapper);
        self
    }

    pub fn process(mut self, document: &dyn DocumentSource) -> Outcome {
        info!("Processing {}", document.title());

        let classified: Vec<IntentTable> = document
            .tables()
            .iter()
            .enumerate()
            .map(|(i, table)| IntentTable::new(i, table))
            .collect();

        self.check_captions(&classified);

        let lab = self.read_lab(&of_kind(&classified, TableKind::Lab));

        let controls: Vec<ControlTableIntent> = of_kind(&classified, TableKind::Control)
            .into_iter()
            .map(|table| tables::parse_controls(table, &self.context, &mut self.diagnostics))
            .collect();

        let specifications: Vec<ExperimentSpecification> = of_kind(&classified, TableKind::ExperimentSpecification)
            .into_iter()
            .map(|table| tables::parse_specification(table, &self.context, &mut self.diagnostics))
            .collect();

        let statuses: Vec<ExperimentStatusTable> = of_kind(&classified, TableKind::ExperimentStatus)
            .into_iter()
            .map(|table| tables::parse_statuses(table, &self.context, &mut self.diagnostics))
            .collect();

        let mut measurements: Vec<MeasurementTableIntent> = of_kind(&classified, TableKind::Measurement)
            .into_iter()
            .map(|table| tables::parse_measurements(table, &self.context, &mut self.diagnostics))
            .collect();

        let parameters = self.read_parameters(&of_kind(&classified, TableKind::Parameter));

        debug!(
            "Read {} control tables, {} measurement tables, {} status tables",
            controls.len(),
            measurements.len(),
            statuses.len()
        );

        linker::link_controls(&mut measurements, &controls, document, &mut self.diagnostics);
        linker::check_specifications(&specifications, &statuses, &mut self.diagnostics);

        let mut status_diagnostics = Diagnostics::new();
        let status_request = self.status_request(&lab, &specifications, &statuses, &mut status_diagnostics);

        let mut run_diagnostics = Diagnostics::new();
        let run_request = match &parameters {
            Some(parameters) => Some(assembler::assemble_run_request(
                document,
                parameters,
                &mut run_diagnostics,
            )),
            None => {
                run_diagnostics.push(Diagnostic::warning(
                    "Cannot execute experiment without a parameter table.",
                ));
                None
            }
        };

        let request = assembler::assemble_request(
            document,
            lab,
            &measurements,
            parameters,
            self.mapper,
            &mut self.diagnostics,
        );

        self.validate(&request);

        let protocol = ProtocolInterface::build(&request, &controls);

        let tables = classified
            .iter()
            .map(|table| TableSummary {
                index: table.index,
                kind: table
                    .kind
                    .name(),
                caption: table.caption,
            })
            .collect();

        info!(
            "Finished {} with {} errors and {} warnings",
            document.title(),
            self.diagnostics
                .errors()
                .len(),
            self.diagnostics
                .warnings()
                .len()
        );

        Outcome {
            request,
            protocol,
            run_request,
            run_diagnostics,
            status_request,
            status_diagnostics,
            controls,
            tables,
            diagnostics: self.diagnostics,
        }
    }

    /// Caption indices identify tables, so no two tables may share one.
    fn check_captions(&mut self, classified: &[IntentTable]) {
        let mut seen: BTreeMap<u32, usize> = BTreeMap::new();

        for table in classified {
            let Some(caption) = table.caption else {
                continue;
            };
            match seen.get(&caption) {
                Some(first) => {
                    self.diagnostics
                        .push(
                            Diagnostic::error(format!(
                                "There are more than one table with {} as a table caption index: tables {} and {}",
                                caption, first, table.index
                            ))
                            .table(table.index),
                        );
                }
                None => {
                    seen.insert(caption, table.index);
                }
            }
        }
    }

    fn read_lab(&mut self, labs: &[&IntentTable]) -> LabIntent {
        match labs {
            [] => {
                self.diagnostics
                    .push(Diagnostic::warning(
                        "No lab table specified in this experiment. Generated default values for lab contents.",
                    ));
                LabIntent::default()
            }
            [.., last] => {
                if labs.len() > 1 {
                    warn!("{} lab tables found", labs.len());
                    self.diagnostics
                        .push(Diagnostic::warning(
                            "There is more than one lab table specified in this experiment. Only the last lab table identified in the document will be used for generating a request.",
                        ));
                }
                tables::parse_lab(last, &self.context, &mut self.diagnostics)
            }
        }
    }

    fn read_parameters(&mut self, parameters: &[&IntentTable]) -> Option<ParameterIntent> {
        let last = parameters.last()?;
        if parameters.len() > 1 {
            self.diagnostics
                .push(Diagnostic::warning(
                    "There are more than one parameter table specified in this experiment. Only the last parameter table identified in the document will be used for generating a request.",
                ));
        }
        Some(tables::parse_parameters(last, &self.context, &mut self.diagnostics))
    }

    fn status_request(
        &self,
        lab: &LabIntent,
        specifications: &[ExperimentSpecification],
        statuses: &[ExperimentStatusTable],
        diagnostics: &mut Diagnostics,
    ) -> ExperimentStatusRequest {
        if specifications.is_empty() {
            diagnostics.push(Diagnostic::warning(
                "No experiment specification table to parse from document.",
            ));
        } else if specifications.len() > 1 {
            diagnostics.push(Diagnostic::warning(
                "More than one experiment specification table found. Only the last table is used.",
            ));
        }
        if statuses.is_empty() {
            diagnostics.push(Diagnostic::warning(
                "No experiment status table to parse from document.",
            ));
        }

        assembler::assemble_status_request(lab, specifications.last(), statuses)
    }

    /// Schema validation, then the walk for reagents without a URI. Both
    /// only add diagnostics.
    fn validate(&mut self, request: &Request) {
        let value = match serde_json::to_value(request) {
            Ok(value) => value,
            Err(error) => {
                self.diagnostics
                    .push(Diagnostic::error(
                        IntentParserError::Generic(error.to_string()).message(),
                    ));
                return;
            }
        };

        if let Some(validator) = self.validator {
            validator.validate(&value, &mut self.diagnostics);
        }
        validator::missing_uris(&value, &mut self.diagnostics);
    }
}

fn of_kind<'t, 'd>(classified: &'t [IntentTable<'d>], kind: TableKind) -> Vec<&'t IntentTable<'d>> {
    classified
        .iter()
        .filter(|table| table.kind == kind)
        .collect()
}
