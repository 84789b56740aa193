//! Putting the parsed fragments together into the requests a document
//! produces.

use std::collections::BTreeMap;
use tracing::{debug, info};

use super::mapper::ReferenceMapper;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::document::DocumentSource;
use crate::intent::{
    ExperimentRunRequest, ExperimentSpecification, ExperimentStatusRequest, ExperimentStatusTable, LabIntent,
    MeasurementTableIntent, ParameterIntent, Request, Run,
};

const DOCUMENT_URL: &str = "https://docs.google.com/document/d/";

/// The address a document is referred to by in requests.
pub fn document_url(id: &str) -> String {
    format!("{}{}", DOCUMENT_URL, id)
}

/// Assemble the structured request. If the mapper cannot place the
/// document, the challenge problem and experiment reference are left
/// unset and a warning is recorded.
pub fn assemble_request(
    document: &dyn DocumentSource,
    lab: LabIntent,
    measurements: &[MeasurementTableIntent],
    parameters: Option<ParameterIntent>,
    mapper: Option<&dyn ReferenceMapper>,
    diagnostics: &mut Diagnostics,
) -> Request {
    let url = document_url(document.id());

    let mut challenge_problem = None;
    let mut experiment_reference = None;
    if let Some(mapper) = mapper {
        match mapper.map(&url) {
            Ok(reference) => {
                info!(
                    "Document is {} in {}",
                    reference.experiment_reference, reference.challenge_problem
                );
                challenge_problem = Some(reference.challenge_problem);
                experiment_reference = Some(reference.experiment_reference);
            }
            Err(error) => {
                debug!(?error);
                diagnostics.push(Diagnostic::warning(format!(
                    "Failed to map challenge problem for doc id {}: {}",
                    document.id(),
                    error.message()
                )));
            }
        }
    }

    let runs = measurements
        .iter()
        .map(|table| Run {
            measurements: table
                .measurements
                .clone(),
        })
        .collect();

    Request {
        name: document
            .title()
            .to_string(),
        challenge_problem,
        experiment_reference,
        experiment_reference_url: url,
        experiment_version: 1,
        lab,
        runs,
        parameters,
        doc_revision_id: document
            .revision_id()
            .to_string(),
    }
}

/// The request to run the experiment, from the parameter table. The
/// document's own address stands in when the table gives no experiment
/// reference URL; every other setting left blank is a warning.
pub fn assemble_run_request(
    document: &dyn DocumentSource,
    parameters: &ParameterIntent,
    diagnostics: &mut Diagnostics,
) -> ExperimentRunRequest {
    let mut request = ExperimentRunRequest::new(parameters);
    if request
        .experiment_reference_url_for_xplan
        .is_none()
    {
        request.experiment_reference_url_for_xplan = Some(document_url(document.id()));
    }

    for key in request.missing() {
        diagnostics.push(Diagnostic::warning(format!(
            "Parameter Table is missing a value for {}.",
            key
        )));
    }

    request
}

/// The status of each experiment in the document: the experiment ids from
/// the specification, and the statuses of every status table by caption.
/// Status tables without a caption cannot be referred to and are left out.
pub fn assemble_status_request(
    lab: &LabIntent,
    specification: Option<&ExperimentSpecification>,
    statuses: &[ExperimentStatusTable],
) -> ExperimentStatusRequest {
    let experiment_id = specification
        .map(|specification| {
            specification
                .experiments
                .clone()
        })
        .unwrap_or_default();

    let mut status_element = BTreeMap::new();
    for table in statuses {
        if let Some(caption) = table.caption {
            status_element.insert(
                caption,
                table
                    .statuses
                    .clone(),
            );
        }
    }

    ExperimentStatusRequest {
        lab: lab
            .lab()
            .to_string(),
        experiment_id,
        status_element,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::IntentParserError;
    use crate::document::Document;
    use crate::engine::mapper::{ExperimentReference, ReferenceTable};
    use crate::intent::{ExperimentStatus, StatusState};

    struct Failing;

    impl ReferenceMapper for Failing {
        fn map(&self, _url: &str) -> Result<ExperimentReference, IntentParserError> {
            Err(IntentParserError::Mapping("catalog unavailable".to_string()))
        }
    }

    fn document() -> Document {
        Document::new("1xyz", "Flow Cytometry - Round 2")
    }

    #[test]
    fn request_from_mapped_document() {
        let mut references = ReferenceTable::new();
        references.insert(
            "https://docs.google.com/document/d/1xyz",
            ExperimentReference {
                challenge_problem: "YEAST_STATES".to_string(),
                experiment_reference: "Flow-Round-2".to_string(),
            },
        );
        let mut diagnostics = Diagnostics::new();

        let request = assemble_request(
            &document(),
            LabIntent::default(),
            &[MeasurementTableIntent::default()],
            None,
            Some(&references),
            &mut diagnostics,
        );

        assert_eq!(request.name, "Flow Cytometry - Round 2");
        assert_eq!(request.experiment_reference_url, "https://docs.google.com/document/d/1xyz");
        assert_eq!(request.experiment_version, 1);
        assert_eq!(request.challenge_problem.as_deref(), Some("YEAST_STATES"));
        assert_eq!(request.experiment_reference.as_deref(), Some("Flow-Round-2"));
        assert_eq!(request.runs.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn mapping_failure_is_a_warning() {
        let mut diagnostics = Diagnostics::new();

        let request = assemble_request(&document(), LabIntent::default(), &[], None, Some(&Failing), &mut diagnostics);

        assert_eq!(request.challenge_problem, None);
        assert_eq!(request.experiment_reference, None);
        assert!(!diagnostics.has_errors());
        assert_eq!(
            diagnostics.warnings(),
            vec!["Failed to map challenge problem for doc id 1xyz: unable to map experiment reference: catalog unavailable"]
        );
    }

    #[test]
    fn run_request_defaults_reference_url() {
        let parameters = ParameterIntent {
            xplan_base_dir: Some("{experiment_id}".to_string()),
            plate_size: Some(96),
            protocol: Some("ObstacleCourse".to_string()),
            plate_number: Some(2),
            container_search_strings: vec!["Ga".to_string()],
            strain_property: Some("SD2_common_name".to_string()),
            xplan_path: Some("path".to_string()),
            protocol_id: Some("pr1e5gw8bdekdxv".to_string()),
            ..ParameterIntent::default()
        };
        let mut diagnostics = Diagnostics::new();

        let request = assemble_run_request(&document(), &parameters, &mut diagnostics);

        assert_eq!(
            request
                .experiment_reference_url_for_xplan
                .as_deref(),
            Some("https://docs.google.com/document/d/1xyz")
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn run_request_reports_missing_settings() {
        let parameters = ParameterIntent {
            protocol: Some("ObstacleCourse".to_string()),
            ..ParameterIntent::default()
        };
        let mut diagnostics = Diagnostics::new();

        assemble_run_request(&document(), &parameters, &mut diagnostics);

        let warnings = diagnostics.warnings();
        assert!(warnings.contains(&"Parameter Table is missing a value for plate_size.".to_string()));
        assert!(!warnings.contains(&"Parameter Table is missing a value for protocol.".to_string()));
    }

    #[test]
    fn status_request_by_caption() {
        let mut specification = ExperimentSpecification::default();
        specification
            .experiments
            .insert("experiment.tacc.abc".to_string(), 3);
        let statuses = vec![
            ExperimentStatusTable {
                table: 1,
                caption: Some(3),
                statuses: vec![ExperimentStatus {
                    status_type: Some("xplan_request_submitted".to_string()),
                    state: Some(StatusState::Flag(true)),
                    ..ExperimentStatus::default()
                }],
            },
            ExperimentStatusTable {
                table: 2,
                caption: None,
                statuses: Vec::new(),
            },
        ];

        let request = assemble_status_request(&LabIntent::default(), Some(&specification), &statuses);

        assert_eq!(request.lab, "tacc");
        assert_eq!(request.experiment_id.get("experiment.tacc.abc"), Some(&3));
        assert_eq!(request.status_element.len(), 1);
        assert_eq!(request.status_element[&3].len(), 1);
    }
}
