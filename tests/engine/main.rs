#[cfg(test)]
mod verify {
    use serde_json::json;

    use intent_parser::diagnostics::IntentParserError;
    use intent_parser::document::{Cell, Document, Run, Table};
    use intent_parser::engine::{Engine, ExperimentReference, ReferenceMapper, ReferenceTable, Validator};
    use intent_parser::units::Catalog;

    fn lab() -> Table {
        Table::from_text(&[&["Lab: Ginkgo"], &["Experiment_Id: 19606"]])
    }

    fn controls() -> Table {
        Table::from_text(&[
            &["Table 1: Controls", "", "", ""],
            &["Control Type", "Strains", "Channel", "Contents"],
            &["HIGH_FITC", "MG1655", "BL1-A", "beta_estradiol 0.05 micromole"],
        ])
    }

    fn measurements() -> Table {
        Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains", "IPTG", "Control"],
            &["FLOW", "FCS", "4", "MG1655", "0.5 mM", "Table 1"],
            &["PLATE_READER", "CSV", "2", "MG1655_LPV3", "1 mM", ""],
        ])
    }

    fn parameters() -> Table {
        Table::from_text(&[
            &["Parameter", "Value"],
            &["Protocol", "ObstacleCourse"],
            &["Plate Size", "96"],
            &["Inoculation volume", "5 microliter"],
        ])
    }

    fn document() -> Document {
        Document::new("1xyz", "Flow Cytometry - Round 2")
            .with_table(lab())
            .with_table(controls())
            .with_table(measurements())
            .with_table(parameters())
    }

    #[test]
    fn whole_document() {
        let catalog = Catalog::default();
        let validator = Validator::bundled().unwrap();
        let document = document();

        let outcome = Engine::new(&catalog)
            .with_validator(&validator)
            .process(&document);

        assert_eq!(outcome.diagnostics.errors(), Vec::<String>::new());

        let warnings = outcome
            .diagnostics
            .warnings();
        assert!(warnings.contains(&"IPTG does not have a SBH URI.".to_string()));
        assert!(warnings.contains(&"beta_estradiol does not have a SBH URI.".to_string()));

        let request = serde_json::to_value(&outcome.request).unwrap();
        assert_eq!(request["name"], "Flow Cytometry - Round 2");
        assert_eq!(request["challenge_problem"], "Undefined");
        assert_eq!(request["experiment_reference"], "Unknown");
        assert_eq!(request["experiment_reference_url"], "https://docs.google.com/document/d/1xyz");
        assert_eq!(request["experiment_id"], "experiment.ginkgo.19606");
        assert_eq!(request["lab"], "Ginkgo");
        assert_eq!(
            request["runs"]
                .as_array()
                .map(Vec::len),
            Some(1)
        );

        let first = &request["runs"][0]["measurements"][0];
        assert_eq!(first["measurement_type"], "FLOW");
        assert_eq!(first["controls"][0]["type"], "HIGH_FITC");
        assert_eq!(first["controls"][0]["channel"], "BL1-A");

        let second = &request["runs"][0]["measurements"][1];
        assert!(second
            .get("controls")
            .is_none());

        assert_eq!(
            request["parameters"],
            json!([{"inoc_info.inoc_vol": "5:microliter"}])
        );

        assert!(outcome
            .protocol
            .is_ok());
        let run_request = outcome
            .run_request
            .unwrap();
        assert_eq!(run_request.plate_size, Some(96));
        assert_eq!(
            run_request
                .experiment_reference_url_for_xplan
                .as_deref(),
            Some("https://docs.google.com/document/d/1xyz")
        );

        let kinds: Vec<&str> = outcome
            .tables
            .iter()
            .map(|table| table.kind)
            .collect();
        assert_eq!(kinds.len(), 4);
    }

    #[test]
    fn controls_by_bookmark() {
        let catalog = Catalog::default();

        let mut controls = Table::from_text(&[&["Control Type", "Strains"], &["BASELINE", "MG1655"]]);
        controls.rows[1].cells[0] = Cell::from_runs(vec![Run::new("BASELINE").with_bookmark("id.baseline")]);

        let mut measurements = measurements();
        measurements.rows[1].cells[5] = Cell::from_runs(vec![Run::new("baseline controls").with_bookmark("id.baseline")]);

        let document = Document::new("1", "bookmarks")
            .with_table(lab())
            .with_table(controls)
            .with_table(measurements);

        let outcome = Engine::new(&catalog).process(&document);

        let measurement = &outcome.request.runs[0].measurements[0];
        assert_eq!(measurement.controls.len(), 1);
        assert_eq!(
            measurement.controls[0]
                .control_type
                .as_deref(),
            Some("BASELINE")
        );
    }

    #[test]
    fn unresolved_controls_warn() {
        let catalog = Catalog::default();
        let mut measurements = measurements();
        measurements.rows[1].cells[5] = Cell::from("Table 8");

        let document = Document::new("1", "unresolved")
            .with_table(lab())
            .with_table(controls())
            .with_table(measurements);

        let outcome = Engine::new(&catalog).process(&document);

        assert!(!outcome
            .diagnostics
            .has_errors());
        assert!(outcome
            .diagnostics
            .warnings()
            .contains(&"Measurement table at row 1 refers to controls that were not found: Table 8".to_string()));
        assert!(outcome.request.runs[0].measurements[0]
            .controls
            .is_empty());
    }

    #[test]
    fn errors_do_not_stop_parsing() {
        let catalog = Catalog::default();
        let measurements = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains", "temperature"],
            &["FLOW", "FCS", "4", "MG1655", "30 parsecs"],
            &["TELEPATHY", "FCS", "2", "MG1655", "30 c"],
            &["PLATE_READER", "CSV", "2", "MG1655", "37 celsius"],
        ]);
        let document = Document::new("1", "errors")
            .with_table(lab())
            .with_table(measurements);

        let outcome = Engine::new(&catalog).process(&document);

        assert_eq!(
            outcome
                .diagnostics
                .errors()
                .len(),
            2
        );
        let run = &outcome.request.runs[0];
        assert_eq!(run.measurements.len(), 3);
        assert!(run.measurements[0]
            .temperatures
            .is_empty());
        assert_eq!(run.measurements[1].measurement_type, None);
        assert_eq!(run.measurements[2].temperatures[0].unit, "celsius");
    }

    #[test]
    fn schema_violations_are_errors() {
        let catalog = Catalog::default();
        let validator = Validator::bundled().unwrap();
        let measurements = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains"],
            &["", "", "4", "MG1655"],
        ]);
        let document = Document::new("1", "invalid")
            .with_table(lab())
            .with_table(measurements);

        let outcome = Engine::new(&catalog)
            .with_validator(&validator)
            .process(&document);

        assert!(outcome
            .diagnostics
            .has_errors());
        assert!(outcome
            .diagnostics
            .errors()
            .iter()
            .all(|message| message.starts_with("Schema Validation Error: ")));
        assert_eq!(outcome.request.runs[0].measurements.len(), 1);
    }

    #[test]
    fn mapped_references() {
        let catalog = Catalog::default();
        let mut references = ReferenceTable::new();
        references.insert(
            "https://docs.google.com/document/d/1xyz",
            ExperimentReference {
                challenge_problem: "NOVEL_CHASSIS".to_string(),
                experiment_reference: "NovelChassis-Round-2".to_string(),
            },
        );

        let document = document();
        let outcome = Engine::new(&catalog)
            .with_mapper(&references)
            .process(&document);

        let request = serde_json::to_value(&outcome.request).unwrap();
        assert_eq!(request["challenge_problem"], "NOVEL_CHASSIS");
        assert_eq!(request["experiment_reference"], "NovelChassis-Round-2");
    }

    struct Unreachable;

    impl ReferenceMapper for Unreachable {
        fn map(&self, url: &str) -> Result<ExperimentReference, IntentParserError> {
            Err(IntentParserError::Mapping(url.to_string()))
        }
    }

    #[test]
    fn mapping_failure_uses_placeholders() {
        let catalog = Catalog::default();
        let document = document();

        let outcome = Engine::new(&catalog)
            .with_mapper(&Unreachable)
            .process(&document);

        let request = serde_json::to_value(&outcome.request).unwrap();
        assert_eq!(request["challenge_problem"], "Undefined");
        assert_eq!(request["experiment_reference"], "Unknown");
        assert!(outcome
            .diagnostics
            .warnings()
            .iter()
            .any(|message| message.starts_with("Failed to map challenge problem for doc id 1xyz")));
    }

    #[test]
    fn status_request() {
        let catalog = Catalog::default();
        let specification = Table::from_text(&[
            &["Experiment Id", "Experiment Status"],
            &["experiment.ginkgo.19606", "Table 2"],
            &["experiment.ginkgo.19607", "Table 3"],
        ]);
        let statuses = Table::from_text(&[
            &["Table 2", "", "", ""],
            &["Pipeline Status", "Last Updated", "Processed", "Output From Pipeline"],
            &["Uploaded", "2020/06/30 21:12:31", "Succeeded", "/data/uploads"],
        ]);
        let document = Document::new("1", "status")
            .with_table(lab())
            .with_table(specification)
            .with_table(statuses);

        let outcome = Engine::new(&catalog).process(&document);

        assert_eq!(
            serde_json::to_value(&outcome.status_request).unwrap(),
            json!({
                "lab": "Ginkgo",
                "experiment_id": {
                    "experiment.ginkgo.19606": 2,
                    "experiment.ginkgo.19607": 3
                },
                "status_element": {
                    "2": [{
                        "status_type": "uploaded",
                        "last_updated": "2020-06-30T21:12:31",
                        "state": true,
                        "path": "/data/uploads"
                    }]
                }
            })
        );
        assert!(outcome
            .diagnostics
            .warnings()
            .contains(&"experiment.ginkgo.19607 refers to Table 3, which is not an experiment status table".to_string()));
        assert!(outcome
            .status_diagnostics
            .is_empty());
    }

    #[test]
    fn no_parameter_table() {
        let catalog = Catalog::default();
        let document = Document::new("1", "bare").with_table(lab());

        let outcome = Engine::new(&catalog).process(&document);

        assert!(outcome
            .run_request
            .is_none());
        assert_eq!(
            outcome
                .run_diagnostics
                .warnings(),
            vec!["Cannot execute experiment without a parameter table."]
        );
        assert!(matches!(outcome.protocol, Err(IntentParserError::Generic(_))));
    }
}
