#[cfg(test)]
mod verify {
    use serde_json::json;

    use intent_parser::cells;
    use intent_parser::diagnostics::Diagnostics;
    use intent_parser::document::{Cell, Run, Table};
    use intent_parser::intent::{ControlTableIntent, LabIntent, MeasurementTableIntent, ReagentValue};
    use intent_parser::tables::{self, IntentTable, TableContext, TableKind};
    use intent_parser::units::{Catalog, Quantity, UnitCategory, UnitResolver};

    fn measurements(table: &Table) -> (MeasurementTableIntent, Diagnostics) {
        let catalog = Catalog::default();
        let context = TableContext::new(&catalog);
        let view = IntentTable::new(0, table);
        assert_eq!(view.kind, TableKind::Measurement);

        let mut diagnostics = Diagnostics::new();
        let result = tables::parse_measurements(&view, &context, &mut diagnostics);
        (result, diagnostics)
    }

    fn controls(table: &Table) -> (ControlTableIntent, Diagnostics) {
        let catalog = Catalog::default();
        let context = TableContext::new(&catalog);
        let view = IntentTable::new(0, table);
        assert_eq!(view.kind, TableKind::Control);

        let mut diagnostics = Diagnostics::new();
        let result = tables::parse_controls(&view, &context, &mut diagnostics);
        (result, diagnostics)
    }

    fn lab(table: &Table) -> (LabIntent, Diagnostics) {
        let catalog = Catalog::default();
        let context = TableContext::new(&catalog);
        let view = IntentTable::new(0, table);
        assert_eq!(view.kind, TableKind::Lab);

        let mut diagnostics = Diagnostics::new();
        let result = tables::parse_lab(&view, &context, &mut diagnostics);
        (result, diagnostics)
    }

    #[test]
    fn fluid_unit_propagated() {
        let catalog = Catalog {
            fluid_units: vec!["X".to_string()],
            ..Catalog::default()
        };
        let resolver = UnitResolver::new(&catalog);

        let values = cells::values_with_unit("1, 2, 3 fold", &resolver, UnitCategory::Fluid).unwrap();
        assert_eq!(
            values,
            vec![
                Quantity::new(1.0, "X"),
                Quantity::new(2.0, "X"),
                Quantity::new(3.0, "X")
            ]
        );
    }

    #[test]
    fn fluid_unit_per_pair() {
        let catalog = Catalog {
            fluid_units: vec!["X".to_string()],
            ..Catalog::default()
        };
        let resolver = UnitResolver::new(&catalog);

        let values = cells::values_with_unit("1 X, 2 X, 3 X", &resolver, UnitCategory::Fluid).unwrap();
        assert_eq!(
            values,
            vec![
                Quantity::new(1.0, "X"),
                Quantity::new(2.0, "X"),
                Quantity::new(3.0, "X")
            ]
        );
    }

    #[test]
    fn temperature_abbreviation() {
        let catalog = Catalog {
            temperature_units: vec!["celsius".to_string()],
            ..Catalog::default()
        };
        let resolver = UnitResolver::new(&catalog);

        let values = cells::values_with_unit("25 c, 30 c", &resolver, UnitCategory::Temperature).unwrap();
        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            json!([
                {"value": 25.0, "unit": "celsius"},
                {"value": 30.0, "unit": "celsius"}
            ])
        );
    }

    #[test]
    fn measurement_row() {
        let table = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains"],
            &["FLOW", "FCS", "4", "MG1655, MG1655_LPV3"],
        ]);
        let (result, diagnostics) = measurements(&table);

        assert!(diagnostics.is_empty());
        assert_eq!(result.measurements.len(), 1);
        assert_eq!(
            serde_json::to_value(&result.measurements[0]).unwrap(),
            json!({
                "measurement_type": "FLOW",
                "file_type": ["FCS"],
                "replicates": 4,
                "strains": ["MG1655", "MG1655_LPV3"]
            })
        );
    }

    #[test]
    fn reagent_column_with_timepoint() {
        let table = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains", "IPTG @ 5 hour"],
            &["FLOW", "FCS", "1", "MG1655", "0.0 mM, 7e-5 mM"],
        ]);
        let (result, diagnostics) = measurements(&table);

        assert!(diagnostics.is_empty());
        let value = serde_json::to_value(&result.measurements[0]).unwrap();
        let contents = &value["contents"][0];
        assert_eq!(
            contents
                .as_array()
                .map(Vec::len),
            Some(2)
        );
        for entry in contents
            .as_array()
            .unwrap()
        {
            assert_eq!(entry["name"]["label"], "IPTG");
            assert_eq!(entry["unit"], "mM");
            assert_eq!(entry["timepoint"], json!({"value": 5.0, "unit": "hour"}));
        }
        assert_eq!(contents[0]["value"], json!(0.0));
        assert_eq!(contents[1]["value"], json!(7e-5));
    }

    #[test]
    fn lab_and_experiment_id() {
        let table = Table::from_text(&[&["lab: tacc"], &["experiment_id: abc"]]);
        let (result, diagnostics) = lab(&table);

        assert!(diagnostics.is_empty());
        assert_eq!(result.lab(), "tacc");
        assert_eq!(result.qualified_experiment_id(), "experiment.tacc.abc");

        let table = Table::from_text(&[&["lab: tacc"]]);
        let (result, _) = lab(&table);
        assert_eq!(result.qualified_experiment_id(), "experiment.tacc.TBD");
    }

    #[test]
    fn empty_cells_are_absent() {
        let table = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains", "ods"],
            &["FLOW", "FCS", "2", "MG1655", ""],
            &["", "", "", "", " \u{000B} "],
        ]);
        let (result, diagnostics) = measurements(&table);

        assert!(diagnostics.is_empty());
        assert_eq!(result.measurements.len(), 1);
        assert!(result.measurements[0]
            .ods
            .is_empty());
    }

    #[test]
    fn vertical_tab_prefix_stripped() {
        let table = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains"],
            &["FLOW", "FCS", "2", "\u{000B}MG1655"],
        ]);
        let (result, _) = measurements(&table);

        assert_eq!(result.measurements[0].strains[0].label, "MG1655");
    }

    #[test]
    fn several_replicates_take_first() {
        let table = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains"],
            &["FLOW", "FCS", "3, 5", "MG1655"],
        ]);
        let (result, diagnostics) = measurements(&table);

        assert_eq!(result.measurements[0].replicates, Some(3));
        assert!(!diagnostics.has_errors());
        assert_eq!(
            diagnostics
                .warnings()
                .len(),
            1
        );
    }

    #[test]
    fn reagent_without_unit_is_an_error() {
        let table = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains", "IPTG"],
            &["FLOW", "FCS", "2", "MG1655", "1, 2"],
            &["FLOW", "FCS", "3", "MG1655", "5 mM"],
        ]);
        let (result, diagnostics) = measurements(&table);

        assert_eq!(
            diagnostics.errors(),
            vec!["Measurement table at row 1 column 4 has invalid reagent/media value: 1, 2 is missing a unit"]
        );
        assert_eq!(result.measurements.len(), 2);
        assert!(result.measurements[0]
            .contents
            .is_empty());
        assert_eq!(
            result.measurements[1]
                .contents
                .len(),
            1
        );
        assert_eq!(result.measurements[1].replicates, Some(3));
    }

    #[test]
    fn media_names_in_reagent_column() {
        let table = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains", "Media"],
            &["FLOW", "FCS", "2", "MG1655", "SC Media"],
        ]);
        let (result, diagnostics) = measurements(&table);

        assert!(diagnostics.is_empty());
        let value = serde_json::to_value(&result.measurements[0]).unwrap();
        assert_eq!(value["contents"][0][0]["name"]["label"], "Media");
        assert_eq!(value["contents"][0][0]["value"], "SC Media");
    }

    #[test]
    fn reagent_with_stray_number_is_an_error() {
        let table = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains", "IPTG"],
            &["FLOW", "FCS", "2", "MG1655", "0.5 mM, 2"],
        ]);
        let (result, diagnostics) = measurements(&table);

        assert!(diagnostics.has_errors());
        assert_eq!(
            diagnostics.errors(),
            vec![
                "Measurement table at row 1 column 4 has invalid reagent/media value: 0.5 mM, 2 contains digits but is not a valid value-unit form"
            ]
        );
        assert!(result.measurements[0]
            .contents
            .is_empty());
    }

    #[test]
    fn media_with_digits_in_name() {
        let table = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains", "Media"],
            &["FLOW", "FCS", "2", "MG1655", "Modified M9 Media + Kan 5_ug_per_ml"],
        ]);
        let (result, diagnostics) = measurements(&table);

        assert!(diagnostics.is_empty());
        let value = serde_json::to_value(&result.measurements[0]).unwrap();
        assert_eq!(value["contents"][0][0]["value"], "Modified M9 Media + Kan 5_ug_per_ml");
    }

    #[test]
    fn linked_media_keeps_uri() {
        let mut table = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains", "Media"],
            &["FLOW", "FCS", "2", "MG1655", ""],
        ]);
        table.rows[1].cells[4] = Cell::from_runs(vec![
            Run::new("SC_Media").with_link("https://hub.sd2e.org/user/sd2e/design/SC_Media/1")
        ]);
        let (result, diagnostics) = measurements(&table);

        assert!(diagnostics.is_empty());
        match &result.measurements[0].contents[0].value {
            Some(ReagentValue::Named(media)) => {
                assert_eq!(media.label, "SC_Media");
                assert_eq!(
                    media.uri.as_deref(),
                    Some("https://hub.sd2e.org/user/sd2e/design/SC_Media/1")
                );
            }
            other => panic!("expected media, found {:?}", other),
        }
        let value = serde_json::to_value(&result.measurements[0]).unwrap();
        assert_eq!(value["contents"][0][0]["value"], "SC_Media");
    }

    #[test]
    fn linked_strain_carries_uri() {
        let mut table = Table::from_text(&[
            &["measurement-type", "file-type", "replicate", "strains"],
            &["FLOW", "FCS", "2", ""],
        ]);
        table.rows[1].cells[3] = Cell::from_runs(vec![
            Run::new("UWBF_7376").with_link("https://hub.sd2e.org/user/sd2e/design/UWBF_7376/1")
        ]);
        let (result, _) = measurements(&table);

        let value = serde_json::to_value(&result.measurements[0]).unwrap();
        assert_eq!(
            value["strains"],
            json!(["https://hub.sd2e.org/user/sd2e/design/UWBF_7376/1"])
        );
    }

    #[test]
    fn control_table_with_caption() {
        let table = Table::from_text(&[
            &["Table 3: Controls", "", "", ""],
            &["Control Type", "Strains", "Channel", "Contents"],
            &["HIGH_FITC", "MG1655", "BL1-A", "beta_estradiol 0.05 micromole"],
            &["EMPTY_VECTOR", "MG1655_empty", "", ""],
        ]);
        let (result, diagnostics) = controls(&table);

        assert!(diagnostics.is_empty());
        assert_eq!(result.caption, Some(3));
        assert_eq!(result.controls.len(), 2);
        assert_eq!(
            serde_json::to_value(&result.controls[0]).unwrap(),
            json!({
                "type": "HIGH_FITC",
                "strains": ["MG1655"],
                "channel": "BL1-A",
                "contents": [
                    {
                        "name": {"label": "beta_estradiol", "sbh_uri": "NO PROGRAM DICTIONARY ENTRY"},
                        "value": 0.05,
                        "unit": "micromole"
                    }
                ]
            })
        );
    }

    #[test]
    fn unknown_control_type() {
        let table = Table::from_text(&[&["Control Type", "Strains"], &["LOW_FITC", "MG1655"]]);
        let (result, diagnostics) = controls(&table);

        assert!(diagnostics.has_errors());
        assert!(diagnostics.errors()[0].starts_with("Controls table has invalid Control Type value: LOW_FITC"));
        assert_eq!(result.controls.len(), 1);
        assert_eq!(result.controls[0].control_type, None);
    }
}
