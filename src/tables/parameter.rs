//! The parameter table: `Parameter | Value` rows. A handful of fields
//! configure how the experiment is submitted; the rest are protocol
//! parameters, looked up in the catalog and typed by their field id.

use tracing::debug;

use super::{IntentTable, TableContext};
use crate::cells;
use crate::diagnostics::{Diagnostic, DictionaryError, Diagnostics, IntentParserError, TableError};
use crate::intent::{ParameterIntent, ParameterValue};
use crate::tokens::HeaderKind;
use crate::units::FieldKind;

const GROWTH_CURVE: &str = "GrowthCurve";

pub fn parse_parameters(
    table: &IntentTable,
    context: &TableContext,
    diagnostics: &mut Diagnostics,
) -> ParameterIntent {
    let mut intent = ParameterIntent::default();

    for (index, row) in table.data_rows() {
        let mut field = None;
        let mut value = None;

        for (column, cell) in row
            .cells
            .iter()
            .enumerate()
        {
            match table.header(column) {
                HeaderKind::Parameter => field = Some(cell.text()),
                HeaderKind::Value => value = Some(cell.text()),
                _ => {}
            }
        }

        let field = field.unwrap_or_default();
        let value = value.unwrap_or_default();

        if field.is_empty() {
            if !value.is_empty() {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Parameter table cannot assign {} as a parameter value to an empty parameter.",
                        value
                    ))
                    .table(table.index)
                    .row(index)
                    .cell_text(value),
                );
            }
            continue;
        }

        if value.is_empty() {
            diagnostics.push(
                Diagnostic::warning(format!(
                    "Skipping {} because no parameter value was assigned.",
                    field
                ))
                .table(table.index)
                .row(index)
                .cell_text(field),
            );
            continue;
        }

        if let Err(error) = read_parameter(&mut intent, context, &field, &value) {
            diagnostics.push(
                Diagnostic::error(error.message())
                    .table(table.index)
                    .row(index)
                    .cell_text(value),
            );
        }
    }

    debug!(
        "Parameter table {} has {} protocol parameters",
        table.index,
        intent
            .default_parameters
            .len()
    );

    intent
}

fn invalid(field: &str, error: impl std::fmt::Display) -> TableError {
    TableError::new(format!("Parameter table has invalid {} value: {}", field, error))
}

fn first_integer(field: &str, value: &str) -> Result<i64, TableError> {
    cells::integers(value)
        .map_err(|error| invalid(field, error))?
        .first()
        .copied()
        .ok_or_else(|| invalid(field, format!("{} is not an integer", value)))
}

fn flag(field: &str, value: &str) -> Result<bool, TableError> {
    cells::boolean_flag(value).ok_or_else(|| invalid(field, format!("{} is not a boolean value", value)))
}

fn read_parameter(
    intent: &mut ParameterIntent,
    context: &TableContext,
    field: &str,
    value: &str,
) -> Result<(), IntentParserError> {
    match field
        .to_lowercase()
        .as_str()
    {
        "xplan base directory" => intent.xplan_base_dir = Some(value.to_string()),
        "xplan reactor" => intent.xplan_reactor = Some(value.to_string()),
        "plate size" => intent.plate_size = Some(first_integer(field, value)?),
        "plate number" => intent.plate_number = Some(first_integer(field, value)?),
        "protocol" => {
            intent.protocol = Some(if value == "growth_curve" {
                GROWTH_CURVE.to_string()
            } else {
                value.to_string()
            })
        }
        "container search string" => intent.container_search_strings = cells::names(value),
        "strain property" => intent.strain_property = Some(value.to_string()),
        "xplan path" => intent.xplan_path = Some(value.to_string()),
        "submit" => intent.submit = Some(flag(field, value)?),
        "protocol id" => intent.protocol_id = Some(value.to_string()),
        "test mode" => intent.test_mode = Some(flag(field, value)?),
        "experiment reference url for xplan" => {
            intent.experiment_reference_url_for_xplan = Some(value.to_string())
        }
        _ => {
            let catalog = context.catalog;
            let id = catalog
                .parameter_field(field)
                .ok_or_else(|| {
                    DictionaryError::new(format!(
                        "Parameter table has invalid Parameter value: {} is not a supported parameter field.",
                        field
                    ))
                })?;
            let values = protocol_values(catalog.field_kind(id), id, value)?;
            intent.add_values(id, values);
        }
    }

    Ok(())
}

/// Values for a protocol parameter, typed according to its field.
fn protocol_values(kind: FieldKind, id: &str, value: &str) -> Result<Vec<ParameterValue>, TableError> {
    let values = match kind {
        FieldKind::Boolean => vec![ParameterValue::Boolean(flag(id, value)?)],
        FieldKind::Float => cells::numbers(value)
            .map_err(|error| invalid(id, error))?
            .into_iter()
            .map(ParameterValue::Float)
            .collect(),
        FieldKind::Nested => {
            let json = serde_json::from_str(value).map_err(|_| {
                TableError::new(format!(
                    "Parameter table has invalid Parameter Value: {} is an invalid json format.",
                    value
                ))
            })?;
            vec![ParameterValue::Json(json)]
        }
        FieldKind::Text => vec![ParameterValue::Text(value.to_string())],
        FieldKind::Strateos => cells::strateos(value)
            .into_iter()
            .map(ParameterValue::Text)
            .collect(),
    };
    Ok(values)
}
