//! Values that carry units: quantity lists, reagent column headers, and the
//! reagent lists found in contents cells.

use std::collections::BTreeMap;

use crate::diagnostics::TableError;
use crate::intent::{NamedLink, ReagentEntry, ReagentValue};
use crate::tokens::{classify, CellShape, Token, TokenKind, Tokenizer};
use crate::units::{parse_decimal, Quantity, UnitCategory, UnitResolver};

use super::names;

fn decimal(token: &Token) -> Result<f64, TableError> {
    parse_decimal(&token.value)
        .ok_or_else(|| TableError::new(format!("{} is not a number", token.value)))
}

fn joined(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.value.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The values in a cell, each with its unit resolved within `category`.
/// Either every value shares one trailing unit (`1, 2, 3 X`) or each value
/// carries its own (`1 X, 2 mM`).
pub fn values_with_unit(
    text: &str,
    resolver: &UnitResolver,
    category: UnitCategory,
) -> Result<Vec<Quantity>, TableError> {
    let tokens = Tokenizer::cell().tokenize(text, false, false);

    match classify(&tokens) {
        CellShape::ValuesUnit => {
            let Some((unit, values)) = tokens.split_last() else {
                return Err(TableError::new(format!("{} does not contain a unit", text)));
            };
            let unit = resolver.resolve(&unit.value, category)?;
            values
                .iter()
                .map(|token| Ok(Quantity::new(decimal(token)?, unit.clone())))
                .collect()
        }
        CellShape::ValueUnitPairs => tokens
            .chunks(2)
            .map(|pair| {
                let value = decimal(&pair[0])?;
                let unit = resolver.resolve(&pair[1].value, category)?;
                Ok(Quantity::new(value, unit))
            })
            .collect(),
        _ => Err(TableError::new(format!("{} does not contain a unit", text))),
    }
}

/// The reagent a measurement table column is about, and the timepoint it
/// was added at if the header gives one (`IPTG @ 5 hour`). The label links
/// to whatever URL the header text carries.
pub fn reagent_header(
    text: &str,
    links: &BTreeMap<String, String>,
    resolver: &UnitResolver,
) -> Result<(NamedLink, Option<Quantity>), TableError> {
    let tokens = Tokenizer::cell().tokenize(text, false, true);

    match classify(&tokens) {
        CellShape::NameSeparatorValueUnit => {
            let n = tokens.len();
            let label = joined(&tokens[..n - 3]);
            let value = decimal(&tokens[n - 2])?;
            let unit = resolver.resolve(&tokens[n - 1].value, UnitCategory::Timepoint)?;
            Ok((
                NamedLink::lookup(&label, links),
                Some(Quantity::new(value, unit)),
            ))
        }
        _ => {
            let label = text.trim();
            if label.is_empty() {
                return Err(TableError::new("Reagent header is empty"));
            }
            Ok((NamedLink::lookup(label, links), None))
        }
    }
}

fn content_item(
    tokens: &[Token],
    links: &BTreeMap<String, String>,
    resolver: &UnitResolver,
) -> Result<ReagentEntry, TableError> {
    let n = tokens.len();

    match classify(tokens) {
        CellShape::NameValueUnitTimepoint => {
            let name = joined(&tokens[..n - 5]);
            let value = decimal(&tokens[n - 5])?;
            let unit = resolver.resolve_any(
                &tokens[n - 4].value,
                &[UnitCategory::Fluid, UnitCategory::Timepoint],
            )?;
            let at = decimal(&tokens[n - 2])?;
            let at_unit = resolver.resolve(&tokens[n - 1].value, UnitCategory::Timepoint)?;
            Ok(ReagentEntry::new(
                NamedLink::lookup(&name, links),
                Some(ReagentValue::Amount(Quantity::new(value, unit))),
            )
            .at(Some(Quantity::new(at, at_unit))))
        }
        CellShape::NameValueUnit => {
            let name = joined(&tokens[..n - 2]);
            let value = decimal(&tokens[n - 2])?;
            let unit = resolver.resolve_any(
                &tokens[n - 1].value,
                &[UnitCategory::Fluid, UnitCategory::Timepoint],
            )?;
            Ok(ReagentEntry::new(
                NamedLink::lookup(&name, links),
                Some(ReagentValue::Amount(Quantity::new(value, unit))),
            ))
        }
        CellShape::Name => Ok(ReagentEntry::new(
            NamedLink::lookup(&joined(tokens), links),
            None,
        )),
        _ => {
            let text = joined(tokens);
            Err(TableError::new(format!("Unable to parse {}", text)))
        }
    }
}

/// The reagents listed in a contents cell, comma separated. Each is a name,
/// optionally followed by an amount and then optionally by `@` and the
/// timepoint it was added at.
pub fn content_items(
    text: &str,
    links: &BTreeMap<String, String>,
    resolver: &UnitResolver,
) -> Result<Vec<ReagentEntry>, TableError> {
    let tokens = Tokenizer::cell().tokenize(text, false, true);

    let mut entries = Vec::new();
    let mut item: Vec<Token> = Vec::new();
    let mut items = Vec::new();

    for token in tokens {
        if token.is(TokenKind::Separator) && token.value == "," {
            items.push(std::mem::take(&mut item));
        } else {
            item.push(token);
        }
    }
    items.push(item);

    for item in items {
        if item.is_empty() {
            continue;
        }
        entries.push(content_item(&item, links, resolver)?);
    }

    Ok(entries)
}

/// Values for the Strateos parameter fields, which want a `value:unit`
/// form when a quantity is given and plain names otherwise.
pub fn strateos(text: &str) -> Vec<String> {
    let tokens = Tokenizer::cell().tokenize(text, false, false);

    match (classify(&tokens), tokens.as_slice()) {
        (CellShape::ValuesUnit, [value, unit]) => {
            vec![format!("{}:{}", value.value, unit.value)]
        }
        _ => names(text),
    }
}
