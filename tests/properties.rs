//! Property-based tests for cell interpretation
//!
//! These check the guarantees the cell layer makes for any input:
//! - every token sequence classifies into one of the known shapes
//! - unit resolution is idempotent and rejects units outside a category
//! - valued cells keep their length, order and units

use proptest::prelude::*;

use intent_parser::cells;
use intent_parser::tokens::{classify, CellShape, Tokenizer};
use intent_parser::units::{Catalog, UnitCategory, UnitResolver};

const SHAPES: &[CellShape] = &[
    CellShape::BooleanFlag,
    CellShape::Datetime,
    CellShape::KeywordSeparatorName,
    CellShape::KeywordSeparatorValue,
    CellShape::NameValueUnitTimepoint,
    CellShape::NameSeparatorValueUnit,
    CellShape::NameValueUnit,
    CellShape::ValuesUnit,
    CellShape::ValueUnitPairs,
    CellShape::Name,
    CellShape::Number,
    CellShape::Table,
    CellShape::NotDefined,
];

/// Generate small non-negative numbers as they are written in documents
fn number_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,4}",
        "[0-9]{1,3}\\.[0-9]{1,3}",
    ]
}

/// Pick one of the fluid units of the default catalog
fn fluid_unit_strategy() -> impl Strategy<Value = String> {
    let catalog = Catalog::default();
    prop::sample::select(catalog.fluid_units)
}

/// Pick a category together with one of its units
fn unit_strategy() -> impl Strategy<Value = (UnitCategory, String)> {
    let catalog = Catalog::default();
    prop_oneof![
        prop::sample::select(catalog.fluid_units).prop_map(|unit| (UnitCategory::Fluid, unit)),
        prop::sample::select(catalog.temperature_units).prop_map(|unit| (UnitCategory::Temperature, unit)),
        prop::sample::select(catalog.timepoint_units).prop_map(|unit| (UnitCategory::Timepoint, unit)),
    ]
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn shapes_are_closed(text in "\\PC{0,40}") {
            let tokens = Tokenizer::cell().tokenize(&text, false, true);
            let shape = classify(&tokens);
            prop_assert!(SHAPES.contains(&shape), "{:?} from {:?}", shape, text);
        }

        #[test]
        fn resolution_is_idempotent((category, unit) in unit_strategy(), upper in any::<bool>()) {
            let catalog = Catalog::default();
            let resolver = UnitResolver::new(&catalog);

            let written = if upper { unit.to_uppercase() } else { unit.clone() };
            let once = resolver.resolve(&written, category);
            prop_assert!(once.is_ok(), "{} was not resolved", written);

            let once = once.unwrap();
            prop_assert_eq!(resolver.resolve(&once, category), Ok(once.clone()));
        }

        #[test]
        fn foreign_units_rejected(unit in "zz[a-z]{1,8}") {
            let catalog = Catalog::default();
            let resolver = UnitResolver::new(&catalog);

            for category in [UnitCategory::Fluid, UnitCategory::Temperature, UnitCategory::Timepoint] {
                prop_assert!(resolver.resolve(&unit, category).is_err());
            }
        }

        #[test]
        fn shared_unit_applies_to_every_value(
            values in prop::collection::vec(number_strategy(), 1..6),
            unit in fluid_unit_strategy(),
        ) {
            let catalog = Catalog::default();
            let resolver = UnitResolver::new(&catalog);

            let text = format!("{} {}", values.join(", "), unit);
            let result = cells::values_with_unit(&text, &resolver, UnitCategory::Fluid);
            prop_assert!(result.is_ok(), "{} failed: {:?}", text, result);

            let result = result.unwrap();
            let canonical = resolver.resolve(&unit, UnitCategory::Fluid).unwrap();
            prop_assert_eq!(result.len(), values.len());
            for quantity in &result {
                prop_assert_eq!(&quantity.unit, &canonical);
            }
        }

        #[test]
        fn pairs_keep_their_order(
            pairs in prop::collection::vec((number_strategy(), fluid_unit_strategy()), 2..6),
        ) {
            let catalog = Catalog::default();
            let resolver = UnitResolver::new(&catalog);

            let text = pairs
                .iter()
                .map(|(value, unit)| format!("{} {}", value, unit))
                .collect::<Vec<_>>()
                .join(", ");
            let result = cells::values_with_unit(&text, &resolver, UnitCategory::Fluid);
            prop_assert!(result.is_ok(), "{} failed: {:?}", text, result);

            let result = result.unwrap();
            prop_assert_eq!(result.len(), pairs.len());
            for ((value, unit), quantity) in pairs.iter().zip(&result) {
                let canonical = resolver.resolve(unit, UnitCategory::Fluid).unwrap();
                prop_assert_eq!(&quantity.unit, &canonical);
                prop_assert_eq!(quantity.value, value.parse::<f64>().unwrap());
            }
        }
    }
}
