//! Canonical spelling of unit words.

use std::collections::BTreeMap;

use super::catalog::Catalog;
use crate::diagnostics::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCategory {
    Fluid,
    Temperature,
    Timepoint,
}

impl UnitCategory {
    pub fn name(&self) -> &'static str {
        match self {
            UnitCategory::Fluid => "fluid",
            UnitCategory::Temperature => "temperature",
            UnitCategory::Timepoint => "timepoint",
        }
    }
}

/// Resolves unit text against the unit sets and abbreviations of a
/// catalog. Borrowed for the duration of one parse.
#[derive(Debug, Clone, Copy)]
pub struct UnitResolver<'c> {
    catalog: &'c Catalog,
}

impl<'c> UnitResolver<'c> {
    pub fn new(catalog: &'c Catalog) -> UnitResolver<'c> {
        UnitResolver { catalog }
    }

    fn units(&self, category: UnitCategory) -> &'c [String] {
        match category {
            UnitCategory::Fluid => &self
                .catalog
                .fluid_units,
            UnitCategory::Temperature => &self
                .catalog
                .temperature_units,
            UnitCategory::Timepoint => &self
                .catalog
                .timepoint_units,
        }
    }

    fn abbreviations(&self, category: UnitCategory) -> &'c BTreeMap<String, String> {
        let abbreviations = &self
            .catalog
            .abbreviations;
        match category {
            UnitCategory::Fluid => &abbreviations.fluid,
            UnitCategory::Temperature => &abbreviations.temperature,
            UnitCategory::Timepoint => &abbreviations.timepoint,
        }
    }

    /// The canonical spelling of `unit` within `category`. The lowercased
    /// text is looked up among the category's abbreviations first and then
    /// compared without case against the category's units.
    pub fn resolve(&self, unit: &str, category: UnitCategory) -> Result<String, TableError> {
        let units = self.units(category);
        let unit = unit.trim();
        let lowered = unit.to_lowercase();

        if let Some(expanded) = self
            .abbreviations(category)
            .get(&lowered)
        {
            if units
                .iter()
                .any(|u| u == expanded)
            {
                return Ok(expanded.clone());
            }
        }

        units
            .iter()
            .find(|u| u.to_lowercase() == lowered)
            .cloned()
            .ok_or_else(|| TableError::new(format!("{} is an invalid unit", unit)))
    }

    /// Resolve in the first category that accepts the unit.
    pub fn resolve_any(&self, unit: &str, categories: &[UnitCategory]) -> Result<String, TableError> {
        for category in categories {
            if let Ok(canonical) = self.resolve(unit, *category) {
                return Ok(canonical);
            }
        }
        Err(TableError::new(format!("{} is an invalid unit", unit.trim())))
    }
}
