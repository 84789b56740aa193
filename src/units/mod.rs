//! Units, quantities, and the catalog of terms documents are checked against.

mod catalog;
mod quantity;
mod resolver;

pub use catalog::{Abbreviations, Catalog, FieldKind};
pub use quantity::{parse_decimal, parse_integer, Quantity};
pub use resolver::{UnitCategory, UnitResolver};
