pub mod cells;
pub mod diagnostics;
pub mod document;
pub mod engine;
pub mod intent;
pub mod regex;
pub mod tables;
pub mod tokens;
pub mod units;
