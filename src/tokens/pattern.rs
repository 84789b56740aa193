//! Second stage of cell interpretation. A token sequence is serialized as
//! `«KIND,value»«KIND,value»…«END_OF_MATCH»` and the whole string is matched
//! against an ordered list of shape expressions; the first that matches
//! classifies the cell.

use regex::Regex;
use std::sync::OnceLock;

use super::tokenizer::Token;

const END_OF_MATCH: &str = "«END_OF_MATCH»";

/// The high-level shape of a cell's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellShape {
    BooleanFlag,
    Datetime,
    KeywordSeparatorName,
    KeywordSeparatorValue,
    NameValueUnitTimepoint,
    NameSeparatorValueUnit,
    NameValueUnit,
    ValuesUnit,
    ValueUnitPairs,
    Name,
    Number,
    Table,
    NotDefined,
}

impl CellShape {
    pub fn name(&self) -> &'static str {
        match self {
            CellShape::BooleanFlag => "BOOLEAN_FLAG",
            CellShape::Datetime => "DATETIME",
            CellShape::KeywordSeparatorName => "KEYWORD_SEPARATOR_NAME",
            CellShape::KeywordSeparatorValue => "KEYWORD_SEPARATOR_VALUE",
            CellShape::NameValueUnitTimepoint => "NAME_VALUE_UNIT_TIMEPOINT",
            CellShape::NameSeparatorValueUnit => "NAME_SEPARATOR_VALUE_UNIT",
            CellShape::NameValueUnit => "NAME_VALUE_UNIT",
            CellShape::ValuesUnit => "VALUES_UNIT",
            CellShape::ValueUnitPairs => "VALUE_UNIT_PAIRS",
            CellShape::Name => "NAME",
            CellShape::Number => "NUMBER",
            CellShape::Table => "TABLE",
            CellShape::NotDefined => "NOT_DEFINED",
        }
    }

    /// A cell holding one or more values that carry a unit.
    pub fn is_valued(&self) -> bool {
        matches!(self, CellShape::ValuesUnit | CellShape::ValueUnitPairs)
    }
}

/// Matches a single serialized token: its kind, optionally constrained value,
/// and a repetition qualifier applying to the token.
struct TokenMatcher {
    kind: &'static str,
    value: &'static str,
    qualifier: &'static str,
}

fn token(kind: &'static str) -> TokenMatcher {
    TokenMatcher {
        kind,
        value: "[^»]+",
        qualifier: "",
    }
}

impl TokenMatcher {
    fn value(mut self, value: &'static str) -> TokenMatcher {
        self.value = value;
        self
    }

    fn repeated(mut self) -> TokenMatcher {
        self.qualifier = "+";
        self
    }

    fn render(&self) -> String {
        format!("(«{},{}»){}", self.kind, self.value, self.qualifier)
    }
}

fn shape(matchers: &[TokenMatcher], qualifier: &str) -> Regex {
    let body = matchers
        .iter()
        .map(TokenMatcher::render)
        .collect::<String>();
    let pattern = format!("^({}){}{}$", body, qualifier, END_OF_MATCH);
    Regex::new(&pattern).unwrap_or_else(|e| panic!("{}", e))
}

fn shapes() -> &'static [(CellShape, Regex)] {
    static SHAPES: OnceLock<Vec<(CellShape, Regex)>> = OnceLock::new();
    SHAPES.get_or_init(|| {
        vec![
            (
                CellShape::BooleanFlag,
                shape(&[token("(?:BOOLEAN_FALSE|BOOLEAN_TRUE)")], ""),
            ),
            (CellShape::Datetime, shape(&[token("DATE"), token("TIME")], "")),
            (
                CellShape::KeywordSeparatorName,
                shape(
                    &[
                        token("(?:NAME|KEYWORD)"),
                        token("SEPARATOR").value(":"),
                        token("NAME"),
                    ],
                    "",
                ),
            ),
            (
                CellShape::KeywordSeparatorValue,
                shape(
                    &[
                        token("(?:NAME|KEYWORD)"),
                        token("SEPARATOR").value(":"),
                        token("NUMBER"),
                    ],
                    "",
                ),
            ),
            (
                CellShape::NameValueUnitTimepoint,
                shape(
                    &[
                        token("NAME").repeated(),
                        token("NUMBER"),
                        token("NAME"),
                        token("SEPARATOR"),
                        token("NUMBER"),
                        token("NAME"),
                    ],
                    "",
                ),
            ),
            (
                CellShape::NameSeparatorValueUnit,
                shape(
                    &[
                        token("NAME").repeated(),
                        token("SEPARATOR").value("@"),
                        token("NUMBER"),
                        token("NAME"),
                    ],
                    "",
                ),
            ),
            (
                CellShape::NameValueUnit,
                shape(
                    &[token("NAME").repeated(), token("NUMBER"), token("NAME")],
                    "",
                ),
            ),
            (
                CellShape::ValuesUnit,
                shape(&[token("NUMBER").repeated(), token("NAME")], ""),
            ),
            (
                CellShape::ValueUnitPairs,
                shape(&[token("NUMBER"), token("NAME")], "+"),
            ),
            (
                CellShape::Name,
                shape(&[token("(?:NAME|SEPARATOR|SKIP)").repeated()], ""),
            ),
            (CellShape::Number, shape(&[token("NUMBER").repeated()], "")),
            (CellShape::Table, shape(&[token("KEYWORD").repeated()], "")),
            (
                CellShape::NotDefined,
                shape(&[token("[^,»]+").repeated()], ""),
            ),
        ]
    })
}

/// The serialized form of a token sequence that shape expressions run over.
pub fn serialize(tokens: &[Token]) -> String {
    let mut result = tokens
        .iter()
        .map(Token::to_string)
        .collect::<String>();
    result.push_str(END_OF_MATCH);
    result
}

/// Classify a token sequence. An empty sequence is an (empty) name.
pub fn classify(tokens: &[Token]) -> CellShape {
    if tokens.is_empty() {
        return CellShape::Name;
    }

    let serialized = serialize(tokens);

    shapes()
        .iter()
        .find(|(_, regex)| regex.is_match(&serialized))
        .map(|(shape, _)| *shape)
        .unwrap_or(CellShape::NotDefined)
}
