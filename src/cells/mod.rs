//! Reading typed values out of cell text. Each function tokenizes with the
//! appropriate flavor, classifies the token stream, and extracts values
//! according to the shape found.

use chrono::NaiveDateTime;

use crate::diagnostics::TableError;
use crate::tokens::{classify, CellShape, HeaderKind, Token, TokenKind, Tokenizer};
use crate::units::{parse_decimal, parse_integer, Catalog};

mod values;

pub use values::{content_items, reagent_header, strateos, values_with_unit};

const DATETIME_FORMATS: &[&str] = &["%Y/%m/%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

fn shape_of(tokens: &[Token]) -> CellShape {
    classify(tokens)
}

/// The comma (or `@`) separated names in a cell. Whitespace inside a name
/// is kept; whitespace around it is not.
pub fn names(text: &str) -> Vec<String> {
    let mut tokens = Tokenizer::cell().tokenize_all(text);
    while tokens
        .last()
        .is_some_and(|token| token.is(TokenKind::Skip))
    {
        tokens.pop();
    }

    let mut result = Vec::new();
    let mut current = String::new();

    for token in tokens {
        match token.kind {
            TokenKind::Skip => {
                if !current.is_empty() {
                    current.push_str(&token.value);
                }
            }
            TokenKind::Separator => {
                result.push(std::mem::take(&mut current));
            }
            _ => current.push_str(&token.value),
        }
    }
    result.push(current);

    result
        .into_iter()
        .map(|name| {
            name.trim()
                .to_string()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Whether the cell holds only names.
pub fn is_name(text: &str) -> bool {
    shape_of(&Tokenizer::cell().tokenize_all(text)) == CellShape::Name
}

/// Whether the cell holds no names at all; numbers and punctuation only.
pub fn is_number(text: &str) -> bool {
    !Tokenizer::cell()
        .tokenize_all(text)
        .iter()
        .any(|token| token.is(TokenKind::Name))
}

/// Whether any comma separated item in the cell opens with a number that
/// stands on its own, as a value would. Digits fused into a name such as
/// `5_ug_per_ml` do not count.
pub fn has_loose_number(text: &str) -> bool {
    let tokens = Tokenizer::cell().tokenize_all(text);
    let mut start = true;

    for (i, token) in tokens
        .iter()
        .enumerate()
    {
        match token.kind {
            TokenKind::Separator => start = true,
            TokenKind::Skip => {}
            TokenKind::Number if start => {
                let loose = tokens
                    .get(i + 1)
                    .map_or(true, |next| next.is(TokenKind::Skip) || next.is(TokenKind::Separator));
                if loose {
                    return true;
                }
                start = false;
            }
            _ => start = false,
        }
    }
    false
}

/// Whether the cell is a list of values carrying units.
pub fn is_valued(text: &str) -> bool {
    shape_of(&Tokenizer::cell().tokenize(text, false, false)).is_valued()
}

/// The numbers in a cell that holds nothing but numbers.
pub fn numbers(text: &str) -> Result<Vec<f64>, TableError> {
    let tokens = Tokenizer::cell().tokenize(text, false, false);
    if shape_of(&tokens) != CellShape::Number {
        return Err(TableError::new(format!("{} is not a number", text)));
    }

    tokens
        .iter()
        .map(|token| {
            parse_decimal(&token.value)
                .ok_or_else(|| TableError::new(format!("{} is not a number", token.value)))
        })
        .collect()
}

/// The whole numbers in a cell that holds nothing but whole numbers.
pub fn integers(text: &str) -> Result<Vec<i64>, TableError> {
    let tokens = Tokenizer::cell().tokenize(text, false, false);
    if shape_of(&tokens) != CellShape::Number {
        return Err(TableError::new(format!("{} is not an integer", text)));
    }

    tokens
        .iter()
        .map(|token| {
            parse_integer(&token.value)
                .ok_or_else(|| TableError::new(format!("{} is not an integer", token.value)))
        })
        .collect()
}

/// A true/false flag, written in any case.
pub fn boolean_flag(text: &str) -> Option<bool> {
    let tokens = Tokenizer::cell().tokenize(text, false, false);
    if shape_of(&tokens) == CellShape::BooleanFlag {
        return Some(tokens[0].is(TokenKind::BooleanTrue));
    }

    let first = tokens.first()?;
    match first
        .value
        .to_lowercase()
        .as_str()
    {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// A date and time of day, `2020/06/30 21:12:31` or `2020-06-30 21:12:31`.
pub fn datetime(text: &str) -> Result<NaiveDateTime, TableError> {
    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .ok_or_else(|| {
            TableError::new(format!(
                "{} does not match the date format YYYY/MM/DD HH:MM:SS",
                text
            ))
        })
}

/// The number of a `Table N` caption.
pub fn caption_index(text: &str) -> Option<u32> {
    let tokens = Tokenizer::caption().tokenize(text, false, false);
    match tokens.as_slice() {
        [keyword, number, ..] if keyword.is(TokenKind::Keyword) && number.is(TokenKind::Number) => {
            parse_integer(&number.value).and_then(|n| u32::try_from(n).ok())
        }
        _ => None,
    }
}

/// Every `Table N` reference in a cell, in order.
pub fn captions(text: &str) -> Vec<u32> {
    let tokens = Tokenizer::caption().tokenize(text, false, false);
    tokens
        .windows(2)
        .filter(|pair| pair[0].is(TokenKind::Keyword) && pair[1].is(TokenKind::Number))
        .filter_map(|pair| parse_integer(&pair[1].value))
        .filter_map(|n| u32::try_from(n).ok())
        .collect()
}

/// The column a header cell names. Anything other than exactly one known
/// column name is unknown.
pub fn header_kind(text: &str) -> HeaderKind {
    let tokens = Tokenizer::header().tokenize(text, false, false);
    match tokens.as_slice() {
        [Token {
            kind: TokenKind::Header(kind),
            ..
        }] => *kind,
        _ => HeaderKind::Unknown,
    }
}

/// Whether the cell starts with the `lab` keyword.
pub fn starts_with_lab(text: &str) -> bool {
    Tokenizer::lab()
        .tokenize(text, false, true)
        .first()
        .is_some_and(|token| token.is(TokenKind::Keyword))
}

/// A `key: value` entry, as written in the rows of a lab table.
pub fn key_value(text: &str) -> Option<(String, String)> {
    let tokens = Tokenizer::lab().tokenize(text, false, true);
    match shape_of(&tokens) {
        CellShape::KeywordSeparatorName | CellShape::KeywordSeparatorValue => {
            Some((tokens[0].value.clone(), tokens[2].value.clone()))
        }
        _ => None,
    }
}

/// The key of a lab table entry: whatever precedes the first `:`.
pub fn key(text: &str) -> Option<String> {
    let tokens = Tokenizer::lab().tokenize(text, false, true);
    let first = tokens.first()?;
    if first.is(TokenKind::Separator) {
        return None;
    }
    Some(
        first
            .value
            .to_lowercase(),
    )
}

/// The value of a lab table entry: the last word after the first `:`.
pub fn lab_value(text: &str) -> Option<String> {
    let tokens = Tokenizer::lab().tokenize(text, false, true);
    let colon = tokens
        .iter()
        .position(|token| token.is(TokenKind::Separator) && token.value == ":")?;
    tokens[colon + 1..]
        .iter()
        .rev()
        .find(|token| !token.is(TokenKind::Separator))
        .map(|token| {
            token
                .value
                .clone()
        })
}

/// Whether text is a fully qualified experiment id,
/// `experiment.<lab>.<id>`, naming a lab the catalog knows.
pub fn is_experiment_id(text: &str, catalog: &Catalog) -> bool {
    let tokens = Tokenizer::experiment_id().tokenize_all(text.trim());
    match tokens.as_slice() {
        [keyword, dot1, lab, dot2, id] => {
            keyword.is(TokenKind::Keyword)
                && dot1.is(TokenKind::Separator)
                && lab.is(TokenKind::Name)
                && dot2.is(TokenKind::Separator)
                && id.is(TokenKind::Name)
                && catalog
                    .lab(&lab.value)
                    .is_some()
        }
        _ => false,
    }
}
