//! Tokenizing cell text and classifying the resulting token stream.

mod pattern;
mod tokenizer;

pub use pattern::{classify, serialize, CellShape};
pub use tokenizer::{HeaderKind, Token, TokenKind, Tokenizer};
