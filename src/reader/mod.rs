//! Convert tokens into expressions
use std::collections::VecDeque;

mod datum;

pub use self::datum::{parse_datum, ReaderError};
use crate::lexer::{Token, Tokens};
use crate::values::Expression;

/// Reads exactly one expression from `source`. Anything after it is ignored.
pub fn read(source: &str) -> Result<Expression, ReaderError> {
    let mut tokens: VecDeque<Token> = Tokens::new(source.chars()).collect();

    let expression = parse_datum(&mut tokens)?.ok_or(ReaderError::UnexpectedEOF)?;

    if !tokens.is_empty() {
        debug!("discarding {} trailing tokens", tokens.len());
    }

    Ok(expression)
}
