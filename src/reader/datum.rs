use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

use crate::lexer::Token;
use crate::values::Expression;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    MismatchedParentheses,
    UnexpectedEOF,
    BadNumber(String),
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ReaderError::MismatchedParentheses => f.write_str("the brackets don't match"),
            ReaderError::UnexpectedEOF => f.write_str("unexpected end of input"),
            ReaderError::BadNumber(ref token) => write!(f, "invalid number '{}'", token),
        }
    }
}

impl Error for ReaderError {}

pub fn parse_datum(stream: &mut VecDeque<Token>) -> Result<Option<Expression>, ReaderError> {
    let token = match stream.pop_front() {
        Some(token) => token,
        None => return Ok(None),
    };

    match token {
        Token::Atom(text) => atom(text).map(Some),
        Token::Open => parse_list_datum(stream),
        Token::Close => {
            warn!("unexpected ')'");
            Err(ReaderError::MismatchedParentheses)
        }
    }
}

// Assumes a stream without the initial Open
fn parse_list_datum(stream: &mut VecDeque<Token>) -> Result<Option<Expression>, ReaderError> {
    let mut items = Vec::new();

    loop {
        match stream.front() {
            Some(&Token::Close) => {
                stream.pop_front();
                ret_val!(Expression::List(items));
            }
            Some(_) => {}
            None => {
                warn!("unclosed list after {} items", items.len());
                return Err(ReaderError::MismatchedParentheses);
            }
        }

        match parse_datum(stream)? {
            Some(datum) => items.push(datum),
            None => return Err(ReaderError::MismatchedParentheses),
        }
    }
}

fn atom(token: String) -> Result<Expression, ReaderError> {
    let numeric = {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), _) if c.is_ascii_digit() => true,
            (Some('-'), Some(c)) if c.is_ascii_digit() => true,
            _ => false,
        }
    };

    if !numeric {
        return Ok(Expression::Symbol(token.into()));
    }

    match token.parse::<i64>() {
        Ok(n) => Ok(Expression::Number(n)),
        Err(_) => Err(ReaderError::BadNumber(token)),
    }
}
