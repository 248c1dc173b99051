//! Convert text into tokens
mod token;


pub use self::token::{next_token, Token, Tokens};

/// Eagerly tokenizes a whole source string
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokens::new(source.chars()).collect()
}
