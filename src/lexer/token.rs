use std::iter::Peekable;

/**
    Tokenizer

    The surface syntax only knows about parentheses and atoms.
    An atom is any maximal run of characters that are neither
    whitespace nor a parenthesis, so `-`, `null?`, `#f` and `12`
    are all atoms. Classifying them is the reader's job.
*/

/// A source token
#[derive(Clone, PartialEq, Debug)]
pub enum Token {
    Open,
    Close,
    Atom(String),
}

/// A stream of tokens
pub struct Tokens<I: Iterator<Item = char>> {
    source: Peekable<I>,
}

impl<I: Iterator<Item = char>> Iterator for Tokens<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        next_token(&mut self.source)
    }
}

impl<I: Iterator<Item = char>> Tokens<I> {
    pub fn new(source: I) -> Tokens<I> {
        Tokens {
            source: source.peekable(),
        }
    }
}

#[derive(PartialEq, Debug)]
enum ParsingState {
    Normal,
    Atom,
}

pub fn next_token<I: Iterator<Item = char>>(stream: &mut Peekable<I>) -> Option<Token> {
    let mut state = ParsingState::Normal;
    let mut atom_buf = String::new();

    loop {
        match state {
            ParsingState::Normal => match stream.next()? {
                '(' => return Some(Token::Open),
                ')' => return Some(Token::Close),
                c if c.is_whitespace() => continue,
                c => {
                    atom_buf.push(c);
                    state = ParsingState::Atom;
                }
            },
            ParsingState::Atom => {
                let peeked = stream.peek().cloned();
                match peeked {
                    Some(c) if !is_delimiter(c) => {
                        atom_buf.push(c);
                        stream.next();
                    }
                    _ => return Some(Token::Atom(atom_buf)),
                }
            }
        }
    }
}

#[inline]
fn is_delimiter(c: char) -> bool {
    c == '(' || c == ')' || c.is_whitespace()
}
