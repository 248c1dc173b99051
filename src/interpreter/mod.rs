use std::error::Error;
use std::fmt;

use crate::eval::{Environment, EvalError, Evaluator, GcShared, MAX_EVAL_DEPTH};
use crate::reader::{read, ReaderError};
use crate::values::Expression;

#[derive(Debug, PartialEq)]
pub enum InterpreterError {
    Reader(ReaderError),
    Eval(EvalError),
}

impl From<ReaderError> for InterpreterError {
    fn from(err: ReaderError) -> InterpreterError {
        InterpreterError::Reader(err)
    }
}

impl From<EvalError> for InterpreterError {
    fn from(err: EvalError) -> InterpreterError {
        InterpreterError::Eval(err)
    }
}

impl fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InterpreterError::Reader(ref err) => write!(f, "Invalid input: {}", err),
            InterpreterError::Eval(ref err) => write!(f, "Error: {}", err),
        }
    }
}

impl Error for InterpreterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            InterpreterError::Reader(ref err) => Some(err),
            InterpreterError::Eval(ref err) => Some(err),
        }
    }
}

/// Reads one expression from `code` and evaluates it in `environment`
pub fn interpret(
    code: &str,
    environment: &GcShared<Environment>,
) -> Result<Expression, InterpreterError> {
    interpret_with_depth(code, environment, MAX_EVAL_DEPTH)
}

/// Like `interpret`, stopping with `StackOverflow` past `max_depth` nested evaluations
pub fn interpret_with_depth(
    code: &str,
    environment: &GcShared<Environment>,
    max_depth: usize,
) -> Result<Expression, InterpreterError> {
    let datum = read(code)?;
    debug!("datum: {}", datum);

    let value = Evaluator::new(max_depth).eval(&datum, environment)?;
    Ok(value)
}

#[cfg(test)]
mod test;
