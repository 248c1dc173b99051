//! A tiny Lisp: s-expressions, integers, lists and closures
#[macro_use]
extern crate gc;
#[macro_use]
extern crate log;

#[macro_use]
mod helpers;

pub mod eval;
pub mod interpreter;
pub mod lexer;
pub mod printer;
pub mod reader;
pub mod values;

pub use crate::eval::{default_env, eval, null_env, Environment, EvalError, GcShared};
pub use crate::interpreter::{interpret, InterpreterError};
pub use crate::printer::render;
pub use crate::reader::{read, ReaderError};
pub use crate::values::Expression;
