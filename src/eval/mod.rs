//! Tree-walking evaluator
use std::error::Error;
use std::fmt;

use self::environment::Environment as GenericEnvironment;
use self::gc::shared;
use self::keywords::*;
use crate::helpers::ImmutableString;
use crate::values::{Expression, NativeProcedure, FALSE, NIL, TRUE};

pub use self::gc::GcShared;

mod environment;
mod gc;
mod keywords;
mod stdlib;


pub type Environment = GenericEnvironment<Expression>;

/// Default nesting limit for a single evaluation
pub const MAX_EVAL_DEPTH: usize = 1000;

// Remaining stack below which a new segment is allocated
const STACK_RED_ZONE: usize = 128 * 1024;
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    UnboundSymbol(String),
    NotAProcedure(String),
    ArgumentCount { expected: usize, passed: usize },
    BadArgc,
    BadArgType,
    DivisionByZero,
    EmptyListAccess,
    Overflow,
    BadSpecialForm(&'static str),
    StackOverflow,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EvalError::UnboundSymbol(ref name) => write!(f, "unbound symbol '{}'", name),
            EvalError::NotAProcedure(ref value) => write!(f, "not a function: {}", value),
            EvalError::ArgumentCount { expected, passed } => write!(
                f,
                "wrong number of arguments: expected {}, got {}",
                expected, passed
            ),
            EvalError::BadArgc => f.write_str("wrong number of arguments"),
            EvalError::BadArgType => f.write_str("wrong argument type"),
            EvalError::DivisionByZero => f.write_str("division by zero"),
            EvalError::EmptyListAccess => f.write_str("car of an empty list"),
            EvalError::Overflow => f.write_str("integer overflow"),
            EvalError::BadSpecialForm(keyword) => write!(f, "bad syntax in '{}'", keyword),
            EvalError::StackOverflow => f.write_str("maximum recursion depth exceeded"),
        }
    }
}

impl Error for EvalError {}

/// An environment with nothing bound
pub fn null_env() -> GcShared<Environment> {
    shared(Environment::default())
}

/// The root environment: constants and builtin procedures
pub fn default_env() -> GcShared<Environment> {
    let mut env = Environment::default();

    for &name in &[NIL, TRUE, FALSE] {
        env.define(name.into(), Expression::symbol(name));
    }

    for &(name, fun) in stdlib::STDLIB.iter() {
        env.define(
            name.into(),
            Expression::BuiltinProcedure(NativeProcedure { name, fun }),
        );
    }

    shared(env)
}

/// Evaluates `expression` with the default depth limit
pub fn eval(
    expression: &Expression,
    environment: &GcShared<Environment>,
) -> Result<Expression, EvalError> {
    Evaluator::new(MAX_EVAL_DEPTH).eval(expression, environment)
}

/// Evaluation state for one top-level expression
#[derive(Debug)]
pub struct Evaluator {
    depth: usize,
    max_depth: usize,
}

impl Evaluator {
    pub fn new(max_depth: usize) -> Evaluator {
        Evaluator {
            depth: 0,
            max_depth,
        }
    }

    pub fn eval(
        &mut self,
        expression: &Expression,
        environment: &GcShared<Environment>,
    ) -> Result<Expression, EvalError> {
        if self.depth >= self.max_depth {
            return Err(EvalError::StackOverflow);
        }

        // The depth limit, not the thread's stack size, decides when to stop
        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.dispatch(expression, environment)
        });
        self.depth -= 1;

        result
    }

    fn dispatch(
        &mut self,
        expression: &Expression,
        environment: &GcShared<Environment>,
    ) -> Result<Expression, EvalError> {
        trace!("eval at depth {}: {}", self.depth, expression);

        let items = match *expression {
            Expression::Symbol(ref name) => {
                return environment
                    .borrow()
                    .get(name)
                    .ok_or_else(|| EvalError::UnboundSymbol(name.to_string()));
            }
            Expression::List(ref items) => items,
            _ => return Ok(expression.clone()),
        };

        let (head, operands) = match items.split_first() {
            Some(split) => split,
            None => return Ok(Expression::nil()),
        };

        if let Expression::Symbol(ref keyword) = *head {
            if is_special_form(keyword) {
                return self.special_form(keyword, operands, environment);
            }
        }

        let procedure = self.eval(head, environment)?;

        // Arguments are evaluated left to right
        let mut args = Vec::with_capacity(operands.len());
        for operand in operands {
            args.push(self.eval(operand, environment)?);
        }

        self.apply(procedure, args)
    }

    fn special_form(
        &mut self,
        keyword: &str,
        operands: &[Expression],
        environment: &GcShared<Environment>,
    ) -> Result<Expression, EvalError> {
        match keyword {
            QUOTE => operands
                .first()
                .cloned()
                .ok_or(EvalError::BadSpecialForm(QUOTE)),
            IF => {
                let (test, branches) = operands
                    .split_first()
                    .ok_or(EvalError::BadSpecialForm(IF))?;
                let consequent = branches.get(0).ok_or(EvalError::BadSpecialForm(IF))?;

                if self.eval(test, environment)?.is_false() {
                    match branches.get(1) {
                        Some(alternate) => self.eval(alternate, environment),
                        None => Ok(Expression::nil()),
                    }
                } else {
                    self.eval(consequent, environment)
                }
            }
            SET_BANG => {
                let (name, value) = binding_operands(SET_BANG, operands)?;
                let value = self.eval(value, environment)?;

                if environment.borrow_mut().set(name, value.clone()) {
                    Ok(value)
                } else {
                    Err(EvalError::UnboundSymbol(name.to_string()))
                }
            }
            DEFINE => {
                let (name, value) = binding_operands(DEFINE, operands)?;
                let value = self.eval(value, environment)?;

                environment.borrow_mut().define(name.clone(), value.clone());
                Ok(value)
            }
            LAMBDA => {
                let formals = operands.get(0).ok_or(EvalError::BadSpecialForm(LAMBDA))?;
                let body = operands.get(1).ok_or(EvalError::BadSpecialForm(LAMBDA))?;

                let params = formals
                    .as_list()
                    .ok_or(EvalError::BadSpecialForm(LAMBDA))?
                    .iter()
                    .map(|param| param.as_symbol().cloned())
                    .collect::<Option<Vec<ImmutableString>>>()
                    .ok_or(EvalError::BadSpecialForm(LAMBDA))?;

                Ok(Expression::Lambda {
                    params,
                    body: Box::new(body.clone()),
                    closure: environment.clone(),
                })
            }
            BEGIN => {
                let (last, init) = operands
                    .split_last()
                    .ok_or(EvalError::BadSpecialForm(BEGIN))?;

                for expression in init {
                    self.eval(expression, environment)?;
                }

                self.eval(last, environment)
            }
            _ => unreachable!("not a special form: {}", keyword),
        }
    }

    fn apply(&mut self, procedure: Expression, args: Vec<Expression>) -> Result<Expression, EvalError> {
        match procedure {
            Expression::Lambda {
                params,
                body,
                closure,
            } => {
                if params.len() != args.len() {
                    return Err(EvalError::ArgumentCount {
                        expected: params.len(),
                        passed: args.len(),
                    });
                }

                debug!("calling lambda with {} arguments", args.len());
                let call_env = shared(Environment::bind_params(&params, args, &closure));
                trace!("call scope: {:?}", &*call_env.borrow());

                self.eval(&body, &call_env)
            }
            Expression::BuiltinProcedure(native) => {
                debug!("calling builtin {}", native.name);
                native.call(&args)
            }
            other => Err(EvalError::NotAProcedure(other.to_string())),
        }
    }
}

// `(set! name value)` and `(define name value)`
fn binding_operands<'a>(
    keyword: &'static str,
    operands: &'a [Expression],
) -> Result<(&'a ImmutableString, &'a Expression), EvalError> {
    match operands {
        [name, value, ..] => {
            let name = name.as_symbol().ok_or(EvalError::BadSpecialForm(keyword))?;
            Ok((name, value))
        }
        _ => Err(EvalError::BadSpecialForm(keyword)),
    }
}
