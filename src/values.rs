use gc::{Finalize, Gc, Trace};
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::eval::{Environment, EvalError, GcShared};
use crate::helpers::ImmutableString;

pub const NIL: &str = "nil";
pub const TRUE: &str = "#t";
pub const FALSE: &str = "#f";

pub type NatFn = fn(&[Expression]) -> Result<Expression, EvalError>;

/// Every datum the reader builds and every value the evaluator produces
#[derive(Debug, Clone)]
pub enum Expression {
    /// An identifier. `nil`, `#t` and `#f` are symbols too
    Symbol(ImmutableString),
    /// A machine integer
    Number(i64),
    /// An s-expression. `()` evaluates to `nil`
    List(Vec<Expression>),
    /// A natively implemented procedure
    BuiltinProcedure(NativeProcedure),
    /// A user-defined procedure and the scope it was created in
    Lambda {
        params: Vec<ImmutableString>,
        body: Box<Expression>,
        closure: GcShared<Environment>,
    },
}

#[derive(Clone, Copy)]
pub struct NativeProcedure {
    pub(crate) name: &'static str,
    pub(crate) fun: NatFn,
}

impl NativeProcedure {
    pub fn call(&self, args: &[Expression]) -> Result<Expression, EvalError> {
        (self.fun)(args)
    }
}

impl Debug for NativeProcedure {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "NativeProcedure({})", self.name)
    }
}

// Procedures compare by identity: same closure scope and body for lambdas,
// same registered name for builtins. Everything else compares structurally.
impl PartialEq<Expression> for Expression {
    fn eq(&self, other: &Expression) -> bool {
        use self::Expression::*;

        match (self, other) {
            (&Symbol(ref x), &Symbol(ref y)) => x == y,
            (&Number(n), &Number(m)) => n == m,
            (&List(ref xs), &List(ref ys)) => xs == ys,
            (&BuiltinProcedure(ref f), &BuiltinProcedure(ref g)) => f.name == g.name,
            (
                &Lambda {
                    ref params,
                    ref body,
                    ref closure,
                },
                &Lambda {
                    params: ref params2,
                    body: ref body2,
                    closure: ref closure2,
                },
            ) => {
                params == params2 && body == body2 && Gc::ptr_eq(closure, closure2)
            }
            _ => false,
        }
    }
}

impl Finalize for Expression {}
unsafe impl Trace for Expression {
    custom_trace!(this, {
        match *this {
            Expression::List(ref items) => {
                for item in items.iter() {
                    mark(item);
                }
            }
            Expression::Lambda {
                ref body,
                ref closure,
                ..
            } => {
                mark(&**body);
                mark(closure);
            }
            Expression::Symbol(_) | Expression::Number(_) | Expression::BuiltinProcedure(_) => {}
        }
    });
}

impl Expression {
    pub fn symbol(name: &str) -> Expression {
        Expression::Symbol(name.into())
    }

    pub fn nil() -> Expression {
        Expression::symbol(NIL)
    }

    pub fn boolean(b: bool) -> Expression {
        Expression::symbol(if b { TRUE } else { FALSE })
    }

    /// `#f` is the only false value
    pub fn is_false(&self) -> bool {
        match *self {
            Expression::Symbol(ref s) => &**s == FALSE,
            _ => false,
        }
    }

    pub fn is_nil(&self) -> bool {
        match *self {
            Expression::Symbol(ref s) => &**s == NIL,
            _ => false,
        }
    }

    pub fn is_procedure(&self) -> bool {
        match *self {
            Expression::Lambda { .. } | Expression::BuiltinProcedure(_) => true,
            _ => false,
        }
    }

    /// List items, with `nil` standing for the empty list
    pub fn as_list(&self) -> Option<&[Expression]> {
        match *self {
            Expression::List(ref items) => Some(&items[..]),
            ref s if s.is_nil() => Some(&[]),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            Expression::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&ImmutableString> {
        match *self {
            Expression::Symbol(ref s) => Some(s),
            _ => None,
        }
    }
}
