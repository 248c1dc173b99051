//! Render expressions back to text
use std::fmt;

use crate::values::Expression;

impl fmt::Display for Expression {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            Expression::Symbol(ref s) => fmt.write_str(s),
            Expression::Number(n) => write!(fmt, "{}", n),
            Expression::List(ref items) => {
                fmt.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        fmt.write_str(" ")?;
                    }
                    write!(fmt, "{}", item)?;
                }
                fmt.write_str(")")
            }
            Expression::Lambda { .. } => fmt.write_str("<Lambda>"),
            Expression::BuiltinProcedure(_) => fmt.write_str("<Proc>"),
        }
    }
}

/// Pretty-prints an expression for the REPL
pub fn render(expression: &Expression) -> String {
    expression.to_string()
}
