use super::EvalError;
use crate::values::{Expression, NatFn};

pub(super) static STDLIB: &[(&str, NatFn)] = &[
    ("+", add),
    ("-", sub),
    ("*", mul),
    ("/", div),
    ("=", num_eq),
    (">", gt),
    ("<", lt),
    ("<=", le),
    (">=", ge),
    ("car", car),
    ("cdr", cdr),
    ("cons", cons),
    ("append", append),
    ("list", list),
    ("length", length),
    ("null?", is_null),
];

fn integer(value: &Expression) -> Result<i64, EvalError> {
    value.as_integer().ok_or(EvalError::BadArgType)
}

fn list_arg(value: &Expression) -> Result<&[Expression], EvalError> {
    value.as_list().ok_or(EvalError::BadArgType)
}

fn check_argc(args: &[Expression], count: usize) -> Result<(), EvalError> {
    if args.len() != count {
        return Err(EvalError::BadArgc);
    }
    Ok(())
}

fn fold(args: &[Expression], op: fn(i64, i64) -> Result<i64, EvalError>) -> Result<Expression, EvalError> {
    let (first, rest) = args.split_first().ok_or(EvalError::BadArgc)?;
    let mut acc = integer(first)?;

    for arg in rest {
        acc = op(acc, integer(arg)?)?;
    }

    Ok(Expression::Number(acc))
}

// The first argument is compared against every other one
fn compare(args: &[Expression], relation: fn(i64, i64) -> bool) -> Result<Expression, EvalError> {
    let (first, rest) = args.split_first().ok_or(EvalError::BadArgc)?;
    let n = integer(first)?;

    for arg in rest {
        if !relation(n, integer(arg)?) {
            return Ok(Expression::boolean(false));
        }
    }

    Ok(Expression::boolean(true))
}

fn add(args: &[Expression]) -> Result<Expression, EvalError> {
    fold(args, |a, b| a.checked_add(b).ok_or(EvalError::Overflow))
}

fn sub(args: &[Expression]) -> Result<Expression, EvalError> {
    fold(args, |a, b| a.checked_sub(b).ok_or(EvalError::Overflow))
}

fn mul(args: &[Expression]) -> Result<Expression, EvalError> {
    fold(args, |a, b| a.checked_mul(b).ok_or(EvalError::Overflow))
}

fn div(args: &[Expression]) -> Result<Expression, EvalError> {
    fold(args, |a, b| {
        if b == 0 {
            return Err(EvalError::DivisionByZero);
        }
        a.checked_div(b).ok_or(EvalError::Overflow)
    })
}

fn num_eq(args: &[Expression]) -> Result<Expression, EvalError> {
    compare(args, |a, b| a == b)
}

fn gt(args: &[Expression]) -> Result<Expression, EvalError> {
    compare(args, |a, b| a > b)
}

fn lt(args: &[Expression]) -> Result<Expression, EvalError> {
    compare(args, |a, b| a < b)
}

fn le(args: &[Expression]) -> Result<Expression, EvalError> {
    compare(args, |a, b| a <= b)
}

fn ge(args: &[Expression]) -> Result<Expression, EvalError> {
    compare(args, |a, b| a >= b)
}

fn car(args: &[Expression]) -> Result<Expression, EvalError> {
    check_argc(args, 1)?;
    list_arg(&args[0])?
        .first()
        .cloned()
        .ok_or(EvalError::EmptyListAccess)
}

fn cdr(args: &[Expression]) -> Result<Expression, EvalError> {
    check_argc(args, 1)?;
    let items = list_arg(&args[0])?;

    if items.len() < 2 {
        return Ok(Expression::nil());
    }

    Ok(Expression::List(items[1..].to_vec()))
}

fn cons(args: &[Expression]) -> Result<Expression, EvalError> {
    check_argc(args, 2)?;
    let tail = list_arg(&args[1])?;

    let mut items = Vec::with_capacity(tail.len() + 1);
    items.push(args[0].clone());
    items.extend_from_slice(tail);

    Ok(Expression::List(items))
}

fn append(args: &[Expression]) -> Result<Expression, EvalError> {
    check_argc(args, 2)?;
    let mut items = list_arg(&args[0])?.to_vec();
    items.extend_from_slice(list_arg(&args[1])?);

    Ok(Expression::List(items))
}

fn list(args: &[Expression]) -> Result<Expression, EvalError> {
    Ok(Expression::List(args.to_vec()))
}

fn length(args: &[Expression]) -> Result<Expression, EvalError> {
    check_argc(args, 1)?;
    Ok(Expression::Number(list_arg(&args[0])?.len() as i64))
}

fn is_null(args: &[Expression]) -> Result<Expression, EvalError> {
    check_argc(args, 1)?;
    Ok(Expression::boolean(list_arg(&args[0])?.is_empty()))
}
