use super::{interpret, interpret_with_depth, InterpreterError};
use crate::eval::{default_env, null_env, EvalError};
use crate::reader::ReaderError;
use crate::values::Expression;

use self::EvalError::*;

macro_rules! with_null {
    ($code:expr) => (interpret($code, &null_env()))
}

macro_rules! with_std {
    ($code:expr) => (interpret($code, &default_env()))
}

macro_rules! rt_err {
    ($err:expr) => (Err(InterpreterError::Eval($err)))
}

fn num(n: i64) -> Result<Expression, InterpreterError> {
    Ok(Expression::Number(n))
}

fn sym(s: &str) -> Result<Expression, InterpreterError> {
    Ok(Expression::symbol(s))
}

fn rendered(code: &str) -> String {
    with_std![code].expect("valid program").to_string()
}

#[test]
fn number() {
    assert_eq![with_null!["42"], num(42)];
    assert_eq![with_null!["-42"], num(-42)];
}

#[test]
fn quote() {
    assert_eq![with_null!["(quote a)"], sym("a")];
    assert_eq![rendered("(quote (1 (a b) ()))"), "(1 (a b) ())"];
}

#[test]
fn empty_list_is_nil() {
    assert_eq![with_null!["()"], sym("nil")];
}

#[test]
fn constants() {
    assert_eq![with_std!["nil"], sym("nil")];
    assert_eq![with_std!["#t"], sym("#t")];
    assert_eq![with_std!["#f"], sym("#f")];
}

#[test]
fn unbound() {
    assert_eq![with_null!["y"], rt_err![UnboundSymbol("y".into())]];
    assert_eq![with_std!["(+ 1 y)"], rt_err![UnboundSymbol("y".into())]];
}

#[test]
fn arithmetic() {
    assert_eq![with_std!["(+ 1 2 3)"], num(6)];
    assert_eq![with_std!["(- 10 (* 2 3) 1)"], num(3)];
    assert_eq![with_std!["(/ 7 2)"], num(3)];
    assert_eq![with_std!["(/ 1 0)"], rt_err![DivisionByZero]];
}

#[test]
fn if_basic() {
    assert_eq![with_std!["(if (< 1 2) 10 20)"], num(10)];
    assert_eq![with_std!["(if (> 1 2) 10 20)"], num(20)];
    assert_eq![with_std!["(if #f 10)"], sym("nil")];
}

// There is no quote shorthand, so `'a` is just a symbol name
#[test]
fn no_quote_shorthand() {
    assert_eq![with_std!["(if 0 'a 'b)"], rt_err![UnboundSymbol("'a".into())]];
}

#[test]
fn if_truthiness() {
    assert_eq![with_std!["(if 0 (quote a) (quote b))"], sym("a")];
    assert_eq![with_std!["(if () (quote a) (quote b))"], sym("a")];
    assert_eq![with_std!["(if nil (quote a) (quote b))"], sym("a")];
    assert_eq![with_std!["(if (quote #f) (quote a) (quote b))"], sym("b")];
}

#[test]
fn if_evaluates_one_branch() {
    assert_eq![with_std!["(if #t 1 undefined)"], num(1)];
    assert_eq![with_std!["(if #f undefined 2)"], num(2)];
}

#[test]
fn equality() {
    assert_eq![with_std!["(= 2 2)"], sym("#t")];
    assert_eq![with_std!["(= 2 3)"], sym("#f")];
    assert_eq![with_std!["(= 1 1 1 2)"], sym("#f")];
}

#[test]
fn define_then_lookup() {
    assert_eq![with_std!["(begin (define x 5) x)"], num(5)];
    assert_eq![with_std!["(define x (+ 2 3))"], num(5)];
}

#[test]
fn define_persists_in_environment() {
    let env = default_env();
    assert_eq![interpret("(define x 5)", &env), num(5)];
    assert_eq![interpret("x", &env), num(5)];
    assert_eq![interpret("(define x 6)", &env), num(6)];
    assert_eq![interpret("(* x x)", &env), num(36)];
}

#[test]
fn set_bang() {
    assert_eq![with_std!["(begin (define x 1) (set! x 2) x)"], num(2)];
    assert_eq![with_std!["(begin (define x 1) (set! x (+ x 1)))"], num(2)];
    assert_eq![with_std!["(set! x 1)"], rt_err![UnboundSymbol("x".into())]];
}

#[test]
fn car_cdr() {
    assert_eq![with_std!["(car (list 1 2 3))"], num(1)];
    assert_eq![rendered("(cdr (list 1 2 3))"), "(2 3)"];
    assert_eq![with_std!["(cdr (list 1))"], sym("nil")];
    assert_eq![with_std!["(car (list))"], rt_err![EmptyListAccess]];
    assert_eq![with_std!["(car ())"], rt_err![EmptyListAccess]];
    assert_eq![with_std!["(car 5)"], rt_err![BadArgType]];
}

#[test]
fn list_building() {
    assert_eq![rendered("(cons 1 (list 2 3))"), "(1 2 3)"];
    assert_eq![rendered("(cons 1 nil)"), "(1)"];
    assert_eq![rendered("(append (list 1 2) (list 3))"), "(1 2 3)"];
    assert_eq![rendered("(list)"), "()"];
    assert_eq![with_std!["(length (list 1 2 3))"], num(3)];
    assert_eq![with_std!["(null? (list))"], sym("#t")];
    assert_eq![with_std!["(null? (cdr (list 1)))"], sym("#t")];
    assert_eq![with_std!["(null? (list 1))"], sym("#f")];
}

#[test]
fn lambda_immediate() {
    assert_eq![with_std!["((lambda (x) (* x x)) 5)"], num(25)];
    assert_eq![with_null!["((lambda () 7))"], num(7)];
}

#[test]
fn lambda_renders_opaque() {
    assert_eq![rendered("(lambda (x) x)"), "<Lambda>"];
    assert_eq![rendered("car"), "<Proc>"];
}

#[test]
fn lambda_arity() {
    assert_eq![
        with_std!["((lambda (x y) x) 1)"],
        rt_err![ArgumentCount {
            expected: 2,
            passed: 1
        }]
    ];
    assert_eq![
        with_std!["((lambda () 1) 2)"],
        rt_err![ArgumentCount {
            expected: 0,
            passed: 1
        }]
    ];
}

#[test]
fn not_a_procedure() {
    assert_eq![with_std!["(1 2 3)"], rt_err![NotAProcedure("1".into())]];
    assert_eq![with_std!["((list 1) 2)"], rt_err![NotAProcedure("(1)".into())]];
}

#[test]
fn closures_capture_scope() {
    let program = "(begin
        (define make-adder (lambda (n) (lambda (x) (+ x n))))
        (define add2 (make-adder 2))
        (define add10 (make-adder 10))
        (list (add2 1) (add10 1)))";
    assert_eq![rendered(program), "(3 11)"];
}

#[test]
fn closures_share_mutable_state() {
    let program = "(begin
        (define make-counter
          (lambda (count)
            (lambda (step) (set! count (+ count step)))))
        (define counter (make-counter 0))
        (counter 1)
        (counter 1)
        (counter 5))";
    assert_eq![with_std![program], num(7)];
}

#[test]
fn define_in_call_is_local() {
    let env = default_env();
    assert!(interpret("(define f (lambda (x) (define y x)))", &env).is_ok());
    assert_eq![interpret("(f 3)", &env), num(3)];
    assert_eq![interpret("y", &env), rt_err![UnboundSymbol("y".into())]];
}

#[test]
fn recursion() {
    let env = default_env();
    interpret(
        "(define fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1))))))",
        &env,
    ).expect("define");
    assert_eq![interpret("(fact 10)", &env), num(3628800)];

    interpret(
        "(define fib (lambda (n) (if (< n 2) n (+ (fib (- n 1)) (fib (- n 2))))))",
        &env,
    ).expect("define");
    assert_eq![interpret("(fib 15)", &env), num(610)];
}

#[test]
fn list_recursion() {
    let env = default_env();
    interpret(
        "(define sum (lambda (xs) (if (null? xs) 0 (+ (car xs) (sum (cdr xs))))))",
        &env,
    ).expect("define");
    assert_eq![interpret("(sum (list 1 2 3 4))", &env), num(10)];

    interpret(
        "(define map (lambda (f xs) (if (null? xs) (list) (cons (f (car xs)) (map f (cdr xs))))))",
        &env,
    ).expect("define");
    assert_eq![
        interpret("(map (lambda (x) (* x x)) (list 1 2 3))", &env)
            .map(|v| v.to_string()),
        Ok("(1 4 9)".to_string())
    ];
}

#[test]
fn runaway_recursion() {
    let env = default_env();
    interpret("(define loop (lambda (n) (loop (+ n 1))))", &env).expect("define");
    assert_eq![interpret_with_depth("(loop 0)", &env, 64), rt_err![StackOverflow]];
}

const COUNT: &str = "(define count (lambda (n) (if (= n 0) 0 (+ 1 (count (- n 1))))))";

#[test]
fn deep_recursion_hits_default_limit() {
    let env = default_env();
    interpret(COUNT, &env).expect("define");

    assert_eq![interpret("(count 300)", &env), num(300)];
    assert_eq![interpret("(count 400)", &env), rt_err![StackOverflow]];
    assert_eq![interpret("(count 5)", &env), num(5)];
}

#[test]
fn deep_recursion_on_small_stack() {
    let outcome = std::thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(|| {
            let env = default_env();
            interpret(COUNT, &env).expect("define");
            (
                interpret("(count 300)", &env).expect("count").to_string(),
                interpret("(count 400)", &env) == rt_err![StackOverflow],
            )
        })
        .expect("spawn")
        .join()
        .expect("evaluation thread aborted");

    assert_eq![outcome, ("300".to_string(), true)];
}

#[test]
fn begin() {
    assert_eq![with_std!["(begin 1 2 3)"], num(3)];
    assert_eq![with_std!["(begin 1)"], num(1)];
    assert_eq![with_std!["(begin)"], rt_err![BadSpecialForm("begin")]];
}

#[test]
fn malformed_special_forms() {
    assert_eq![with_std!["(quote)"], rt_err![BadSpecialForm("quote")]];
    assert_eq![with_std!["(if)"], rt_err![BadSpecialForm("if")]];
    assert_eq![with_std!["(if #t)"], rt_err![BadSpecialForm("if")]];
    assert_eq![with_std!["(define 1 2)"], rt_err![BadSpecialForm("define")]];
    assert_eq![with_std!["(set! x)"], rt_err![BadSpecialForm("set!")]];
    assert_eq![with_std!["(lambda x x)"], rt_err![BadSpecialForm("lambda")]];
    assert_eq![with_std!["(lambda (1) x)"], rt_err![BadSpecialForm("lambda")]];
    assert_eq![with_std!["(lambda (x))"], rt_err![BadSpecialForm("lambda")]];
}

#[test]
fn reader_errors() {
    assert_eq![
        with_std!["(+ 1 2"],
        Err(InterpreterError::Reader(ReaderError::MismatchedParentheses))
    ];
    assert_eq![
        with_std![""],
        Err(InterpreterError::Reader(ReaderError::UnexpectedEOF))
    ];
}

#[test]
fn only_first_expression() {
    assert_eq![with_std!["(+ 1 1) (+ 2 2)"], num(2)];
}

#[test]
fn error_messages() {
    let err = with_null!["y"].unwrap_err();
    assert_eq![err.to_string(), "Error: unbound symbol 'y'"];

    let err = with_null!["(a"].unwrap_err();
    assert_eq![err.to_string(), "Invalid input: the brackets don't match"];
}
