pub const IF: &str = "if";
pub const SET_BANG: &str = "set!";
pub const QUOTE: &str = "quote";
pub const BEGIN: &str = "begin";
pub const DEFINE: &str = "define";
pub const LAMBDA: &str = "lambda";

macro_rules! one_of {
    ($x:expr, [$c:expr]) => ($x == $c);
    ($x:expr, [ $c:expr, $( $d:expr ),* ]) => (
        $x == $c || one_of!($x, [$( $d ),* ])
    )
}

pub fn is_special_form(name: &str) -> bool {
    match name.len() {
        2 => one_of!(name, [IF]),
        4 => one_of!(name, [SET_BANG]),
        5 => one_of!(name, [QUOTE, BEGIN]),
        6 => one_of!(name, [DEFINE, LAMBDA]),
        _ => false,
    }
}
