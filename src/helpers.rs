use std::rc::Rc;

/// Symbol names are shared, never mutated
pub type ImmutableString = Rc<str>;

//
// Macros
//
macro_rules! ok_some {
    ($x:expr) => (Ok(Some($x)))
}

macro_rules! ret_val {
    ($x:expr) => (return ok_some!($x));
}
