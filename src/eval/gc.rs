use gc::{Gc, GcCell, Trace};

/// A garbage-collected, mutable shared pointer
pub type GcShared<T> = Gc<GcCell<T>>;

pub(crate) fn shared<T: Trace>(x: T) -> GcShared<T> {
    Gc::new(GcCell::new(x))
}
