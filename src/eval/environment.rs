use gc::{Finalize, Trace};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use super::gc::GcShared;
use crate::helpers::ImmutableString;

/// One scope of the lexical chain. The root scope has no parent.
pub struct Environment<V: Trace + 'static> {
    pub(super) parent: Option<GcShared<Environment<V>>>,
    pub(super) bindings: HashMap<ImmutableString, V>,
}

impl<V: Trace + Clone> Default for Environment<V> {
    fn default() -> Environment<V> {
        Environment::new(None)
    }
}

// Values are left out: a closure bound here may point back at this scope.
impl<V: Trace> Debug for Environment<V> {
    fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
        let mut names: Vec<&str> = self.bindings.keys().map(|name| &**name).collect();
        names.sort_unstable();

        fmt.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("names", &names)
            .finish()
    }
}

impl<V: Trace> Environment<V> {
    /// Number of enclosing scopes, 0 for the root
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut next = self.parent.clone();

        while let Some(env) = next {
            depth += 1;
            next = env.borrow().parent.clone();
        }

        depth
    }
}

impl<V: Trace> Finalize for Environment<V> {}
unsafe impl<V: Trace> Trace for Environment<V> {
    custom_trace!(this, {
        for value in this.bindings.values() {
            mark(value);
        }
        if let Some(ref parent) = this.parent {
            mark(parent);
        }
    });
}

impl<V: Trace + Clone> Environment<V> {
    pub fn new(parent: Option<GcShared<Environment<V>>>) -> Environment<V> {
        Environment {
            parent,
            bindings: HashMap::new(),
        }
    }

    /// A new innermost scope binding `params` to `args` positionally.
    /// Callers check that both have the same length.
    pub fn bind_params(
        params: &[ImmutableString],
        args: Vec<V>,
        outer: &GcShared<Environment<V>>,
    ) -> Environment<V> {
        let mut env = Environment::new(Some(outer.clone()));

        for (name, value) in params.iter().zip(args.into_iter()) {
            env.define(name.clone(), value);
        }

        env
    }

    /// Creates or overwrites a binding in this scope only
    pub fn define(&mut self, name: ImmutableString, value: V) {
        self.bindings.insert(name, value);
    }

    /// Overwrites the nearest existing binding. Returns `false` when the
    /// name is unbound in the whole chain.
    pub fn set(&mut self, name: &str, value: V) -> bool {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return true;
        }

        let mut env = match self.parent {
            Some(ref parent) => parent.clone(),
            None => return false,
        };

        loop {
            env = {
                let mut envref = env.borrow_mut();

                if let Some(slot) = envref.bindings.get_mut(name) {
                    *slot = value;
                    return true;
                }

                match envref.parent {
                    Some(ref parent) => parent.clone(),
                    None => return false,
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<V> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }

        let mut environment = self.parent.clone()?;

        loop {
            environment = {
                let borrowed = environment.borrow();
                if let Some(value) = borrowed.bindings.get(name) {
                    return Some(value.clone());
                }
                borrowed.parent.clone()?
            }
        }
    }
}
