//! Writable forwarding wrapper for template arguments.

use crate::reference::{Reference, UpdatableReference};
use std::rc::Rc;
use strand_reactivity::{Result, Value};

/// Marks an updatable reference as an explicitly writable template argument.
/// The wrapper forwards reads and writes and reveals its source through
/// `unwrapped_source`, so a later read-only wrap unwraps it first.
pub fn mutable(source: Rc<dyn UpdatableReference>) -> Rc<MutReference> {
    Rc::new(MutReference { source })
}

pub struct MutReference {
    source: Rc<dyn UpdatableReference>,
}

impl Reference for MutReference {
    fn value(&self) -> Result<Value> {
        self.source.value()
    }

    fn as_updatable(&self) -> Option<&dyn UpdatableReference> {
        Some(self)
    }

    fn unwrapped_source(&self) -> Option<Rc<dyn Reference>> {
        Some(Rc::clone(&self.source) as Rc<dyn Reference>)
    }
}

impl UpdatableReference for MutReference {
    fn update(&self, value: Value) -> Result<Value> {
        self.source.update(value)
    }
}
