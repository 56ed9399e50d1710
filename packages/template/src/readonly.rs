//! The read-only reference wrapper.
//!
//! Used when a value is passed into a child scope that must not reassign it.
//! The wrapper keeps the read path live and removes the update capability;
//! capability-checking callers skip the write instead of failing.

use crate::reference::{Reference, UpdatableReference};
use std::rc::Rc;
use strand_reactivity::{Result, Value};

/// Wraps `reference` in a read-only view. A writable forwarding wrapper is
/// unwrapped first so repeated wrapping never stacks forwarding layers. A
/// fresh wrapper is produced on every call; nothing is cached.
pub fn readonly(reference: &Rc<dyn Reference>) -> Rc<dyn Reference> {
    let source = reference
        .unwrapped_source()
        .unwrap_or_else(|| Rc::clone(reference));
    Rc::new(ReadonlyReference { source })
}

/// Read-only view over a source reference.
///
/// The protection is shallow: only reassignment of this slot is disabled. A
/// composite underlying value is not frozen.
pub struct ReadonlyReference {
    source: Rc<dyn Reference>,
}

impl Reference for ReadonlyReference {
    fn value(&self) -> Result<Value> {
        self.source.value()
    }

    fn as_updatable(&self) -> Option<&dyn UpdatableReference> {
        // The capability is absent even when the source carries it.
        None
    }
}
