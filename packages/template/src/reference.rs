//! Template-evaluation value references.
//!
//! A reference is a readable view of one value slot. Writability is a
//! capability, not a method that fails: callers probe `as_updatable` and skip
//! the write when the capability is absent.

use std::cell::RefCell;
use std::rc::Rc;
use strand_reactivity::{get, set, ObjectId, Registry, Result, Value};

/// Shared single-threaded handle to the property registry used by live
/// references.
pub type SharedRegistry = Rc<RefCell<Registry>>;

/// A readable value slot produced during template evaluation.
pub trait Reference {
    /// The current value of the slot. Never cached here; the source decides
    /// its own caching policy.
    fn value(&self) -> Result<Value>;

    /// The update capability, when this reference supports being written
    /// through. Absence is the signal to skip the write.
    fn as_updatable(&self) -> Option<&dyn UpdatableReference> {
        None
    }

    /// For writable forwarding wrappers, the reference they forward to.
    fn unwrapped_source(&self) -> Option<Rc<dyn Reference>> {
        None
    }
}

/// A reference that can be written through.
pub trait UpdatableReference: Reference {
    /// Writes `value` to the underlying slot and returns the written value.
    fn update(&self, value: Value) -> Result<Value>;
}

/// A fixed value; never updatable.
#[derive(Debug, Clone)]
pub struct ConstReference {
    value: Value,
}

impl ConstReference {
    pub fn new(value: Value) -> Self {
        ConstReference { value }
    }
}

impl Reference for ConstReference {
    fn value(&self) -> Result<Value> {
        Ok(self.value.clone())
    }
}

/// A live view of one property on one object; reads and writes go through the
/// accessor layer, so aliased properties behave exactly as direct access.
pub struct PropertyReference {
    registry: SharedRegistry,
    object: ObjectId,
    key: String,
}

impl PropertyReference {
    pub fn new(registry: SharedRegistry, object: ObjectId, key: impl Into<String>) -> Self {
        PropertyReference {
            registry,
            object,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Reference for PropertyReference {
    fn value(&self) -> Result<Value> {
        get(&mut self.registry.borrow_mut(), self.object, &self.key)
    }

    fn as_updatable(&self) -> Option<&dyn UpdatableReference> {
        Some(self)
    }
}

impl UpdatableReference for PropertyReference {
    fn update(&self, value: Value) -> Result<Value> {
        set(&mut self.registry.borrow_mut(), self.object, &self.key, value)
    }
}
