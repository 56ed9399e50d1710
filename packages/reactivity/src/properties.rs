//! Property slots, the descriptor seam, and the accessor layer.
//!
//! A property slot is a tagged variant: either a plain stored value or a
//! computed/aliased descriptor. `get`, `set` and `define_property` dispatch
//! on that tag instead of inspecting runtime types.

use crate::error::Result;
use crate::registry::{ObjectId, Registry};
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// One property slot on an object.
#[derive(Debug, Clone)]
pub enum Slot {
    /// An ordinary stored value.
    Value(Value),
    /// A computed/aliased property. Descriptors are shared per-declaration;
    /// per-(object, key) state lives in the object's `Meta`, never here.
    Descriptor(Rc<dyn Descriptor>),
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Slot::Value(value)
    }
}

/// Hooks a computed/aliased property plugs into the accessor layer and the
/// watcher lifecycle. All hooks are synchronous and run to completion.
pub trait Descriptor: fmt::Debug {
    /// Called once when the descriptor is installed under `key`. A failed
    /// setup aborts the declaration.
    fn setup(&self, registry: &mut Registry, object: ObjectId, key: &str) -> Result<()> {
        let _ = (registry, object, key);
        Ok(())
    }

    /// Called when the descriptor is detached or its object destroyed.
    fn teardown(&self, registry: &mut Registry, object: ObjectId, key: &str) -> Result<()> {
        let _ = (registry, object, key);
        Ok(())
    }

    fn get(&self, registry: &mut Registry, object: ObjectId, key: &str) -> Result<Value>;

    fn set(&self, registry: &mut Registry, object: ObjectId, key: &str, value: Value)
        -> Result<Value>;

    /// Invoked when `key` gains its first watcher.
    fn will_watch(&self, registry: &mut Registry, object: ObjectId, key: &str) -> Result<()> {
        let _ = (registry, object, key);
        Ok(())
    }

    /// Invoked when `key` loses its last watcher.
    fn did_unwatch(&self, registry: &mut Registry, object: ObjectId, key: &str) -> Result<()> {
        let _ = (registry, object, key);
        Ok(())
    }

    /// Keys whose changes must notify watchers of the key this descriptor is
    /// installed under.
    fn dependent_keys(&self) -> &[String] {
        &[]
    }

    /// Short placeholder used by `inspect`.
    fn describe(&self) -> String;
}

/// Reads `key` on `object`. Plain slots return the stored value, descriptor
/// slots delegate to the descriptor, missing keys read as `Value::Null`.
pub fn get(registry: &mut Registry, object: ObjectId, key: &str) -> Result<Value> {
    let slot = registry.state(object)?.slots.get(key).cloned();
    match slot {
        Some(Slot::Value(value)) => Ok(value),
        Some(Slot::Descriptor(descriptor)) => descriptor.get(registry, object, key),
        None => Ok(Value::Null),
    }
}

/// Writes `key` on `object` and returns the written value. Descriptor slots
/// delegate to the descriptor; plain writes notify watchers unless the value
/// is unchanged.
pub fn set(registry: &mut Registry, object: ObjectId, key: &str, value: Value) -> Result<Value> {
    if let Some(descriptor) = registry.descriptor(object, key)? {
        return descriptor.set(registry, object, key, value);
    }
    {
        let state = registry.state_mut(object)?;
        if let Some(Slot::Value(current)) = state.slots.get(key) {
            if *current == value {
                return Ok(value);
            }
        }
        state.slots.insert(key.to_string(), Slot::Value(value.clone()));
    }
    registry.notify_property_change(object, key)?;
    Ok(value)
}

/// Installs a slot under `key`, tearing down any descriptor it replaces and
/// running the new descriptor's setup. A failed setup removes the slot again:
/// a failed declaration leaves the key undefined and registers nothing.
pub fn define_property(
    registry: &mut Registry,
    object: ObjectId,
    key: &str,
    slot: impl Into<Slot>,
) -> Result<()> {
    let slot = slot.into();
    if let Some(previous) = registry.descriptor(object, key)? {
        previous.teardown(registry, object, key)?;
    }
    let descriptor = match &slot {
        Slot::Descriptor(descriptor) => Some(Rc::clone(descriptor)),
        Slot::Value(_) => None,
    };
    registry.state_mut(object)?.slots.insert(key.to_string(), slot);
    if let Some(descriptor) = descriptor {
        if let Err(error) = descriptor.setup(registry, object, key) {
            registry.state_mut(object)?.slots.shift_remove(key);
            return Err(error);
        }
    }
    Ok(())
}

/// Diagnostic rendering of an object's properties, used in error messages.
pub fn inspect(registry: &Registry, object: ObjectId) -> String {
    let Ok(state) = registry.state(object) else {
        return object.to_string();
    };
    let parts: Vec<String> = state
        .slots
        .iter()
        .map(|(key, slot)| match slot {
            Slot::Value(value) => format!("{}: {}", key, value),
            Slot::Descriptor(descriptor) => format!("{}: {}", key, descriptor.describe()),
        })
        .collect();
    format!("{{{}}}", parts.join(", "))
}
