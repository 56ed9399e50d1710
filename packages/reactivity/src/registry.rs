//! The object registry.
//!
//! A single explicit side-table owning every object's property slots and its
//! watch/dependency metadata. All property operations take the registry by
//! `&mut` reference; there is no global state. Execution is single-threaded
//! and run-to-completion, so every operation is atomic with respect to every
//! other.

use crate::error::{PropertyError, Result};
use crate::meta::Meta;
use crate::properties::{Descriptor, Slot};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// Opaque identity handle for a registered object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<object:{}>", self.0)
    }
}

/// A change event delivered to watchers of `key` on `object`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChange {
    pub object: ObjectId,
    pub key: String,
}

#[derive(Debug, Default)]
pub(crate) struct ObjectState {
    pub(crate) slots: IndexMap<String, Slot>,
    pub(crate) meta: Meta,
}

#[derive(Debug, Default)]
pub struct Registry {
    objects: IndexMap<ObjectId, ObjectState>,
    changes: Vec<PropertyChange>,
    next_object: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_object(&mut self) -> ObjectId {
        self.next_object += 1;
        let object = ObjectId(self.next_object);
        self.objects.insert(object, ObjectState::default());
        object
    }

    pub fn is_alive(&self, object: ObjectId) -> bool {
        self.objects.contains_key(&object)
    }

    /// Runs the teardown hook of every descriptor installed on the object,
    /// then drops its state. Subsequent operations on the id fail with
    /// `UnknownObject`.
    pub fn destroy_object(&mut self, object: ObjectId) -> Result<()> {
        let descriptors: Vec<(String, Rc<dyn Descriptor>)> = self
            .state(object)?
            .slots
            .iter()
            .filter_map(|(key, slot)| match slot {
                Slot::Descriptor(descriptor) => Some((key.clone(), Rc::clone(descriptor))),
                Slot::Value(_) => None,
            })
            .collect();
        for (key, descriptor) in descriptors {
            descriptor.teardown(self, object, &key)?;
        }
        self.objects.shift_remove(&object);
        Ok(())
    }

    pub fn meta(&self, object: ObjectId) -> Result<&Meta> {
        Ok(&self.state(object)?.meta)
    }

    pub fn meta_mut(&mut self, object: ObjectId) -> Result<&mut Meta> {
        Ok(&mut self.state_mut(object)?.meta)
    }

    /// Records change events for `key` and, transitively, for every watched
    /// key that depends on it. Each key is visited at most once per
    /// notification, so dependency cycles terminate.
    pub fn notify_property_change(&mut self, object: ObjectId, key: &str) -> Result<()> {
        let mut visited: Vec<String> = Vec::new();
        self.notify_inner(object, key, &mut visited)
    }

    /// Drains the accumulated change events.
    pub fn take_changes(&mut self) -> Vec<PropertyChange> {
        std::mem::take(&mut self.changes)
    }

    fn notify_inner(
        &mut self,
        object: ObjectId,
        key: &str,
        visited: &mut Vec<String>,
    ) -> Result<()> {
        if visited.iter().any(|seen| seen == key) {
            return Ok(());
        }
        visited.push(key.to_string());

        let meta = self.meta(object)?;
        let watched = meta.peek_watching(key);
        let dependents = meta.dependents_of(key);

        if watched {
            self.changes.push(PropertyChange {
                object,
                key: key.to_string(),
            });
        }
        for dependent in dependents {
            self.notify_inner(object, &dependent, visited)?;
        }
        Ok(())
    }

    /// The descriptor installed under `key`, if any.
    pub(crate) fn descriptor(
        &self,
        object: ObjectId,
        key: &str,
    ) -> Result<Option<Rc<dyn Descriptor>>> {
        Ok(match self.state(object)?.slots.get(key) {
            Some(Slot::Descriptor(descriptor)) => Some(Rc::clone(descriptor)),
            _ => None,
        })
    }

    pub(crate) fn state(&self, object: ObjectId) -> Result<&ObjectState> {
        self.objects
            .get(&object)
            .ok_or(PropertyError::UnknownObject(object))
    }

    pub(crate) fn state_mut(&mut self, object: ObjectId) -> Result<&mut ObjectState> {
        self.objects
            .get_mut(&object)
            .ok_or(PropertyError::UnknownObject(object))
    }
}
