//! Aliased properties.
//!
//! An aliased property mirrors another key on the same object: reads and
//! writes are forwarded to the target key, and once the alias key is watched
//! the alias registers itself as a dependent of the target so target changes
//! notify the alias's watchers too.
//!
//! Registration is lazy. Most aliases are declared on shared factories and
//! only a fraction of instances are ever observed, so the dependency edge is
//! created when the first watcher arrives (`will_watch`) rather than at
//! declaration. Both registration and removal are gated on `Meta::peek_deps`
//! and therefore idempotent.

use crate::dependent_keys::{add_dependent_keys, remove_dependent_keys};
use crate::error::{PropertyError, Result};
use crate::properties::{self, define_property, inspect, Descriptor, Slot};
use crate::registry::{ObjectId, Registry};
use crate::value::Value;
use smallvec::{smallvec, SmallVec};
use std::rc::Rc;

/// Creates a two-way alias mirroring `target_key`.
pub fn alias(target_key: impl Into<String>) -> AliasedProperty {
    AliasedProperty::new(target_key.into())
}

/// Write strategy of an aliased property. Fixed before the descriptor is
/// installed; reads behave identically in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasMode {
    /// Writes forward to the target key.
    TwoWay,
    /// Writes raise `ReadOnlyWrite`.
    ReadOnly,
    /// The first write detaches the alias and leaves an ordinary property.
    OneWay,
}

#[derive(Debug, Clone)]
pub struct AliasedProperty {
    target_key: String,
    dependent_keys: SmallVec<[String; 1]>,
    mode: AliasMode,
}

impl AliasedProperty {
    pub fn new(target_key: String) -> Self {
        let dependent_keys = smallvec![target_key.clone()];
        AliasedProperty {
            target_key,
            dependent_keys,
            mode: AliasMode::TwoWay,
        }
    }

    pub fn target_key(&self) -> &str {
        &self.target_key
    }

    pub fn mode(&self) -> AliasMode {
        self.mode
    }

    /// Builder: writes raise `ReadOnlyWrite` instead of forwarding. Consumes
    /// `self`, so the mode cannot change once the descriptor is installed.
    pub fn read_only(mut self) -> Self {
        self.mode = AliasMode::ReadOnly;
        self
    }

    /// Builder: the first write replaces the alias with an ordinary stored
    /// property. Consumes `self`; see `read_only`.
    pub fn one_way(mut self) -> Self {
        self.mode = AliasMode::OneWay;
        self
    }

    fn add_dependent_key_if_missing(
        &self,
        registry: &mut Registry,
        object: ObjectId,
        key: &str,
    ) -> Result<()> {
        if !registry.meta(object)?.peek_deps(&self.target_key, key) {
            add_dependent_keys(self, registry, object, key)?;
        }
        Ok(())
    }

    fn remove_dependent_key_if_added(
        &self,
        registry: &mut Registry,
        object: ObjectId,
        key: &str,
    ) -> Result<()> {
        if registry.meta(object)?.peek_deps(&self.target_key, key) {
            remove_dependent_keys(self, registry, object, key)?;
        }
        Ok(())
    }
}

impl Descriptor for AliasedProperty {
    fn setup(&self, registry: &mut Registry, object: ObjectId, key: &str) -> Result<()> {
        if self.target_key == key {
            return Err(PropertyError::SelfReferentialAlias {
                key: key.to_string(),
            });
        }
        // If the key is already watched the lazy path has already passed;
        // register the edge now.
        if registry.meta(object)?.peek_watching(key) {
            add_dependent_keys(self, registry, object, key)?;
        }
        Ok(())
    }

    fn teardown(&self, registry: &mut Registry, object: ObjectId, key: &str) -> Result<()> {
        self.remove_dependent_key_if_added(registry, object, key)
    }

    fn get(&self, registry: &mut Registry, object: ObjectId, key: &str) -> Result<Value> {
        // Re-asserted on every read: an edge dropped outside the normal
        // unwatch path heals on the next read.
        self.add_dependent_key_if_missing(registry, object, key)?;
        properties::get(registry, object, &self.target_key)
    }

    fn set(
        &self,
        registry: &mut Registry,
        object: ObjectId,
        key: &str,
        value: Value,
    ) -> Result<Value> {
        match self.mode {
            AliasMode::TwoWay => properties::set(registry, object, &self.target_key, value),
            AliasMode::ReadOnly => Err(PropertyError::ReadOnlyWrite {
                key: key.to_string(),
                object: inspect(registry, object),
            }),
            AliasMode::OneWay => {
                // Detach: replacing the slot runs this descriptor's teardown,
                // which drops any registered edge. The target is untouched and
                // `key` is an ordinary property from here on.
                define_property(registry, object, key, Value::Null)?;
                properties::set(registry, object, key, value)
            }
        }
    }

    fn will_watch(&self, registry: &mut Registry, object: ObjectId, key: &str) -> Result<()> {
        self.add_dependent_key_if_missing(registry, object, key)
    }

    fn did_unwatch(&self, registry: &mut Registry, object: ObjectId, key: &str) -> Result<()> {
        self.remove_dependent_key_if_added(registry, object, key)
    }

    fn dependent_keys(&self) -> &[String] {
        &self.dependent_keys
    }

    fn describe(&self) -> String {
        format!("<alias of '{}'>", self.target_key)
    }
}

impl From<AliasedProperty> for Slot {
    fn from(descriptor: AliasedProperty) -> Self {
        Slot::Descriptor(Rc::new(descriptor))
    }
}
