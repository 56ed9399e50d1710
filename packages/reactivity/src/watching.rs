//! Watcher lifecycle for object keys.
//!
//! Watchers are counted per (object, key). Descriptor hooks fire only on the
//! 0 -> 1 and 1 -> 0 transitions, which is what makes lazy dependency
//! registration possible: a descriptor hears about the first watcher and the
//! last unwatch, nothing in between.

use crate::error::Result;
use crate::registry::{ObjectId, Registry};

/// Registers interest in change events for `key`. The first watcher triggers
/// the installed descriptor's `will_watch` hook.
pub fn watch(registry: &mut Registry, object: ObjectId, key: &str) -> Result<()> {
    let count = registry.meta_mut(object)?.add_watcher(key);
    if count == 1 {
        if let Some(descriptor) = registry.descriptor(object, key)? {
            descriptor.will_watch(registry, object, key)?;
        }
    }
    Ok(())
}

/// Removes one watcher. The last watcher leaving triggers `did_unwatch`.
/// Unwatching a key with no watchers is a no-op.
pub fn unwatch(registry: &mut Registry, object: ObjectId, key: &str) -> Result<()> {
    if !registry.meta(object)?.peek_watching(key) {
        return Ok(());
    }
    let count = registry.meta_mut(object)?.remove_watcher(key);
    if count == 0 {
        if let Some(descriptor) = registry.descriptor(object, key)? {
            descriptor.did_unwatch(registry, object, key)?;
        }
    }
    Ok(())
}
