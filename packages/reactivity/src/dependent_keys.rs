//! Dependency-edge propagation.
//!
//! Wires a descriptor's declared dependent keys into the host object's
//! dependency adjacency for one specific key. Edges are counted in `Meta`;
//! callers that need idempotence gate on `Meta::peek_deps` before calling.

use crate::error::Result;
use crate::properties::Descriptor;
use crate::registry::{ObjectId, Registry};

/// Adds one edge `dependent key -> key` for every key the descriptor
/// declares, so a change to any of them notifies watchers of `key`.
pub fn add_dependent_keys(
    descriptor: &dyn Descriptor,
    registry: &mut Registry,
    object: ObjectId,
    key: &str,
) -> Result<()> {
    for dependent in descriptor.dependent_keys() {
        registry.meta_mut(object)?.add_dep(dependent, key);
    }
    Ok(())
}

/// Removes the edges added by `add_dependent_keys`.
pub fn remove_dependent_keys(
    descriptor: &dyn Descriptor,
    registry: &mut Registry,
    object: ObjectId,
    key: &str,
) -> Result<()> {
    for dependent in descriptor.dependent_keys() {
        registry.meta_mut(object)?.remove_dep(dependent, key);
    }
    Ok(())
}
