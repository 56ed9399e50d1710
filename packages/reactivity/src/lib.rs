#![deny(clippy::all)]

//! Property system for the strand object model.
//!
//! Objects live in an explicit [`Registry`]; each key holds either a plain
//! value or a descriptor. The one descriptor shipped here is the aliased
//! property: reads and writes redirect to another key on the same object, and
//! watchers of the alias are notified when the target changes.

pub mod alias;
pub mod dependent_keys;
mod error;
pub mod meta;
pub mod properties;
pub mod registry;
pub mod value;
pub mod watching;

pub use alias::{alias, AliasMode, AliasedProperty};
pub use dependent_keys::{add_dependent_keys, remove_dependent_keys};
pub use error::{PropertyError, Result};
pub use meta::Meta;
pub use properties::{define_property, get, inspect, set, Descriptor, Slot};
pub use registry::{ObjectId, PropertyChange, Registry};
pub use value::Value;
pub use watching::{unwatch, watch};
