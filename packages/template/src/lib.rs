#![deny(clippy::all)]

//! Value references for strand template evaluation.
//!
//! References are the currency templates pass between scopes: readable views
//! over properties or constants, optionally writable. [`readonly`] strips the
//! write capability from a reference handed to a child scope.

mod mut_ref;
mod readonly;
mod reference;

pub use mut_ref::{mutable, MutReference};
pub use readonly::{readonly, ReadonlyReference};
pub use reference::{
    ConstReference, PropertyReference, Reference, SharedRegistry, UpdatableReference,
};
