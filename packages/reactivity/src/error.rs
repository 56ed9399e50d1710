//! Property System Errors

use crate::registry::ObjectId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PropertyError>;

/// Errors raised by property declaration and access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// An alias was declared with its own key as the target.
    #[error("Setting alias '{key}' on self")]
    SelfReferentialAlias { key: String },

    /// A write was attempted against a read-only alias. `object` carries the
    /// diagnostic rendering of the host at the time of the write.
    #[error("Cannot set read-only property '{key}' on object: {object}")]
    ReadOnlyWrite { key: String, object: String },

    /// The object id was never created or has been destroyed.
    #[error("Unknown object: {0}")]
    UnknownObject(ObjectId),
}
