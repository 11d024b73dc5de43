//! Resolution and load-time errors for the configuration entity graph.
//!
//! These are programming/configuration defects surfaced while loading:
//! fatal to the load, not to an already-running system.

use crate::entity::EntityKind;
use thiserror::Error;

/// Entity graph errors
#[derive(Debug, Error)]
pub enum ResolveError {
    /// `resolve` is callable exactly once per entity.
    #[error("participant '{id}' is already resolved")]
    AlreadyResolved { id: String },

    /// The referenced identifier is absent from the context or names an
    /// entity of the wrong concrete kind.
    #[error("reference '{id}' cannot be resolved: expected a {expected} entity")]
    UnresolvedReference { id: String, expected: EntityKind },

    /// The identifier handed to `resolve_participant` names no loaded
    /// entity at all.
    #[error("no entity '{id}' in the resolution context")]
    UnknownEntity { id: String },

    /// Two loaded entities claim the same identifier.
    #[error("duplicate entity identifier '{id}'")]
    DuplicateEntity { id: String },

    /// The configuration file is not valid TOML for the entity schema.
    #[error("configuration parse failed: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for entity graph operations
pub type ResolveResult<T> = Result<T, ResolveError>;
