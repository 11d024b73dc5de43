//! Protocol-level errors for message decoding and registry construction.
//!
//! Every decode failure mode has a typed variant; no partial values are
//! ever returned. Registration conflicts are build-time defects surfaced
//! before a registry serves traffic.

use lattice_types::{EnvelopeError, TypeIdentifier};
use thiserror::Error;

/// Decode and registration errors
#[derive(Debug, Error)]
pub enum CodecError {
    /// The declared type has no registered decoder and no fallback applies.
    #[error("no decoder registered for type identifier '{type_id}'")]
    UnknownTypeIdentifier { type_id: TypeIdentifier },

    /// The generic envelope decoder found no payload variant for the
    /// discriminator.
    #[error("no payload variant matches type identifier '{type_id}'")]
    NoDecoderForType { type_id: TypeIdentifier },

    /// A different decode function is already registered under this
    /// identifier. Re-registering the same function is a no-op, not an
    /// error.
    #[error("conflicting decoder registration for type identifier '{type_id}'")]
    DuplicateDecoderConflict { type_id: TypeIdentifier },

    /// A catalog object exposes its type identifier under none of the
    /// recognized conventions.
    #[error("catalog object exposes no type identifier under any recognized convention")]
    CatalogMissingTypeId,

    /// A catalog object exposes a type identifier but no decode entry point.
    #[error("catalog object for '{type_id}' exposes no decode entry point under any recognized convention")]
    CatalogMissingDecoder { type_id: TypeIdentifier },

    /// The raw bytes are not the JSON object shape the envelope requires.
    #[error("malformed envelope: {detail}")]
    MalformedEnvelope { detail: String },

    /// The raw bytes are not valid JSON, or a payload failed to
    /// deserialize into its declared variant.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Header inference failed during a generic envelope decode.
    #[error("envelope construction failed: {0}")]
    Envelope(#[from] EnvelopeError),
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
