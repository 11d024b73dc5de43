//! Error types for envelope construction and enum symbol tables.
//!
//! Structural problems (a message that cannot name its own type) and table
//! construction defects (duplicate symbols) are hard errors. The one
//! deliberate non-error is an unknown symbol arriving on the wire: that
//! resolves to the table's declared default in [`crate::enums`].

use thiserror::Error;

/// Envelope construction errors
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// No explicit argument, payload field, or base header supplied a
    /// message type. Every message must be unambiguously typed.
    #[error("message type missing: not supplied explicitly, by the payload, or by a base header")]
    MissingMessageType,

    /// The payload could not be rendered to JSON for field inspection.
    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Enum symbol table construction defects, surfaced at build time
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnumTableError {
    #[error("duplicate value {value} in enum table '{table}'")]
    DuplicateValue { table: &'static str, value: String },

    #[error("duplicate symbol {symbol:?} in enum table '{table}'")]
    DuplicateSymbol {
        table: &'static str,
        symbol: &'static str,
    },

    #[error("default value {value} is not declared in enum table '{table}'")]
    UndeclaredDefault { table: &'static str, value: String },
}

/// Enum codec lookup errors
///
/// Raised only for values that were never declared in the table, which is a
/// code-level defect. An unknown *wire symbol* is not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnumCodecError {
    #[error("value {value} was never declared in enum table '{table}'")]
    UnknownEnumValue { table: &'static str, value: String },
}
