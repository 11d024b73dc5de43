//! Wire schema identifiers and versions.
//!
//! Every payload names its schema with a dotted lowercase [`TypeIdentifier`]
//! (e.g. `heartbeat.b`) and carries a separate 3-digit zero-padded
//! [`SchemaVersion`]. Identifiers are opaque routing keys: the decoder
//! registry dispatches on the identifier alone, while versions are
//! reconciled by whichever decoder owns the schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dotted lowercase name of a wire schema, e.g. `heartbeat.b`.
///
/// The string is opaque to the protocol core: it is never parsed for
/// meaning, only compared and hashed. Renaming a type in code does not
/// change its identifier; the identifier *is* the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeIdentifier(String);

impl TypeIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeIdentifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeIdentifier {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// 3-digit zero-padded schema version, e.g. `001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    pub fn new(epoch: u16) -> Self {
        Self(format!("{epoch:03}"))
    }

    /// Accepts the wire spelling as-is, zero-padding bare integers that
    /// older senders emitted unpadded (`"1"` becomes `"001"`).
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().parse::<u16>() {
            Ok(epoch) => Self::new(epoch),
            Err(_) => Self(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SchemaVersion {
    fn from(raw: &str) -> Self {
        Self::from_wire(raw)
    }
}
