//! Core payload shapes understood by every participant.
//!
//! These are the protocol-level payloads: liveness, health, logging, and
//! acknowledgement. The long tail of domain payloads is generated
//! externally and registered through the codec's catalog boundary; this
//! closed set is what the generic envelope decoder falls back to when no
//! specific decoder is registered.

use crate::enums::{LogSeverity, ServiceHealth};
use crate::identifier::TypeIdentifier;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Liveness beacon emitted periodically by every participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heartbeat {
    pub sequence: u64,
    pub uptime_s: u64,
}

impl Heartbeat {
    pub const TYPE_ID: &'static str = "heartbeat.b";
    pub const VERSION: &'static str = "001";
}

/// Health report for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeStatus {
    pub state: ServiceHealth,
    #[serde(default)]
    pub detail: String,
}

impl RuntimeStatus {
    pub const TYPE_ID: &'static str = "status.b";
    pub const VERSION: &'static str = "001";
}

/// Log line forwarded over the transport for central collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub severity: LogSeverity,
    pub text: String,
}

impl LogRecord {
    pub const TYPE_ID: &'static str = "log.b";
    pub const VERSION: &'static str = "001";
}

/// Receipt for a message that was sent with ack-required delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub acked_id: String,
}

impl Acknowledgement {
    pub const TYPE_ID: &'static str = "ack.b";
    pub const VERSION: &'static str = "001";
}

/// Closed set of payload variants the generic envelope decoder accepts,
/// discriminated by the payload's type field.
#[derive(Debug, Clone, PartialEq)]
pub enum KnownPayload {
    Heartbeat(Heartbeat),
    Status(RuntimeStatus),
    Log(LogRecord),
    Ack(Acknowledgement),
}

impl KnownPayload {
    pub fn type_id(&self) -> &'static str {
        match self {
            Self::Heartbeat(_) => Heartbeat::TYPE_ID,
            Self::Status(_) => RuntimeStatus::TYPE_ID,
            Self::Log(_) => LogRecord::TYPE_ID,
            Self::Ack(_) => Acknowledgement::TYPE_ID,
        }
    }

    pub fn version(&self) -> &'static str {
        match self {
            Self::Heartbeat(_) => Heartbeat::VERSION,
            Self::Status(_) => RuntimeStatus::VERSION,
            Self::Log(_) => LogRecord::VERSION,
            Self::Ack(_) => Acknowledgement::VERSION,
        }
    }

    /// Decode `value` as the variant selected by `type_id`.
    ///
    /// Returns `Ok(None)` when the identifier names no variant of this set,
    /// leaving the caller to decide whether that is an error. The match is
    /// exhaustive over the set: adding a variant without extending it is a
    /// compile-time reminder via the accessors above.
    pub fn from_value(
        type_id: &TypeIdentifier,
        value: Value,
    ) -> Result<Option<Self>, serde_json::Error> {
        Ok(Some(match type_id.as_str() {
            Heartbeat::TYPE_ID => Self::Heartbeat(serde_json::from_value(value)?),
            RuntimeStatus::TYPE_ID => Self::Status(serde_json::from_value(value)?),
            LogRecord::TYPE_ID => Self::Log(serde_json::from_value(value)?),
            Acknowledgement::TYPE_ID => Self::Ack(serde_json::from_value(value)?),
            _ => return Ok(None),
        }))
    }

    /// Wire rendering: the variant's fields plus its type and version tags.
    pub fn to_tagged_value(&self) -> Result<Value, serde_json::Error> {
        let mut value = match self {
            Self::Heartbeat(p) => serde_json::to_value(p)?,
            Self::Status(p) => serde_json::to_value(p)?,
            Self::Log(p) => serde_json::to_value(p)?,
            Self::Ack(p) => serde_json::to_value(p)?,
        };
        if let Some(fields) = value.as_object_mut() {
            fields.insert("type".into(), Value::String(self.type_id().into()));
            fields.insert("version".into(), Value::String(self.version().into()));
        }
        Ok(value)
    }
}

impl Serialize for KnownPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_tagged_value()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
