//! Envelope header carried by every message.

use crate::enums::DeliveryMode;
use crate::identifier::TypeIdentifier;
use serde::{Deserialize, Serialize};

/// Routing and protocol metadata for one message.
///
/// `message_type` is always resolvable: construction through
/// [`crate::envelope::EnvelopeBuilder`] fails rather than produce an
/// untyped message. The header carries its own fixed [`Header::TYPE_ID`]
/// so it can be transported and logged generically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Sending participant. Required; resolved during construction.
    pub src: String,

    /// Receiving participant; empty means broadcast/unset.
    #[serde(default)]
    pub dst: String,

    /// Per-message unique id, generated when the sender supplies none.
    pub message_id: String,

    /// Wire schema of the payload.
    pub message_type: TypeIdentifier,

    /// Delivery expectations (ack-required etc.).
    #[serde(default)]
    pub delivery: DeliveryMode,
}

impl Header {
    /// Fixed identifier under which headers travel and are logged.
    pub const TYPE_ID: &'static str = "header.b";
    pub const VERSION: &'static str = "001";
}
