//! # Message Envelope - Construction and Header Inference
//!
//! ## Purpose
//! Generic Header + Payload wrapper used for all messages. The builder
//! derives missing header fields from the payload itself, so callers hand
//! over a typed payload and get back a fully addressed message.
//!
//! ## Field Precedence
//! Each header field is resolved independently, highest priority first:
//!
//! 1. explicit builder argument
//! 2. field declared on the payload (probed under the historical key lists
//!    below, in order, first match wins)
//! 3. field from an explicitly supplied base header
//! 4. default (empty string / generated message id / fire-and-forget)
//!
//! `message_type` has no default: a message that cannot be typed by any of
//! the three sources fails construction with
//! [`EnvelopeError::MissingMessageType`].
//!
//! Pure construction; no I/O.

use crate::enums::DeliveryMode;
use crate::error::EnvelopeError;
use crate::header::Header;
use crate::identifier::TypeIdentifier;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Identifier under which generically-decoded envelopes are registered.
pub const ENVELOPE_TYPE: &str = "envelope.b";

// Ordered historical key names probed on payloads for each header field.
// The wire format accreted aliases over time; the lists are explicit so
// probe order stays visible and testable.

/// The type field has carried three names across schema generations.
pub const MESSAGE_TYPE_KEYS: &[&str] = &["message_type", "msg_type", "type"];
pub const SRC_KEYS: &[&str] = &["src", "source"];
pub const DST_KEYS: &[&str] = &["dst", "target"];
pub const MESSAGE_ID_KEYS: &[&str] = &["message_id", "msg_id"];
pub const VERSION_KEYS: &[&str] = &["version"];

/// Header + arbitrary typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<P> {
    pub header: Header,
    pub payload: P,
}

impl<P: Serialize> Envelope<P> {
    pub fn builder(payload: P) -> EnvelopeBuilder<P> {
        EnvelopeBuilder::new(payload)
    }
}

/// First string value found under any of `keys`, in list order.
pub fn probe_str(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| fields.get(*key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Staged construction of an [`Envelope`] with header inference.
pub struct EnvelopeBuilder<P> {
    payload: P,
    src: Option<String>,
    dst: Option<String>,
    message_id: Option<String>,
    message_type: Option<TypeIdentifier>,
    delivery: Option<DeliveryMode>,
    base: Option<Header>,
}

impl<P: Serialize> EnvelopeBuilder<P> {
    pub fn new(payload: P) -> Self {
        Self {
            payload,
            src: None,
            dst: None,
            message_id: None,
            message_type: None,
            delivery: None,
            base: None,
        }
    }

    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    pub fn dst(mut self, dst: impl Into<String>) -> Self {
        self.dst = Some(dst.into());
        self
    }

    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub fn message_type(mut self, message_type: impl Into<TypeIdentifier>) -> Self {
        self.message_type = Some(message_type.into());
        self
    }

    pub fn delivery(mut self, delivery: DeliveryMode) -> Self {
        self.delivery = Some(delivery);
        self
    }

    /// Base header consulted after explicit arguments and payload fields.
    pub fn base_header(mut self, header: Header) -> Self {
        self.base = Some(header);
        self
    }

    pub fn build(self) -> Result<Envelope<P>, EnvelopeError> {
        // Payload fields participate in precedence only when the payload
        // renders to a JSON object; scalar payloads declare nothing.
        let rendered = serde_json::to_value(&self.payload)?;
        let empty = Map::new();
        let fields = rendered.as_object().unwrap_or(&empty);
        let base = self.base;

        let src = self
            .src
            .or_else(|| probe_str(fields, SRC_KEYS))
            .or_else(|| base.as_ref().map(|h| h.src.clone()))
            .unwrap_or_default();
        let dst = self
            .dst
            .or_else(|| probe_str(fields, DST_KEYS))
            .or_else(|| base.as_ref().map(|h| h.dst.clone()))
            .unwrap_or_default();
        let message_id = self
            .message_id
            .or_else(|| probe_str(fields, MESSAGE_ID_KEYS))
            .or_else(|| base.as_ref().map(|h| h.message_id.clone()))
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        // An empty identifier at any level counts as unset, never as a type.
        let message_type = self
            .message_type
            .filter(|id| !id.is_empty())
            .or_else(|| {
                probe_str(fields, MESSAGE_TYPE_KEYS)
                    .filter(|name| !name.is_empty())
                    .map(TypeIdentifier::new)
            })
            .or_else(|| base.map(|h| h.message_type).filter(|id| !id.is_empty()))
            .ok_or(EnvelopeError::MissingMessageType)?;
        let delivery = self.delivery.unwrap_or_default();

        Ok(Envelope {
            header: Header {
                src,
                dst,
                message_id,
                message_type,
                delivery,
            },
            payload: self.payload,
        })
    }
}
