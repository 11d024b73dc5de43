//! # Generic Envelope Decode - Discriminated-Union Fallback
//!
//! ## Purpose
//! Decode path for messages whose declared type has no specific decoder
//! registered: parse the header, then attempt the remaining payload against
//! the closed [`KnownPayload`] set, selected by the discriminator field.
//!
//! Header fields are recovered with the same precedence the envelope
//! builder applies on the sending side: a field declared by the payload
//! wins over one declared by the header object, defaults last. Both the
//! nested `{"header": ..., "payload": ...}` layout and the older flat
//! layout (header fields inline with the payload) are accepted.

use crate::error::{CodecError, CodecResult};
use crate::registry::{DecodeFn, DecoderRegistry};
use crate::wire;
use lattice_types::envelope::probe_str;
use lattice_types::{
    DeliveryMode, Envelope, EnvelopeError, Header, KnownPayload, TypeIdentifier, DELIVERY_MODE,
    DST_KEYS, ENVELOPE_TYPE, MESSAGE_ID_KEYS, SRC_KEYS,
};
use serde_json::{Map, Value};
use tracing::debug;

/// Decode a raw JSON message into a generically-typed envelope.
pub fn decode_generic(raw: &str) -> CodecResult<Envelope<KnownPayload>> {
    let value: Value = serde_json::from_str(raw)?;
    let Some(object) = value.as_object() else {
        return Err(CodecError::MalformedEnvelope {
            detail: "envelope is not a JSON object".into(),
        });
    };

    // Modern layout nests header and payload; older senders emitted one
    // flat object with header fields inline.
    let (header_fields, payload_value) = match (object.get("header"), object.get("payload")) {
        (Some(Value::Object(header)), Some(payload)) => (header.clone(), payload.clone()),
        _ => (Map::new(), value.clone()),
    };
    let payload_fields = payload_value.as_object().cloned().unwrap_or_default();

    let message_type = wire::probe_type_field(&payload_fields)
        .or_else(|| wire::probe_type_field(&header_fields))
        .ok_or(CodecError::Envelope(EnvelopeError::MissingMessageType))?;

    let src = probe_str(&payload_fields, SRC_KEYS)
        .or_else(|| probe_str(&header_fields, SRC_KEYS))
        .unwrap_or_default();
    let dst = probe_str(&payload_fields, DST_KEYS)
        .or_else(|| probe_str(&header_fields, DST_KEYS))
        .unwrap_or_default();
    let message_id = probe_str(&payload_fields, MESSAGE_ID_KEYS)
        .or_else(|| probe_str(&header_fields, MESSAGE_ID_KEYS))
        .unwrap_or_default();
    let delivery = header_fields
        .get("delivery")
        .and_then(Value::as_str)
        .map(|symbol| DELIVERY_MODE.symbol_to_value(symbol))
        .unwrap_or(DeliveryMode::FireAndForget);

    let payload = KnownPayload::from_value(&message_type, payload_value)?.ok_or_else(|| {
        CodecError::NoDecoderForType {
            type_id: message_type.clone(),
        }
    })?;

    // Reconcile the declared payload version with the variant's own.
    wire::coerce_version(
        &message_type,
        wire::probe_version(&payload_fields).as_ref(),
        payload.version(),
    );

    debug!(type_id = %message_type, src = %src, "decoded generic envelope");

    Ok(Envelope {
        header: Header {
            src,
            dst,
            message_id,
            message_type,
            delivery,
        },
        payload,
    })
}

/// [`decode_generic`] adapted to any message type an envelope converts
/// into; this is the shape registries store and fall back to.
pub fn decode_generic_into<M: From<Envelope<KnownPayload>>>(raw: &str) -> CodecResult<M> {
    decode_generic(raw).map(M::from)
}

/// Wire rendering of a generically-typed envelope.
pub fn encode_envelope(envelope: &Envelope<KnownPayload>) -> CodecResult<String> {
    Ok(serde_json::to_string(envelope)?)
}

/// Registry pre-wired for generic envelopes: the generic decoder is
/// registered under its own identifier and installed as the fallback.
pub fn generic_registry() -> DecoderRegistry<Envelope<KnownPayload>> {
    let decode = decode_generic_into::<Envelope<KnownPayload>> as DecodeFn<Envelope<KnownPayload>>;
    let mut registry = DecoderRegistry::with_fallback(decode);
    registry
        .decoders
        .insert(TypeIdentifier::new(ENVELOPE_TYPE), decode);
    registry
}
