//! Shared fixtures for the end-to-end tests: a small deployment config and
//! a catalog standing in for the externally-generated schema types.

use lattice_codec::{CatalogObject, CodecError, CodecResult, Envelope, KnownPayload};

pub type Msg = Envelope<KnownPayload>;

/// Deployment with one broker and two participants, as an operator would
/// write it.
pub const DEPLOYMENT_TOML: &str = r#"
[[transport]]
id = "broker.main"
host = "10.0.0.1"
port = 1883
root = "lattice"

[[participant]]
id = "controller.kitchen"
kind = "controller"
transport = "broker.main"
segment = "kitchen"

[[participant]]
id = "aggregator.main"
kind = "aggregator"
transport = "broker.main"
segment = "all"
"#;

/// Decoder accepting only heartbeat envelopes, as a generated type would
/// register it.
pub fn decode_heartbeat(raw: &str) -> CodecResult<Msg> {
    let envelope = lattice_codec::decode_generic(raw)?;
    match envelope.payload {
        KnownPayload::Heartbeat(_) => Ok(envelope),
        _ => Err(CodecError::NoDecoderForType {
            type_id: envelope.header.message_type,
        }),
    }
}

/// Decoder accepting only status envelopes.
pub fn decode_status(raw: &str) -> CodecResult<Msg> {
    let envelope = lattice_codec::decode_generic(raw)?;
    match envelope.payload {
        KnownPayload::Status(_) => Ok(envelope),
        _ => Err(CodecError::NoDecoderForType {
            type_id: envelope.header.message_type,
        }),
    }
}

/// Catalog mixing the naming conventions the generator went through.
pub fn sample_catalog() -> Vec<CatalogObject<Msg>> {
    vec![
        CatalogObject::modern("heartbeat.b", decode_heartbeat),
        CatalogObject {
            wire_type: Some("status.b".into()),
            wire_version: Some("001".into()),
            from_wire: Some(decode_status),
            ..CatalogObject::default()
        },
    ]
}
