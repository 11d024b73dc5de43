//! Golden path: resolve a deployment, build a registry from a catalog,
//! route a message by topic, and decode it end to end.

use anyhow::Result;
use lattice_codec::{
    encode_envelope, DecoderRegistry, DeliveryMode, Envelope, KnownPayload, TopicPath,
    TypeIdentifier,
};
use lattice_config::ResolutionContext;
use lattice_e2e::{sample_catalog, Msg, DEPLOYMENT_TOML};
use lattice_types::{Heartbeat, ServiceHealth};
use serde_json::json;

#[test]
fn test_deployment_to_decoded_message() -> Result<()> {
    // Phase 1: load and resolve the deployment graph.
    let mut deployment = ResolutionContext::from_toml_str(DEPLOYMENT_TOML)?;
    deployment.resolve_all()?;
    let kitchen = deployment
        .participant("controller.kitchen")
        .expect("participant loaded");
    let aggregator = deployment
        .participant("aggregator.main")
        .expect("participant loaded");

    // Phase 2: build the decoder registry from the catalog.
    let mut registry = DecoderRegistry::<Msg>::new();
    registry.register_from_catalog(sample_catalog())?;

    // Phase 3: the controller sends a heartbeat to the aggregator.
    let envelope = Envelope::builder(KnownPayload::Heartbeat(Heartbeat {
        sequence: 1,
        uptime_s: 30,
    }))
    .src(&kitchen.id)
    .dst(&aggregator.id)
    .delivery(DeliveryMode::AckRequired)
    .build()?;
    let raw = encode_envelope(&envelope)?;

    let topic = TopicPath::new(
        &envelope.header.src,
        "envelope.b",
        &envelope.header.dst,
        envelope.header.message_type.as_str(),
    )
    .encode();
    assert_eq!(
        topic,
        "controller-kitchen/envelope-b/to/aggregator-main/heartbeat-b"
    );

    // Phase 4: the aggregator routes by topic and decodes.
    let route = TopicPath::decode(&topic);
    assert_eq!(route.dst, aggregator.id);
    let decoded = registry.decode(&TypeIdentifier::new(route.message_type), &raw)?;
    assert_eq!(decoded, envelope);
    Ok(())
}

#[test]
fn test_old_receiver_survives_new_sender() -> Result<()> {
    // A sender built against a newer epoch: unknown enum symbol, unknown
    // version, and an extra field this build has never heard of.
    // Surface the compatibility warn logs this scenario triggers.
    let _ = tracing_subscriber::fmt().try_init();

    let raw = json!({
        "header": {
            "src": "controller.attic",
            "message_id": "m-7",
            "message_type": "status.b"
        },
        "payload": {
            "type": "status.b",
            "version": "004",
            "state": "cafef00d",
            "detail": "running mode introduced in 004",
            "mode_hint": "eco"
        }
    })
    .to_string();

    let mut registry = DecoderRegistry::<Msg>::new();
    registry.register_from_catalog(sample_catalog())?;
    let envelope = registry.decode(&TypeIdentifier::new("status.b"), &raw)?;

    match envelope.payload {
        KnownPayload::Status(status) => {
            // Unknown symbol silently downgraded to the declared default.
            assert_eq!(status.state, ServiceHealth::Unknown);
            assert_eq!(status.detail, "running mode introduced in 004");
        }
        other => panic!("expected status payload, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_unclaimed_type_falls_back_generically() -> Result<()> {
    let mut registry = DecoderRegistry::<Msg>::new();
    registry.register_from_catalog(sample_catalog())?;

    // No catalog object claimed ack.b; the generic fallback handles it.
    let raw = json!({ "type": "ack.b", "src": "aggregator.main", "acked_id": "m-7" }).to_string();
    let envelope = registry.decode(&TypeIdentifier::new("ack.b"), &raw)?;
    assert_eq!(envelope.header.src, "aggregator.main");
    assert!(matches!(envelope.payload, KnownPayload::Ack(_)));
    Ok(())
}
