//! Wire-level JSON helpers: discriminator probing and version
//! reconciliation.
//!
//! Payloads are UTF-8 JSON objects carrying a type field under one of the
//! historical key names and a 3-digit zero-padded version string. The key
//! lists themselves live in `lattice-types` next to the envelope builder
//! that shares them.

use lattice_types::{SchemaVersion, TypeIdentifier, MESSAGE_TYPE_KEYS, VERSION_KEYS};
use serde_json::{Map, Value};
use tracing::warn;

/// Discriminator of a raw payload object, probed under the historical
/// type-field names in order.
pub fn probe_type_field(fields: &Map<String, Value>) -> Option<TypeIdentifier> {
    lattice_types::envelope::probe_str(fields, MESSAGE_TYPE_KEYS)
        .filter(|name| !name.is_empty())
        .map(TypeIdentifier::new)
}

/// Declared schema version of a raw payload object, if any.
pub fn probe_version(fields: &Map<String, Value>) -> Option<SchemaVersion> {
    lattice_types::envelope::probe_str(fields, VERSION_KEYS)
        .map(|raw| SchemaVersion::from_wire(&raw))
}

/// Reconcile a payload's declared version with the decoder's expected one.
///
/// A mismatched-but-parseable payload is coerced to the decoder's version.
/// Schema changes have been additive so far, which is what makes the
/// coercion safe; the warn log keeps drift visible when that stops holding.
pub fn coerce_version(
    type_id: &TypeIdentifier,
    declared: Option<&SchemaVersion>,
    expected: &str,
) -> SchemaVersion {
    match declared {
        Some(version) if version.as_str() == expected => version.clone(),
        Some(version) => {
            warn!(
                type_id = %type_id,
                declared = %version,
                expected,
                "payload version mismatch, coercing to decoder version"
            );
            SchemaVersion::from_wire(expected)
        }
        None => SchemaVersion::from_wire(expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_probe_type_field_tries_aliases_in_order() {
        let modern = fields(json!({ "type": "a.b" }));
        assert_eq!(probe_type_field(&modern).unwrap().as_str(), "a.b");

        let legacy = fields(json!({ "msg_type": "c.d" }));
        assert_eq!(probe_type_field(&legacy).unwrap().as_str(), "c.d");

        let both = fields(json!({ "message_type": "first.one", "type": "last.one" }));
        assert_eq!(probe_type_field(&both).unwrap().as_str(), "first.one");

        let none = fields(json!({ "value": 1 }));
        assert!(probe_type_field(&none).is_none());
    }

    #[test]
    fn test_probe_version_normalizes_padding() {
        let payload = fields(json!({ "version": "1" }));
        assert_eq!(probe_version(&payload).unwrap().as_str(), "001");
    }

    #[test]
    fn test_matching_version_passes_through() {
        let declared = SchemaVersion::from_wire("001");
        let id = TypeIdentifier::new("a.b");
        assert_eq!(
            coerce_version(&id, Some(&declared), "001").as_str(),
            "001"
        );
    }

    #[test]
    fn test_mismatched_version_is_coerced() {
        let declared = SchemaVersion::from_wire("002");
        let id = TypeIdentifier::new("a.b");
        assert_eq!(
            coerce_version(&id, Some(&declared), "001").as_str(),
            "001"
        );
    }

    #[test]
    fn test_absent_version_defaults_to_expected() {
        let id = TypeIdentifier::new("a.b");
        assert_eq!(coerce_version(&id, None, "003").as_str(), "003");
    }
}
