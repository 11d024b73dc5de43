//! # Catalog Registration - Convention-Probed Bulk Registration
//!
//! ## Purpose
//! The generated schema types are produced by a separate system and arrive
//! here as an enumerable catalog. The catalog accreted several naming
//! conventions over the years, so both the type identifier and the decode
//! entry point are extracted by an ordered list of named strategies, tried
//! in sequence, first match wins. The lists are explicit values so the
//! probe order is visible and unit-tested, never reflective.
//!
//! Registration of a catalog is atomic: every object is validated and
//! staged before anything is committed, so a defective catalog never
//! leaves a half-built registry behind.

use crate::error::{CodecError, CodecResult};
use crate::generic::decode_generic_into;
use crate::registry::{DecodeFn, DecoderRegistry};
use lattice_types::{Envelope, KnownPayload, TypeIdentifier, ENVELOPE_TYPE};
use std::collections::HashMap;
use tracing::{debug, info};

/// Identifier conventions, probed in order.
pub const ID_CONVENTIONS: &[&str] = &["type_id", "wire_type"];

/// Decode entry-point conventions, probed in order.
pub const DECODER_CONVENTIONS: &[&str] = &["decode", "from_wire", "parse"];

/// One schema-bearing object from an external catalog.
///
/// Each generation of the type generator populated a different subset of
/// these fields; a well-formed object exposes at least one identifier
/// convention and one entry-point convention.
pub struct CatalogObject<M> {
    /// Current convention: an explicit identifier.
    pub type_id: Option<TypeIdentifier>,

    /// Legacy convention: the bare dotted wire name.
    pub wire_type: Option<String>,

    /// Declared schema version, where the generator recorded one.
    pub wire_version: Option<String>,

    /// Current entry-point convention.
    pub decode: Option<DecodeFn<M>>,

    /// Intermediate entry-point convention.
    pub from_wire: Option<DecodeFn<M>>,

    /// Oldest entry-point convention.
    pub parse: Option<DecodeFn<M>>,
}

impl<M> Default for CatalogObject<M> {
    fn default() -> Self {
        Self {
            type_id: None,
            wire_type: None,
            wire_version: None,
            decode: None,
            from_wire: None,
            parse: None,
        }
    }
}

impl<M> CatalogObject<M> {
    /// Catalog object following the current conventions.
    pub fn modern(type_id: impl Into<TypeIdentifier>, decode: DecodeFn<M>) -> Self {
        Self {
            type_id: Some(type_id.into()),
            decode: Some(decode),
            ..Self::default()
        }
    }

    /// Type identifier extracted under the first matching convention.
    pub fn type_identifier(&self) -> CodecResult<TypeIdentifier> {
        let strategies: [(&str, Option<TypeIdentifier>); 2] = [
            ("type_id", self.type_id.clone()),
            ("wire_type", self.wire_type.clone().map(TypeIdentifier::new)),
        ];
        for (convention, candidate) in strategies {
            if let Some(type_id) = candidate {
                debug!(convention, type_id = %type_id, "catalog identifier extracted");
                return Ok(type_id);
            }
        }
        Err(CodecError::CatalogMissingTypeId)
    }

    /// Decode entry point extracted under the first matching convention.
    pub fn decoder(&self, type_id: &TypeIdentifier) -> CodecResult<DecodeFn<M>> {
        let strategies: [(&str, Option<DecodeFn<M>>); 3] = [
            ("decode", self.decode),
            ("from_wire", self.from_wire),
            ("parse", self.parse),
        ];
        for (convention, candidate) in strategies {
            if let Some(decode) = candidate {
                debug!(convention, type_id = %type_id, "catalog entry point extracted");
                return Ok(decode);
            }
        }
        Err(CodecError::CatalogMissingDecoder {
            type_id: type_id.clone(),
        })
    }
}

impl<M: From<Envelope<KnownPayload>>> DecoderRegistry<M> {
    /// Bulk-register an external catalog, self-registering the generic
    /// envelope decoder under its own identifier and installing it as the
    /// fallback when none is set yet.
    ///
    /// Atomic: a defective object or a registration conflict anywhere in
    /// the batch aborts the whole registration.
    pub fn register_from_catalog<I>(&mut self, objects: I) -> CodecResult<usize>
    where
        I: IntoIterator<Item = CatalogObject<M>>,
    {
        let mut staged: HashMap<TypeIdentifier, DecodeFn<M>> = HashMap::new();
        let generic = decode_generic_into::<M> as DecodeFn<M>;
        staged.insert(TypeIdentifier::new(ENVELOPE_TYPE), generic);

        for object in objects {
            let type_id = object.type_identifier()?;
            let decode = object.decoder(&type_id)?;
            let conflicts_staged = staged
                .get(&type_id)
                .is_some_and(|existing| *existing != decode);
            let conflicts_existing = self
                .decoders
                .get(&type_id)
                .is_some_and(|existing| *existing != decode);
            if conflicts_staged || conflicts_existing {
                return Err(CodecError::DuplicateDecoderConflict { type_id });
            }
            staged.insert(type_id, decode);
        }
        if self
            .decoders
            .get(&TypeIdentifier::new(ENVELOPE_TYPE))
            .is_some_and(|existing| *existing != generic)
        {
            return Err(CodecError::DuplicateDecoderConflict {
                type_id: TypeIdentifier::new(ENVELOPE_TYPE),
            });
        }

        let registered = staged.len();
        self.decoders.extend(staged);
        if self.fallback.is_none() {
            self.fallback = Some(generic);
        }
        info!(registered, "catalog registration committed");
        Ok(registered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Msg = Envelope<KnownPayload>;

    fn decode_one(raw: &str) -> CodecResult<Msg> {
        crate::generic::decode_generic(raw)
    }

    fn decode_two(raw: &str) -> CodecResult<Msg> {
        // Distinct body so the two entry points never share a fn pointer.
        let mut envelope = crate::generic::decode_generic(raw)?;
        envelope.header.dst.clear();
        Ok(envelope)
    }

    #[test]
    fn test_identifier_conventions_in_order() {
        let modern = CatalogObject::<Msg>::modern("sensor.a", decode_one);
        assert_eq!(modern.type_identifier().unwrap().as_str(), "sensor.a");

        let legacy = CatalogObject::<Msg> {
            wire_type: Some("sensor.legacy".into()),
            wire_version: Some("002".into()),
            parse: Some(decode_one),
            ..CatalogObject::default()
        };
        assert_eq!(
            legacy.type_identifier().unwrap().as_str(),
            "sensor.legacy"
        );

        // Both present: the explicit identifier convention wins.
        let both = CatalogObject::<Msg> {
            type_id: Some(TypeIdentifier::new("modern.id")),
            wire_type: Some("legacy.id".into()),
            decode: Some(decode_one),
            ..CatalogObject::default()
        };
        assert_eq!(both.type_identifier().unwrap().as_str(), "modern.id");
    }

    #[test]
    fn test_entry_point_conventions_in_order() {
        let id = TypeIdentifier::new("x.y");
        let oldest = CatalogObject::<Msg> {
            parse: Some(decode_one),
            ..CatalogObject::default()
        };
        assert_eq!(oldest.decoder(&id).unwrap(), decode_one as DecodeFn<Msg>);

        let mixed = CatalogObject::<Msg> {
            decode: Some(decode_one),
            parse: Some(decode_two),
            ..CatalogObject::default()
        };
        assert_eq!(mixed.decoder(&id).unwrap(), decode_one as DecodeFn<Msg>);
    }

    #[test]
    fn test_defective_objects_are_rejected() {
        let no_id = CatalogObject::<Msg> {
            decode: Some(decode_one),
            ..CatalogObject::default()
        };
        assert!(matches!(
            no_id.type_identifier().unwrap_err(),
            CodecError::CatalogMissingTypeId
        ));

        let no_entry = CatalogObject::<Msg>::modern("a.b", decode_one);
        let no_entry = CatalogObject::<Msg> {
            decode: None,
            ..no_entry
        };
        assert!(matches!(
            no_entry.decoder(&TypeIdentifier::new("a.b")).unwrap_err(),
            CodecError::CatalogMissingDecoder { .. }
        ));
    }

    #[test]
    fn test_batch_registration_is_atomic() {
        let mut registry = DecoderRegistry::<Msg>::new();
        let catalog = vec![
            CatalogObject::modern("sensor.a", decode_one),
            // Defective: no entry point at all.
            CatalogObject {
                type_id: Some(TypeIdentifier::new("sensor.b")),
                ..CatalogObject::default()
            },
        ];
        assert!(registry.register_from_catalog(catalog).is_err());
        assert!(registry.is_empty());
        assert!(registry.fallback.is_none());
    }

    #[test]
    fn test_successful_registration_includes_generic_envelope() {
        let mut registry = DecoderRegistry::<Msg>::new();
        let count = registry
            .register_from_catalog(vec![CatalogObject::modern("sensor.a", decode_one)])
            .unwrap();

        // The catalog object plus the self-registered envelope decoder.
        assert_eq!(count, 2);
        assert!(registry.contains(&TypeIdentifier::new("sensor.a")));
        assert!(registry.contains(&TypeIdentifier::new(ENVELOPE_TYPE)));
        assert!(registry.fallback.is_some());
    }
}
