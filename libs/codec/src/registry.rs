//! # Decoder Registry - Type-Identifier Dispatch
//!
//! ## Purpose
//! Runtime dispatch from a message's declared [`TypeIdentifier`] to the
//! decode function that owns its schema, with an optional fallback for
//! identifiers no specific decoder claims (the generic envelope path in
//! [`crate::generic`]).
//!
//! ## Invariants
//! - One identifier maps to exactly one decode function. Re-registering the
//!   same function is a no-op; a different function under the same
//!   identifier is a [`CodecError::DuplicateDecoderConflict`]
//! - `merge` and catalog registration are atomic: the whole batch lands or
//!   none of it does
//! - `decode` returns a typed value or a typed error, never a partial
//!
//! The registry is built once at startup and read-only afterwards. Neither
//! `add_decoder` nor `merge` locks internally; concurrent construction
//! requires caller-held synchronization.

use crate::error::{CodecError, CodecResult};
use lattice_types::TypeIdentifier;
use std::collections::HashMap;
use tracing::debug;

/// Decode entry point: raw UTF-8 JSON in, typed message out.
pub type DecodeFn<M> = fn(&str) -> CodecResult<M>;

/// TypeIdentifier-keyed map of decode functions with fallback dispatch.
pub struct DecoderRegistry<M> {
    pub(crate) decoders: HashMap<TypeIdentifier, DecodeFn<M>>,
    pub(crate) fallback: Option<DecodeFn<M>>,
}

impl<M> DecoderRegistry<M> {
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
            fallback: None,
        }
    }

    pub fn with_fallback(fallback: DecodeFn<M>) -> Self {
        Self {
            decoders: HashMap::new(),
            fallback: Some(fallback),
        }
    }

    /// Install the decoder consulted when no identifier matches.
    pub fn set_fallback(&mut self, fallback: DecodeFn<M>) {
        self.fallback = Some(fallback);
    }

    /// Register one decode function under `type_id`.
    ///
    /// Idempotent for the same function; a different function under an
    /// already-claimed identifier is a registration conflict.
    pub fn add_decoder(
        &mut self,
        type_id: TypeIdentifier,
        decode: DecodeFn<M>,
    ) -> CodecResult<()> {
        match self.decoders.get(&type_id) {
            Some(existing) if *existing == decode => Ok(()),
            Some(_) => Err(CodecError::DuplicateDecoderConflict { type_id }),
            None => {
                debug!(type_id = %type_id, "registered decoder");
                self.decoders.insert(type_id, decode);
                Ok(())
            }
        }
    }

    /// Fold another registry into this one. Atomic: every entry is checked
    /// for conflicts before any is committed.
    pub fn merge(&mut self, other: DecoderRegistry<M>) -> CodecResult<()> {
        for (type_id, decode) in &other.decoders {
            if let Some(existing) = self.decoders.get(type_id) {
                if existing != decode {
                    return Err(CodecError::DuplicateDecoderConflict {
                        type_id: type_id.clone(),
                    });
                }
            }
        }
        self.decoders.extend(other.decoders);
        if self.fallback.is_none() {
            self.fallback = other.fallback;
        }
        Ok(())
    }

    /// Dispatch `raw` to the decoder registered for `type_id`, or to the
    /// fallback when no specific decoder is registered.
    pub fn decode(&self, type_id: &TypeIdentifier, raw: &str) -> CodecResult<M> {
        if let Some(decode) = self.decoders.get(type_id) {
            debug!(type_id = %type_id, "dispatching to registered decoder");
            return decode(raw);
        }
        if let Some(fallback) = self.fallback {
            debug!(type_id = %type_id, "no specific decoder, using fallback");
            return fallback(raw);
        }
        Err(CodecError::UnknownTypeIdentifier {
            type_id: type_id.clone(),
        })
    }

    pub fn contains(&self, type_id: &TypeIdentifier) -> bool {
        self.decoders.contains_key(type_id)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl<M> Default for DecoderRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_a(_raw: &str) -> CodecResult<u32> {
        Ok(1)
    }

    fn decode_b(_raw: &str) -> CodecResult<u32> {
        Ok(2)
    }

    fn id(name: &str) -> TypeIdentifier {
        TypeIdentifier::new(name)
    }

    #[test]
    fn test_reregistering_same_function_is_a_noop() {
        let mut registry = DecoderRegistry::new();
        registry.add_decoder(id("a.b"), decode_a).unwrap();
        registry.add_decoder(id("a.b"), decode_a).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_conflicting_registration_is_rejected() {
        let mut registry = DecoderRegistry::new();
        registry.add_decoder(id("a.b"), decode_a).unwrap();
        let err = registry.add_decoder(id("a.b"), decode_b).unwrap_err();
        assert!(matches!(
            err,
            CodecError::DuplicateDecoderConflict { type_id } if type_id.as_str() == "a.b"
        ));
        // The original registration is untouched.
        assert_eq!(registry.decode(&id("a.b"), "{}").unwrap(), 1);
    }

    #[test]
    fn test_dispatch_and_unknown_identifier() {
        let mut registry = DecoderRegistry::new();
        registry.add_decoder(id("a.b"), decode_a).unwrap();
        registry.add_decoder(id("c.d"), decode_b).unwrap();

        assert_eq!(registry.decode(&id("c.d"), "{}").unwrap(), 2);
        let err = registry.decode(&id("z.z"), "{}").unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownTypeIdentifier { type_id } if type_id.as_str() == "z.z"
        ));
    }

    #[test]
    fn test_fallback_applies_only_without_specific_decoder() {
        let mut registry = DecoderRegistry::with_fallback(decode_b);
        registry.add_decoder(id("a.b"), decode_a).unwrap();

        assert_eq!(registry.decode(&id("a.b"), "{}").unwrap(), 1);
        assert_eq!(registry.decode(&id("z.z"), "{}").unwrap(), 2);
    }

    #[test]
    fn test_merge_is_atomic_on_conflict() {
        let mut target = DecoderRegistry::new();
        target.add_decoder(id("a.b"), decode_a).unwrap();

        let mut incoming = DecoderRegistry::new();
        incoming.add_decoder(id("c.d"), decode_a).unwrap();
        incoming.add_decoder(id("a.b"), decode_b).unwrap();

        assert!(target.merge(incoming).is_err());
        // Nothing from the failed batch landed.
        assert_eq!(target.len(), 1);
        assert!(!target.contains(&id("c.d")));
    }

    #[test]
    fn test_merge_extends_and_keeps_existing_fallback() {
        let mut target = DecoderRegistry::with_fallback(decode_a);
        let mut incoming = DecoderRegistry::with_fallback(decode_b);
        incoming.add_decoder(id("c.d"), decode_b).unwrap();

        target.merge(incoming).unwrap();
        assert!(target.contains(&id("c.d")));
        // Existing fallback wins.
        assert_eq!(target.decode(&id("z.z"), "{}").unwrap(), 1);
    }
}
