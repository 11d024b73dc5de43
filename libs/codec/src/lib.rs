//! # Lattice Protocol Codec
//!
//! ## Purpose
//!
//! This crate contains the "rules" layer of the Lattice protocol:
//! - Decoder registry with type-identifier dispatch and generic fallback
//! - Catalog registration boundary for externally-generated schema types
//! - Generic envelope decode over the closed core payload set
//! - Wire JSON helpers (discriminator probing, version reconciliation)
//! - Topic path codec for the pub/sub routing boundary
//!
//! ## Architecture Role
//!
//! ```text
//! lattice-types → [lattice-codec] → participant runtimes
//!      ↑                ↓                  ↓
//!  Pure Data      Protocol Rules      Transport
//!  Envelope       Dispatch/Decode     (out of scope)
//!  Payloads       Topic Routing
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Network transport or broker logic
//! - The generated long-tail schema types (they arrive via the catalog)
//! - Per-type business-rule validation

// Core modules
pub mod catalog;
pub mod error;
pub mod generic;
pub mod registry;
pub mod topics;
pub mod wire;

// Re-export key types for convenience
pub use catalog::{CatalogObject, DECODER_CONVENTIONS, ID_CONVENTIONS};
pub use error::{CodecError, CodecResult};
pub use generic::{decode_generic, decode_generic_into, encode_envelope, generic_registry};
pub use registry::{DecodeFn, DecoderRegistry};
pub use topics::TopicPath;
pub use wire::{coerce_version, probe_type_field, probe_version};

// Re-export the canonical enum codec and envelope types from lattice-types
// so codec users need a single import path.
pub use lattice_types::{
    DeliveryMode, EnumCodec, EnumCodecBuilder, Envelope, EnvelopeBuilder, Header, KnownPayload,
    LogSeverity, SchemaVersion, ServiceHealth, TypeIdentifier, ENVELOPE_TYPE,
};
