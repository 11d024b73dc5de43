//! # Lattice Unified Types Library
//!
//! Canonical type definitions shared by every Lattice participant:
//! envelope and header structures, wire schema identifiers, the closed set
//! of core payload shapes, and the compatible enum encoding tables.
//!
//! ## Design Philosophy
//!
//! - **Self-Describing Messages**: every payload names its own schema, so a
//!   header can always be recovered from the wire even when the sender and
//!   receiver were built years apart
//! - **Compatibility Over Strictness**: unknown enum symbols downgrade to a
//!   declared default instead of failing; schema evolution is additive
//! - **No Hidden State**: symbol tables and key lists are explicit, owned
//!   values — nothing registers itself behind the caller's back
//! - **Clear Boundaries**: this crate is pure data and construction rules;
//!   dispatch and wire parsing live in `lattice-codec`
//!
//! ## Quick Start
//!
//! ```rust
//! use lattice_types::{Envelope, Heartbeat, KnownPayload};
//!
//! let beat = KnownPayload::Heartbeat(Heartbeat { sequence: 7, uptime_s: 3600 });
//! let envelope = Envelope::builder(beat)
//!     .src("controller.kitchen")
//!     .build()?;
//! // The payload declares its own type; the header inferred it.
//! assert_eq!(envelope.header.message_type.as_str(), "heartbeat.b");
//! # Ok::<(), lattice_types::EnvelopeError>(())
//! ```

pub mod enums;
pub mod envelope;
pub mod error;
pub mod header;
pub mod identifier;
pub mod payloads;

// Re-export key types for convenience
pub use enums::{
    DeliveryMode, EnumCodec, EnumCodecBuilder, LogSeverity, ServiceHealth, DELIVERY_MODE,
    LOG_SEVERITY, SERVICE_HEALTH,
};
pub use envelope::{
    Envelope, EnvelopeBuilder, DST_KEYS, ENVELOPE_TYPE, MESSAGE_ID_KEYS, MESSAGE_TYPE_KEYS,
    SRC_KEYS, VERSION_KEYS,
};
pub use error::{EnumCodecError, EnumTableError, EnvelopeError};
pub use header::Header;
pub use identifier::{SchemaVersion, TypeIdentifier};
pub use payloads::{Acknowledgement, Heartbeat, KnownPayload, LogRecord, RuntimeStatus};
