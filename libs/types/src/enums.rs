//! # Compatible Enum Encoding - Value/Symbol Tables
//!
//! ## Purpose
//! Forward/backward-compatible enum transport. Each enum carries an opaque
//! wire symbol (8 hex digits by convention) instead of its semantic name, so
//! renaming a variant in code never breaks the wire contract. Receivers on
//! older code resolve symbols they have never seen to a statically declared
//! default instead of failing.
//!
//! ## Integration Points
//! - **Payload fields**: the concrete enums below serialize through their
//!   tables, so JSON payloads carry symbols, never variant names
//! - **Observability**: a symbol downgrade is logged at `warn` level but is
//!   not an error; callers never see it
//! - **Table validity**: duplicate values/symbols are construction defects
//!   caught by [`EnumCodecBuilder::build`] and exercised by tests
//!
//! Tables are process-wide, built once at startup, and immutable thereafter.

use crate::error::{EnumCodecError, EnumTableError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::warn;

struct EnumEntry {
    symbol: &'static str,
    version: &'static str,
}

/// Bidirectional value <-> symbol mapping for one enum, with per-value
/// version epochs and a declared default for unrecognized symbols.
pub struct EnumCodec<T> {
    name: &'static str,
    entries: HashMap<T, EnumEntry>,
    by_symbol: HashMap<&'static str, T>,
    default: T,
}

impl<T: Copy + Eq + Hash + Debug> EnumCodec<T> {
    /// Wire symbol for a declared value.
    ///
    /// Total over every value the table declares; a miss means the table
    /// was built without the value, which is a code defect.
    pub fn value_to_symbol(&self, value: T) -> Result<&'static str, EnumCodecError> {
        self.entries
            .get(&value)
            .map(|entry| entry.symbol)
            .ok_or_else(|| EnumCodecError::UnknownEnumValue {
                table: self.name,
                value: format!("{value:?}"),
            })
    }

    /// Semantic value for a wire symbol.
    ///
    /// Never fails: a symbol this table does not know resolves to the
    /// declared default. This is the compatibility guarantee that lets an
    /// older receiver interpret values introduced after it was built.
    pub fn symbol_to_value(&self, symbol: &str) -> T {
        match self.by_symbol.get(symbol) {
            Some(value) => *value,
            None => {
                warn!(
                    table = self.name,
                    symbol,
                    default = ?self.default,
                    "unknown enum symbol, resolving to default"
                );
                self.default
            }
        }
    }

    /// Version epoch in which a declared value was introduced.
    pub fn version(&self, value: T) -> Result<&'static str, EnumCodecError> {
        self.entries
            .get(&value)
            .map(|entry| entry.version)
            .ok_or_else(|| EnumCodecError::UnknownEnumValue {
                table: self.name,
                value: format!("{value:?}"),
            })
    }

    pub fn default_value(&self) -> T {
        self.default
    }

    /// All declared values, for exhaustiveness checks in tests.
    pub fn declared_values(&self) -> impl Iterator<Item = T> + '_ {
        self.entries.keys().copied()
    }
}

/// Builder validating an [`EnumCodec`] table as it is assembled.
pub struct EnumCodecBuilder<T> {
    name: &'static str,
    entries: Vec<(T, &'static str, &'static str)>,
}

impl<T: Copy + Eq + Hash + Debug> EnumCodecBuilder<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Declare one value with its wire symbol and the version epoch that
    /// introduced it.
    pub fn entry(mut self, value: T, symbol: &'static str, version: &'static str) -> Self {
        self.entries.push((value, symbol, version));
        self
    }

    /// Validate and freeze the table. Duplicate values or symbols, or a
    /// default that was never declared, are construction defects.
    pub fn build(self, default: T) -> Result<EnumCodec<T>, EnumTableError> {
        let mut entries = HashMap::with_capacity(self.entries.len());
        let mut by_symbol = HashMap::with_capacity(self.entries.len());

        for (value, symbol, version) in self.entries {
            if entries
                .insert(value, EnumEntry { symbol, version })
                .is_some()
            {
                return Err(EnumTableError::DuplicateValue {
                    table: self.name,
                    value: format!("{value:?}"),
                });
            }
            if by_symbol.insert(symbol, value).is_some() {
                return Err(EnumTableError::DuplicateSymbol {
                    table: self.name,
                    symbol,
                });
            }
        }

        if !entries.contains_key(&default) {
            return Err(EnumTableError::UndeclaredDefault {
                table: self.name,
                value: format!("{default:?}"),
            });
        }

        Ok(EnumCodec {
            name: self.name,
            entries,
            by_symbol,
            default,
        })
    }
}

/// Wires a concrete enum to its static table for serde, so payload fields
/// carry opaque symbols on the wire.
macro_rules! wire_enum_serde {
    ($ty:ty, $table:ident) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match $table.value_to_symbol(*self) {
                    Ok(symbol) => serializer.serialize_str(symbol),
                    Err(err) => Err(serde::ser::Error::custom(err)),
                }
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let symbol = String::deserialize(deserializer)?;
                Ok($table.symbol_to_value(&symbol))
            }
        }
    };
}

/// Health of a running participant, reported in `status.b` payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceHealth {
    Operational,
    /// Added in epoch 002; pre-002 receivers resolve its symbol to Unknown.
    Degraded,
    Offline,
    Unknown,
}

impl ServiceHealth {
    pub const ALL: [Self; 4] = [Self::Operational, Self::Degraded, Self::Offline, Self::Unknown];
}

pub static SERVICE_HEALTH: Lazy<EnumCodec<ServiceHealth>> = Lazy::new(|| {
    EnumCodecBuilder::new("service_health")
        .entry(ServiceHealth::Operational, "4fa2d901", "001")
        .entry(ServiceHealth::Offline, "b81c3e77", "001")
        .entry(ServiceHealth::Unknown, "0d94c2aa", "001")
        .entry(ServiceHealth::Degraded, "72e5091f", "002")
        .build(ServiceHealth::Unknown)
        .expect("service_health table is statically valid")
});

wire_enum_serde!(ServiceHealth, SERVICE_HEALTH);

/// Severity of a `log.b` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogSeverity {
    pub const ALL: [Self; 4] = [Self::Debug, Self::Info, Self::Warning, Self::Error];
}

pub static LOG_SEVERITY: Lazy<EnumCodec<LogSeverity>> = Lazy::new(|| {
    EnumCodecBuilder::new("log_severity")
        .entry(LogSeverity::Debug, "9c41f0e2", "001")
        .entry(LogSeverity::Info, "5e8ab73d", "001")
        .entry(LogSeverity::Warning, "e2d90c18", "001")
        .entry(LogSeverity::Error, "31bf6a55", "001")
        .build(LogSeverity::Info)
        .expect("log_severity table is statically valid")
});

wire_enum_serde!(LogSeverity, LOG_SEVERITY);

/// Delivery expectations carried in the envelope header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeliveryMode {
    #[default]
    FireAndForget,
    AckRequired,
}

impl DeliveryMode {
    pub const ALL: [Self; 2] = [Self::FireAndForget, Self::AckRequired];
}

pub static DELIVERY_MODE: Lazy<EnumCodec<DeliveryMode>> = Lazy::new(|| {
    EnumCodecBuilder::new("delivery_mode")
        .entry(DeliveryMode::FireAndForget, "a6c20d9b", "001")
        .entry(DeliveryMode::AckRequired, "48e1b3f7", "001")
        .build(DeliveryMode::FireAndForget)
        .expect("delivery_mode table is statically valid")
});

wire_enum_serde!(DeliveryMode, DELIVERY_MODE);
