//! Configuration entities and proxy references.
//!
//! Entities are constructed from identifiers alone, never from
//! materialized data, which is what decouples construction order from
//! reference direction: a [`ParticipantDef`] can be loaded before the
//! transport it names exists. The proxy-to-concrete transition is the
//! single legal mutation and belongs to [`crate::resolver`].

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Proxy-or-concrete reference to another entity's data.
///
/// `Unresolved` holds only the referenced identifier; `resolve` is the one
/// legal transition to `Resolved`, which is terminal. Chains of
/// proxy-referencing-proxy are unsupported: a reference always names a
/// concrete entity, never another proxy.
#[derive(Debug, Clone, PartialEq)]
pub enum Ref<T> {
    Unresolved(String),
    Resolved(T),
}

impl<T> Ref<T> {
    pub fn unresolved(id: impl Into<String>) -> Self {
        Self::Unresolved(id.into())
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Concrete data, once resolved.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Resolved(data) => Some(data),
            Self::Unresolved(_) => None,
        }
    }

    /// Referenced identifier, while still a proxy.
    pub fn referenced_id(&self) -> Option<&str> {
        match self {
            Self::Unresolved(id) => Some(id),
            Self::Resolved(_) => None,
        }
    }
}

// Configuration files write references as the bare identifier string.
impl<'de, T> Deserialize<'de> for Ref<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::Unresolved(String::deserialize(deserializer)?))
    }
}

/// Broker endpoint shared by one or more participants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransportDef {
    pub id: String,
    pub host: String,
    pub port: u16,

    /// Topic root under which this broker's participants publish.
    #[serde(default)]
    pub root: String,
}

/// Role a participant plays in the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    Controller,
    Aggregator,
}

/// One participant's configuration: constructed holding a transport proxy,
/// resolved exactly once against a loaded context.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParticipantDef {
    pub id: String,
    pub kind: ParticipantKind,

    /// Proxy until resolution links the transport's concrete data in.
    pub transport: Ref<TransportDef>,

    /// Topic segment appended under the transport root.
    pub segment: String,

    /// Derived at resolution from the transport plus `segment`.
    #[serde(skip)]
    pub address: Option<String>,
}

/// Concrete entity kinds, named in resolution errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Transport,
    Participant,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => f.write_str("transport"),
            Self::Participant => f.write_str("participant"),
        }
    }
}

/// Closed set of entities a resolution context can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEntity {
    Transport(TransportDef),
    Participant(ParticipantDef),
}

impl ConfigEntity {
    pub fn id(&self) -> &str {
        match self {
            Self::Transport(transport) => &transport.id,
            Self::Participant(participant) => &participant.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Transport(_) => EntityKind::Transport,
            Self::Participant(_) => EntityKind::Participant,
        }
    }
}
