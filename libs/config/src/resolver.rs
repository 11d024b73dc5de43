//! # Two-Phase Entity Resolution
//!
//! ## Purpose
//! Materializes a graph of interdependent configuration entities in two
//! phases: construct everything from identifiers, then resolve each proxy
//! against the full loaded set. Because construction needs identifiers
//! only, load order never matters and no topological sort is needed for
//! the single-hop references the format allows.
//!
//! ## Resolution Contract
//! - `resolve` is callable exactly once per participant; a second call is
//!   [`ResolveError::AlreadyResolved`] and leaves the entity untouched
//! - a missing referenced id, or one naming the wrong concrete kind, is
//!   [`ResolveError::UnresolvedReference`] and leaves the entity untouched
//! - success links a snapshot of the transport data in, derives the
//!   participant's address, and registers the participant as a listener on
//!   its transport
//!
//! The entity set is read-only during resolution; the listener registry is
//! the one interior-mutable piece, so `&ResolutionContext` is all a
//! resolving entity needs.

use crate::entity::{ConfigEntity, EntityKind, ParticipantDef, Ref, TransportDef};
use crate::error::{ResolveError, ResolveResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

/// The full set of loaded entities keyed by identifier, consulted during
/// resolution, plus the listener registrations resolution produces.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    entities: HashMap<String, ConfigEntity>,
    listeners: RwLock<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    transport: Vec<TransportDef>,
    #[serde(default)]
    participant: Vec<ParticipantDef>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a context from TOML `[[transport]]` and `[[participant]]`
    /// tables. Everything is constructed in `Unresolved` state; no
    /// resolution happens here.
    pub fn from_toml_str(raw: &str) -> ResolveResult<Self> {
        let file: ConfigFile = toml::from_str(raw)?;
        let mut context = Self::new();
        for transport in file.transport {
            context.insert(ConfigEntity::Transport(transport))?;
        }
        for participant in file.participant {
            context.insert(ConfigEntity::Participant(participant))?;
        }
        info!(entities = context.len(), "resolution context loaded");
        Ok(context)
    }

    /// Add one entity. Identifiers are unique across both kinds; a clash
    /// is a load-time defect.
    pub fn insert(&mut self, entity: ConfigEntity) -> ResolveResult<()> {
        let id = entity.id().to_string();
        if self.entities.contains_key(&id) {
            return Err(ResolveError::DuplicateEntity { id });
        }
        self.entities.insert(id, entity);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ConfigEntity> {
        self.entities.get(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Record `participant_id` as a listener on `transport_id`.
    pub fn register_listener(&self, transport_id: &str, participant_id: &str) {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        listeners
            .entry(transport_id.to_string())
            .or_default()
            .push(participant_id.to_string());
    }

    /// Listeners registered on a transport so far, in registration order.
    pub fn listeners(&self, transport_id: &str) -> Vec<String> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(transport_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolve the entity stored under `id` in place.
    ///
    /// The entity is taken out for the duration of the call, so it cannot
    /// serve as its own referent; that is sound because proxy chains are
    /// unsupported and transports hold no proxies. Transports resolve as a
    /// no-op.
    pub fn resolve_entity(&mut self, id: &str) -> ResolveResult<()> {
        let mut entity = self
            .entities
            .remove(id)
            .ok_or_else(|| ResolveError::UnknownEntity { id: id.to_string() })?;
        let result = match &mut entity {
            ConfigEntity::Participant(participant) => participant.resolve(self),
            ConfigEntity::Transport(_) => Ok(()),
        };
        self.entities.insert(id.to_string(), entity);
        result
    }

    /// Resolve every loaded participant. Order is irrelevant; each entity
    /// mutates only itself.
    pub fn resolve_all(&mut self) -> ResolveResult<()> {
        let ids: Vec<String> = self
            .entities
            .values()
            .filter(|entity| entity.kind() == EntityKind::Participant)
            .map(|entity| entity.id().to_string())
            .collect();
        for id in ids {
            self.resolve_entity(&id)?;
        }
        Ok(())
    }

    /// Convenience accessor for a resolved or unresolved participant.
    pub fn participant(&self, id: &str) -> Option<&ParticipantDef> {
        match self.entities.get(id) {
            Some(ConfigEntity::Participant(participant)) => Some(participant),
            _ => None,
        }
    }
}

impl ParticipantDef {
    /// Replace the transport proxy with concrete data, derive the address,
    /// and register this participant as a listener on the transport.
    ///
    /// Checks run before any mutation: on error the participant is exactly
    /// as it was.
    pub fn resolve(&mut self, context: &ResolutionContext) -> ResolveResult<()> {
        let transport_id = match &self.transport {
            Ref::Resolved(_) => {
                return Err(ResolveError::AlreadyResolved {
                    id: self.id.clone(),
                })
            }
            Ref::Unresolved(id) => id.clone(),
        };

        let transport = match context.get(&transport_id) {
            Some(ConfigEntity::Transport(transport)) => transport.clone(),
            _ => {
                return Err(ResolveError::UnresolvedReference {
                    id: transport_id,
                    expected: EntityKind::Transport,
                })
            }
        };

        self.address = Some(compose_address(&transport, &self.segment));
        context.register_listener(&transport.id, &self.id);
        debug!(
            participant = %self.id,
            transport = %transport.id,
            address = self.address.as_deref().unwrap_or(""),
            "participant resolved"
        );
        self.transport = Ref::Resolved(transport);
        Ok(())
    }
}

/// Full pub/sub address of a participant on its transport.
fn compose_address(transport: &TransportDef, segment: &str) -> String {
    if transport.root.is_empty() {
        format!("{}:{}/{}", transport.host, transport.port, segment)
    } else {
        format!(
            "{}:{}/{}/{}",
            transport.host, transport.port, transport.root, segment
        )
    }
}
