//! The event collection and its persisted mirror.
//!
//! `EventStore` owns the in-memory list of events and writes the whole list
//! back to its byte store after every mutation. The list is always ordered
//! by date, with events sharing a timestamp kept in insertion order.

use std::collections::HashSet;

use log::{error, info, warn};

use crate::byte_store::ByteStore;
use crate::config::{PersistPolicy, StoreConfig};
use crate::error::CountdownError;
use crate::event::{decode_events, encode_events, Event, EventId};
use crate::form::EventFormMode;

/// Store key used when none is configured.
pub const DEFAULT_STORE_KEY: &str = "SavedEvents";

pub struct EventStore<S: ByteStore> {
    byte_store: S,
    key: String,
    policy: PersistPolicy,
    events: Vec<Event>,
    last_persist_error: Option<CountdownError>,
}

impl<S: ByteStore> EventStore<S> {
    /// Create an empty store. Call `load_all` to read what was persisted.
    pub fn new(byte_store: S, key: impl Into<String>) -> Self {
        EventStore {
            byte_store,
            key: key.into(),
            policy: PersistPolicy::default(),
            events: Vec::new(),
            last_persist_error: None,
        }
    }

    pub fn from_config(byte_store: S, config: &StoreConfig) -> Self {
        EventStore::new(byte_store, config.store_key.clone()).with_policy(config.persist_policy)
    }

    pub fn with_policy(mut self, policy: PersistPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id() == id)
    }

    pub fn byte_store(&self) -> &S {
        &self.byte_store
    }

    pub fn byte_store_mut(&mut self) -> &mut S {
        &mut self.byte_store
    }

    /// The most recent write failure, when the policy is `Report`.
    /// Cleared by the next successful write.
    pub fn last_persist_error(&self) -> Option<&CountdownError> {
        self.last_persist_error.as_ref()
    }

    /// Replace the in-memory list with what is persisted under the key.
    ///
    /// A missing key or an undecodable blob yields an empty list.
    pub fn load_all(&mut self) -> &[Event] {
        self.events = match self.byte_store.get(&self.key) {
            Ok(Some(bytes)) => decode_events(&bytes).unwrap_or_else(|e| {
                warn!("Discarding saved events under '{}': {}", self.key, e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read saved events under '{}': {}", self.key, e);
                Vec::new()
            }
        };
        self.drop_duplicate_ids();
        self.sort();

        info!("Loaded {} events", self.events.len());
        &self.events
    }

    /// Insert a new event. An event whose id is already stored replaces
    /// that element, as `update` would.
    pub fn add(&mut self, event: Event) -> &[Event] {
        if self.get(event.id()).is_some() {
            warn!("Event {} already stored, replacing it", event.id());
            return self.update(event.id(), event);
        }

        self.events.push(event);
        self.sort();
        self.persist();
        &self.events
    }

    /// Replace the event with the given id, keeping that id.
    /// Unknown ids leave the list untouched.
    pub fn update(&mut self, id: EventId, event: Event) -> &[Event] {
        let Some(index) = self.events.iter().position(|e| e.id() == id) else {
            return &self.events;
        };

        self.events[index] = event.with_id(id);
        self.sort();
        self.persist();
        &self.events
    }

    pub fn delete_by_id(&mut self, id: EventId) -> &[Event] {
        self.events.retain(|e| e.id() != id);
        self.persist();
        &self.events
    }

    /// Remove the events at the given positions of the current ordering.
    /// Positions past the end are ignored.
    pub fn delete_by_positions(&mut self, positions: impl IntoIterator<Item = usize>) -> &[Event] {
        let positions: HashSet<usize> = positions.into_iter().collect();

        let mut index = 0;
        self.events.retain(|_| {
            let keep = !positions.contains(&index);
            index += 1;
            keep
        });
        self.persist();
        &self.events
    }

    /// Store the result of an add or edit form.
    pub fn save(&mut self, mode: &EventFormMode, event: Event) -> &[Event] {
        match mode {
            EventFormMode::Add => self.add(event),
            EventFormMode::Edit(original) => self.update(original.id(), event),
        }
    }

    /// Keep the first event for each id.
    fn drop_duplicate_ids(&mut self) {
        let mut seen = HashSet::new();
        self.events.retain(|e| {
            let first = seen.insert(e.id());
            if !first {
                warn!("Dropping saved event repeating id {}", e.id());
            }
            first
        });
    }

    fn sort(&mut self) {
        // sort_by_key is stable, so equal dates keep insertion order
        self.events.sort_by_key(|e| e.date);
    }

    fn persist(&mut self) {
        let result = encode_events(&self.events)
            .and_then(|bytes| self.byte_store.set(&self.key, &bytes));

        match result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                error!("Failed to save {} events: {}", self.events.len(), e);
                if self.policy == PersistPolicy::Report {
                    self.last_persist_error = Some(e);
                }
            }
        }
    }
}
