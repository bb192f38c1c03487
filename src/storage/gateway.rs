//! Persistence gateway
//!
//! Storage failures never reach callers. The first backend error flips the
//! gateway into degraded mode: a warning is logged and the rest of the session
//! reads and writes an in-memory map instead.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KeyValueStore, MemoryStore};

/// Typed JSON access to a [`KeyValueStore`] with in-memory fallback
pub struct Gateway {
    backend: Box<dyn KeyValueStore>,
    fallback: MemoryStore,
    degraded: bool,
}

impl Gateway {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self { backend: Box::new(backend), fallback: MemoryStore::new(), degraded: false }
    }

    /// A gateway with no durable medium at all
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// True once a backend failure has forced in-memory operation
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    fn degrade(&mut self, action: &str, key: &str, err: &dyn std::fmt::Display) {
        tracing::warn!(
            "Storage {} failed for {:?}: {}; continuing with in-memory storage",
            action,
            key,
            err
        );
        self.degraded = true;
    }

    fn medium(&mut self) -> &mut dyn KeyValueStore {
        if self.degraded {
            &mut self.fallback as &mut dyn KeyValueStore
        } else {
            self.backend.as_mut()
        }
    }

    /// Read and decode `key`. Missing, unreadable or corrupted values yield `None`.
    pub fn load<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = match self.medium().get(key) {
            Ok(raw) => raw,
            Err(e) => {
                self.degrade("read", key, &e);
                self.fallback.get(key).ok().flatten()
            }
        }?;

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring corrupted data under {:?}: {}", key, e);
                None
            }
        }
    }

    /// Encode and write `value` under `key`
    pub fn save<T: Serialize>(&mut self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize {:?}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.medium().set(key, &raw) {
            self.degrade("write", key, &e);
            let _ = self.fallback.set(key, &raw);
        }
    }

    /// Delete `key`
    pub fn remove(&mut self, key: &str) {
        if let Err(e) = self.medium().remove(key) {
            self.degrade("remove", key, &e);
        }
        let _ = self.fallback.remove(key);
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway").field("degraded", &self.degraded).finish_non_exhaustive()
    }
}
