//! Session storage seam
//!
//! The store is a flat string key space modelled after the browser storage
//! the admin shell originally used. Reads never fail and never block the
//! caller beyond the store's own I/O; decorating an outbound request with
//! the current token is a pure read.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keys used by the session manager.
pub mod keys {
    /// Primary access-token key.
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Legacy alias kept in sync with [`ACCESS_TOKEN`] on every write.
    pub const ACCESS_TOKEN_ALIAS: &str = "token";
    /// Refresh-token key.
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// Serialized [`crate::types::UserProfile`].
    pub const USER: &str = "user";
}

/// Durable key-value storage for session credentials.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str);
    async fn remove(&self, key: &str);
    /// Remove every key as one operation.
    async fn clear(&self);
}

/// In-memory store; the default for native processes and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        self.entries.write().await.insert(key.to_owned(), value.to_owned());
    }

    async fn remove(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
