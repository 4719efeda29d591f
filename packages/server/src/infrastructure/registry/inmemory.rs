//! InMemory ClientRegistry 実装
//!
//! HashMap をインメモリの登録簿として使用します。
//! プロセスの生存期間だけ保持され、永続化はしません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientEntry, ClientRegistry, ConnectionId};

/// インメモリ ClientRegistry 実装
#[derive(Default)]
pub struct InMemoryClientRegistry {
    /// Key: ConnectionId, Value: ClientEntry
    clients: Mutex<HashMap<ConnectionId, ClientEntry>>,
}

impl InMemoryClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRegistry for InMemoryClientRegistry {
    async fn register(&self, id: ConnectionId, entry: ClientEntry) -> bool {
        let mut clients = self.clients.lock().await;
        if clients.contains_key(&id) {
            tracing::debug!("{} is already registered, ignoring", id);
            return false;
        }
        tracing::debug!("{} registered as '{}'", id, entry.name);
        clients.insert(id, entry);
        true
    }

    async fn unregister(&self, id: ConnectionId) -> Option<ClientEntry> {
        let mut clients = self.clients.lock().await;
        let removed = clients.remove(&id);
        if removed.is_none() {
            tracing::debug!("{} was not registered, nothing to remove", id);
        }
        removed
    }

    async fn snapshot(&self) -> Vec<(ConnectionId, ClientEntry)> {
        let clients = self.clients.lock().await;
        let mut entries: Vec<(ConnectionId, ClientEntry)> = clients
            .iter()
            .map(|(id, entry)| (*id, entry.clone()))
            .collect();
        drop(clients);

        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    async fn contains(&self, id: ConnectionId) -> bool {
        self.clients.lock().await.contains_key(&id)
    }

    async fn len(&self) -> usize {
        self.clients.lock().await.len()
    }
}
