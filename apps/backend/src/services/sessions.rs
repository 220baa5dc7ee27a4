//! In-memory session registry.
//!
//! Each session is an independent [`Session`] behind its own lock; requests for
//! one session never touch another's deck or navigator.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use flashforge_core::Session;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// A session plus bookkeeping for idle eviction.
pub struct SessionHandle {
    pub id: Uuid,
    pub session: Mutex<Session>,
    last_seen_at: StdMutex<DateTime<Utc>>,
}

impl SessionHandle {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            session: Mutex::new(Session::new()),
            last_seen_at: StdMutex::new(Utc::now()),
        }
    }

    fn touch(&self) {
        if let Ok(mut seen) = self.last_seen_at.lock() {
            *seen = Utc::now();
        }
    }

    pub fn last_seen_at(&self) -> DateTime<Utc> {
        self.last_seen_at
            .lock()
            .map(|seen| *seen)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

/// All live sessions.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<SessionHandle>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Open a fresh session and return its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(SessionHandle::new(id)));
        tracing::info!(session_id = %id, "opened session");
        id
    }

    /// Look up a session, marking it as active.
    pub async fn get(&self, id: Uuid) -> Option<Arc<SessionHandle>> {
        let handle = self.sessions.read().await.get(&id).cloned()?;
        handle.touch();
        Some(handle)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(session_id = %id, "closed session");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions idle for longer than the TTL as of `now`.
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or_else(|_| chrono::Duration::days(36_500));
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| now - handle.last_seen_at() <= ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "evicted idle sessions");
        }
        evicted
    }

    /// Periodically evict idle sessions until the store is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let Some(store) = store.upgrade() else { break };
                store.evict_idle(Utc::now()).await;
            }
        })
    }
}
