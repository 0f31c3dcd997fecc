//! Session store shared between a career handler and its owner

use super::models::{CareerSession, JobListing};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory sessions keyed by conversation id.
///
/// Cloning shares the same map, so the caller can keep a handle to inspect or
/// clear sessions the handler writes.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, CareerSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a session
    pub async fn insert(&self, conversation_id: impl Into<String>, session: CareerSession) {
        self.sessions.write().await.insert(conversation_id.into(), session);
    }

    /// Snapshot of a session
    pub async fn get(&self, conversation_id: &str) -> Option<CareerSession> {
        self.sessions.read().await.get(conversation_id).cloned()
    }

    /// Replace the job list of an existing session. Returns false when the
    /// session is gone.
    pub async fn set_jobs(&self, conversation_id: &str, jobs: Vec<JobListing>) -> bool {
        match self.sessions.write().await.get_mut(conversation_id) {
            Some(session) => {
                session.jobs = jobs;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, conversation_id: &str) -> Option<CareerSession> {
        self.sessions.write().await.remove(conversation_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
