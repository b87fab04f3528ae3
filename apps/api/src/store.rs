//! In-memory, per-client prep context store.
//!
//! The explicit hand-off mechanism between the flow's screens (resume
//! profile, selected stage, active session, final result) — threaded through
//! `AppState` instead of living in ambient global storage. Each context is
//! exclusively owned by its own lock; the map lock is only held to look
//! contexts up.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::IntakeJob;
use crate::interview::session::{SessionResult, SessionState};
use crate::models::profile::CandidateProfile;

/// All state one client accumulates across the prep flow.
#[derive(Default)]
pub struct PrepContext {
    pub intake: Option<IntakeJob>,
    pub profile: Option<CandidateProfile>,
    pub selected_stage: Option<u8>,
    pub session: Option<Arc<RwLock<SessionState>>>,
    pub result: Option<SessionResult>,
}

impl PrepContext {
    /// Discards the current attempt, keeping profile and stage selection.
    pub fn reset_attempt(&mut self) {
        self.session = None;
        self.result = None;
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Arc<RwLock<PrepContext>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> (Uuid, Arc<RwLock<PrepContext>>) {
        let id = Uuid::new_v4();
        let context = Arc::new(RwLock::new(PrepContext::default()));
        self.inner.write().await.insert(id, context.clone());
        (id, context)
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<RwLock<PrepContext>>, AppError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Context {id} not found")))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Context {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_remove_roundtrip() {
        let store = SessionStore::new();
        let (id, _) = store.create().await;
        assert!(store.get(id).await.is_ok());
        store.remove(id).await.unwrap();
        assert!(matches!(store.get(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_context_is_not_found() {
        let store = SessionStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_err());
        assert!(store.remove(Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_reset_attempt_keeps_profile_and_stage() {
        let store = SessionStore::new();
        let (_, context) = store.create().await;
        {
            let mut guard = context.write().await;
            guard.profile = Some(crate::models::profile::mock_extracted_profile());
            guard.selected_stage = Some(2);
        }
        let mut guard = context.write().await;
        guard.reset_attempt();
        assert!(guard.profile.is_some());
        assert_eq!(guard.selected_stage, Some(2));
        assert!(guard.session.is_none());
        assert!(guard.result.is_none());
    }
}
