use async_trait::async_trait;

use super::super::domain::{CandidateId, Stage};

/// Outbound seam for recording a stage change in the backing store. The
/// hosting service supplies the implementation (database adapter, upstream
/// API client, in-memory fake for tests and demos).
#[async_trait]
pub trait StatusPersistence: Send + Sync {
    async fn persist_status_change(
        &self,
        candidate_id: &CandidateId,
        stage: Stage,
    ) -> Result<(), PersistenceError>;
}

/// Failure of the persistence call. All variants are recoverable from the
/// engine's point of view: the optimistic move is rolled back and the caller
/// may retry.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("persistence backend unavailable: {0}")]
    Unavailable(String),
    #[error("persistence backend rejected the change: {0}")]
    Rejected(String),
    #[error("persistence call exceeded {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}
