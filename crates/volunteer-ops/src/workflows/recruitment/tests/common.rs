use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::recruitment::domain::{Candidate, CandidateId, Stage, VolunteerType};
use crate::workflows::recruitment::pipeline::{
    PersistenceError, PipelineBoard, PipelineService, StatusPersistence,
};

pub(super) fn candidate(id: &str, name: &str, stage: Stage) -> Candidate {
    let mut candidate = Candidate::new(
        id,
        name,
        format!("{}@example.org", id),
        "Web Developer",
        "Platform",
        VolunteerType::Regular,
    );
    candidate.status = stage;
    candidate
}

/// Board with three candidates queued for HR interviews and one fresh
/// application, matching the shape most tests need.
pub(super) fn seeded_board() -> PipelineBoard {
    PipelineBoard::seeded(vec![
        candidate("cand-a", "Ana Ruiz", Stage::HrInterviewScheduled),
        candidate("cand-b", "Ben Osei", Stage::HrInterviewScheduled),
        candidate("cand-c", "Cleo Marsh", Stage::HrInterviewScheduled),
        candidate("cand-d", "Dana Petrov", Stage::ApplicationReceived),
    ])
    .expect("seed board")
}

pub(super) fn id(value: &str) -> CandidateId {
    CandidateId(value.to_string())
}

/// Persistence fake that records every call and succeeds.
#[derive(Default)]
pub(super) struct RecordingPersistence {
    calls: Mutex<Vec<(CandidateId, Stage)>>,
}

impl RecordingPersistence {
    pub(super) fn calls(&self) -> Vec<(CandidateId, Stage)> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl StatusPersistence for RecordingPersistence {
    async fn persist_status_change(
        &self,
        candidate_id: &CandidateId,
        stage: Stage,
    ) -> Result<(), PersistenceError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push((candidate_id.clone(), stage));
        Ok(())
    }
}

/// Persistence fake that always refuses.
pub(super) struct FailingPersistence;

#[async_trait]
impl StatusPersistence for FailingPersistence {
    async fn persist_status_change(
        &self,
        _candidate_id: &CandidateId,
        _stage: Stage,
    ) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("backend offline".to_string()))
    }
}

/// Persistence fake that completes only after `delay`, for timeout tests.
pub(super) struct SlowPersistence {
    pub(super) delay: Duration,
}

#[async_trait]
impl StatusPersistence for SlowPersistence {
    async fn persist_status_change(
        &self,
        _candidate_id: &CandidateId,
        _stage: Stage,
    ) -> Result<(), PersistenceError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

pub(super) fn build_service<P: StatusPersistence + 'static>(
    board: PipelineBoard,
    persistence: Arc<P>,
) -> PipelineService<P> {
    PipelineService::new(board, persistence, Duration::from_millis(200))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
