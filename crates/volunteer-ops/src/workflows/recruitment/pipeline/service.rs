use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::access::{ensure_permission, AccessError, Capability, Session};

use super::super::domain::{
    Candidate, CandidateId, CptOptStatus, DocumentSlot, DocumentStatus, VolunteerType,
};
use super::board::{AppliedMove, MoveRequest, PipelineBoard, PipelineError, StagePosition};
use super::persistence::{PersistenceError, StatusPersistence};

/// Field-level update to a candidate record, one field per request. Stage
/// changes never travel through here; they go through `move_candidate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateUpdate {
    Notes(String),
    Team(String),
    AppliedRole(String),
    Phone(Option<String>),
    VolunteerType(VolunteerType),
    CptOptStatus(CptOptStatus),
    HrInterviewDate(Option<NaiveDate>),
    PmInterviewDate(Option<NaiveDate>),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
}

impl CandidateUpdate {
    /// The capability the permission gate checks for this field.
    pub const fn required_capability(&self) -> Capability {
        match self {
            Self::HrInterviewDate(_) | Self::PmInterviewDate(_) => Capability::ScheduleInterviews,
            _ => Capability::Edit,
        }
    }

    fn apply(self, candidate: &mut Candidate) {
        match self {
            Self::Notes(notes) => candidate.notes = notes,
            Self::Team(team) => candidate.team = team,
            Self::AppliedRole(role) => candidate.applied_role = role,
            Self::Phone(phone) => candidate.contact.phone = phone,
            Self::VolunteerType(volunteer_type) => candidate.volunteer_type = volunteer_type,
            Self::CptOptStatus(status) => candidate.cpt_opt_status = status,
            Self::HrInterviewDate(date) => candidate.hr_interview_date = date,
            Self::PmInterviewDate(date) => candidate.pm_interview_date = date,
            Self::StartDate(date) => candidate.start_date = date,
            Self::EndDate(date) => candidate.end_date = date,
        }
        candidate.normalize();
    }
}

static CANDIDATE_SEQUENCE: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Sequential candidate ids for records created through the service.
pub fn next_candidate_id() -> CandidateId {
    let id = CANDIDATE_SEQUENCE.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    CandidateId(format!("cand-{id:06}"))
}

/// Result of a completed `move_candidate` call.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub candidate: Candidate,
    pub from: StagePosition,
    pub to: StagePosition,
    pub persisted: bool,
}

/// Error raised by the gated service operations.
#[derive(Debug, thiserror::Error)]
pub enum PipelineServiceError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Service owning the board and the persistence seam. Stage moves apply
/// optimistically and roll back if the persistence call fails or times out;
/// reads taken while the call is in flight observe the optimistic
/// destination.
pub struct PipelineService<P> {
    board: Mutex<PipelineBoard>,
    persistence: Arc<P>,
    persist_timeout: Duration,
}

impl<P> PipelineService<P>
where
    P: StatusPersistence + 'static,
{
    pub fn new(board: PipelineBoard, persistence: Arc<P>, persist_timeout: Duration) -> Self {
        Self {
            board: Mutex::new(board),
            persistence,
            persist_timeout,
        }
    }

    /// Run a closure against the current board state. Used by read surfaces
    /// to build views without exposing the lock.
    pub fn with_board<T>(&self, read: impl FnOnce(&PipelineBoard) -> T) -> T {
        let board = self.board.lock().expect("board mutex poisoned");
        read(&board)
    }

    /// Move a candidate between (or within) stages. Same-stage reorders are
    /// pure list splices and never touch persistence; cross-stage moves
    /// persist the new status and roll back on failure.
    pub async fn move_candidate(
        &self,
        request: MoveRequest,
    ) -> Result<MoveOutcome, PipelineError> {
        let applied = {
            let mut board = self.board.lock().expect("board mutex poisoned");
            board.apply_move(&request)?
        };

        let receipt = match applied {
            AppliedMove::NoOp => {
                debug!(candidate = %request.candidate_id, "move is a no-op; nothing persisted");
                return Ok(self.outcome_at_rest(&request.candidate_id, false));
            }
            AppliedMove::Moved(receipt) => receipt,
        };

        if !receipt.status_changed {
            debug!(
                candidate = %request.candidate_id,
                stage = request.to_stage.label(),
                "reordered within stage; no status change to persist"
            );
            return Ok(MoveOutcome {
                candidate: self.candidate_snapshot(&request.candidate_id),
                from: receipt.from,
                to: receipt.to,
                persisted: false,
            });
        }

        let persist = self
            .persistence
            .persist_status_change(&request.candidate_id, request.to_stage);
        let result = match timeout(self.persist_timeout, persist).await {
            Ok(result) => result,
            Err(_) => Err(PersistenceError::Timeout {
                timeout_ms: self.persist_timeout.as_millis() as u64,
            }),
        };

        if let Err(source) = result {
            warn!(
                candidate = %request.candidate_id,
                from = request.from_stage.label(),
                to = request.to_stage.label(),
                error = %source,
                "persistence failed; rolling back optimistic move"
            );
            let mut board = self.board.lock().expect("board mutex poisoned");
            board.revert(&receipt);
            return Err(PipelineError::PersistenceFailed(source));
        }

        debug!(
            candidate = %request.candidate_id,
            from = request.from_stage.label(),
            to = request.to_stage.label(),
            "stage change persisted"
        );
        Ok(MoveOutcome {
            candidate: self.candidate_snapshot(&request.candidate_id),
            from: receipt.from,
            to: receipt.to,
            persisted: true,
        })
    }

    /// Add a candidate to the board. Gated by the create capability.
    pub fn add_candidate(
        &self,
        session: &Session,
        candidate: Candidate,
    ) -> Result<Candidate, PipelineServiceError> {
        ensure_permission(session.role, Capability::Create)?;
        let mut normalized = candidate;
        normalized.normalize();
        let snapshot = normalized.clone();
        let mut board = self.board.lock().expect("board mutex poisoned");
        board.insert(normalized)?;
        Ok(snapshot)
    }

    /// Apply a single-field update. Gated by the capability the field
    /// requires (interview dates need scheduling rights, the rest edit
    /// rights).
    pub fn update_candidate(
        &self,
        session: &Session,
        id: &CandidateId,
        update: CandidateUpdate,
    ) -> Result<Candidate, PipelineServiceError> {
        ensure_permission(session.role, update.required_capability())?;
        let mut board = self.board.lock().expect("board mutex poisoned");
        let candidate = board
            .candidate_mut(id)
            .ok_or_else(|| PipelineError::UnknownCandidate(id.clone()))?;
        update.apply(candidate);
        Ok(candidate.clone())
    }

    /// Remove a candidate entirely. Gated by the delete capability.
    pub fn remove_candidate(
        &self,
        session: &Session,
        id: &CandidateId,
    ) -> Result<Candidate, PipelineServiceError> {
        ensure_permission(session.role, Capability::Delete)?;
        let mut board = self.board.lock().expect("board mutex poisoned");
        Ok(board.remove(id)?)
    }

    /// Record an uploaded document against one of the candidate's document
    /// slots. Gated by the upload capability; storage itself happens in an
    /// external collaborator, only the metadata lands here.
    pub fn attach_document(
        &self,
        session: &Session,
        id: &CandidateId,
        slot: DocumentSlot,
        link: impl Into<String>,
    ) -> Result<Candidate, PipelineServiceError> {
        ensure_permission(session.role, Capability::UploadDocuments)?;
        let mut board = self.board.lock().expect("board mutex poisoned");
        let candidate = board
            .candidate_mut(id)
            .ok_or_else(|| PipelineError::UnknownCandidate(id.clone()))?;
        let document = candidate.document_mut(slot);
        document.link = Some(link.into());
        if document.status == DocumentStatus::NotSent {
            document.status = DocumentStatus::Sent;
        }
        Ok(candidate.clone())
    }

    fn candidate_snapshot(&self, id: &CandidateId) -> Candidate {
        let board = self.board.lock().expect("board mutex poisoned");
        board
            .candidate(id)
            .cloned()
            .expect("moved candidate present on board")
    }

    fn outcome_at_rest(&self, id: &CandidateId, persisted: bool) -> MoveOutcome {
        let board = self.board.lock().expect("board mutex poisoned");
        let position = board.position(id).expect("candidate present on board");
        MoveOutcome {
            candidate: board
                .candidate(id)
                .cloned()
                .expect("candidate present on board"),
            from: position,
            to: position,
            persisted,
        }
    }
}
