//! Recruitment pipeline: the candidate domain model, the stage board engine,
//! and the HTTP surface the portal board talks to.

pub mod domain;
pub mod pipeline;
pub mod router;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    Candidate, CandidateId, ContactInfo, CptOptStatus, DocumentSlot, DocumentState,
    DocumentStatus, Stage, VolunteerType,
};
pub use pipeline::{
    next_candidate_id, AppliedMove, CandidateUpdate, MoveOutcome, MoveReceipt, MoveRequest,
    PersistenceError, PipelineBoard, PipelineError, PipelineService, PipelineServiceError,
    StagePosition, StatusPersistence,
};
pub use router::board_router;
pub use views::{BoardView, CandidateView, MoveOutcomeView, StageLaneView};
