//! The pipeline engine: the stage board, the move rule, and the optimistic
//! persistence boundary around it.

mod board;
mod persistence;
mod service;

pub use board::{
    AppliedMove, MoveReceipt, MoveRequest, PipelineBoard, PipelineError, StagePosition,
};
pub use persistence::{PersistenceError, StatusPersistence};
pub use service::{
    next_candidate_id, CandidateUpdate, MoveOutcome, PipelineService, PipelineServiceError,
};
