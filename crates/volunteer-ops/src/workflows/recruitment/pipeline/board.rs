use std::collections::HashMap;

use serde::Deserialize;

use super::super::domain::{Candidate, CandidateId, Stage};
use super::persistence::PersistenceError;

/// Errors raised by the pipeline engine.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{value:?} is not a recognized pipeline stage")]
    InvalidTransitionTarget { value: String },
    #[error(
        "candidate {candidate_id} is no longer in '{from_label}' (now '{to_label}'); refetch and retry",
        from_label = .expected.label(),
        to_label = .actual.label()
    )]
    StaleSourceStage {
        candidate_id: CandidateId,
        expected: Stage,
        actual: Stage,
    },
    #[error("target index {index} is out of bounds for the destination lane (max {max})")]
    InvalidTargetIndex { index: usize, max: usize },
    #[error("candidate {0} is not on the board")]
    UnknownCandidate(CandidateId),
    #[error("candidate {0} is already on the board")]
    DuplicateCandidate(CandidateId),
    #[error("persisting the status change failed: {0}")]
    PersistenceFailed(#[from] PersistenceError),
}

/// Request to move a candidate between (or within) stage lanes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoveRequest {
    pub candidate_id: CandidateId,
    pub from_stage: Stage,
    pub to_stage: Stage,
    pub target_index: usize,
}

/// A (stage, index) coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagePosition {
    pub stage: Stage,
    pub index: usize,
}

/// Record of an applied move, carrying everything a rollback needs.
#[derive(Debug, Clone)]
pub struct MoveReceipt {
    pub candidate_id: CandidateId,
    pub from: StagePosition,
    pub to: StagePosition,
    pub status_changed: bool,
}

/// Result of [`PipelineBoard::apply_move`]: either nothing changed (the
/// exact-position no-op) or the board mutated and a receipt was issued.
#[derive(Debug, Clone)]
pub enum AppliedMove {
    NoOp,
    Moved(MoveReceipt),
}

/// Arena-style board: candidates keyed by id, plus one ordered lane per
/// stage. A candidate id appears in exactly one lane at any observable
/// point; all mutation flows through the methods here, never through
/// direct list splicing by callers.
#[derive(Debug)]
pub struct PipelineBoard {
    candidates: HashMap<CandidateId, Candidate>,
    lanes: HashMap<Stage, Vec<CandidateId>>,
}

impl Default for PipelineBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBoard {
    pub fn new() -> Self {
        Self {
            candidates: HashMap::new(),
            lanes: Stage::ordered()
                .into_iter()
                .map(|stage| (stage, Vec::new()))
                .collect(),
        }
    }

    /// Build a board from imported candidates, appending each to the lane of
    /// its recorded stage in input order.
    pub fn seeded(candidates: Vec<Candidate>) -> Result<Self, PipelineError> {
        let mut board = Self::new();
        for candidate in candidates {
            board.insert(candidate)?;
        }
        Ok(board)
    }

    pub fn insert(&mut self, candidate: Candidate) -> Result<(), PipelineError> {
        if self.candidates.contains_key(&candidate.id) {
            return Err(PipelineError::DuplicateCandidate(candidate.id.clone()));
        }
        self.lane_mut(candidate.status).push(candidate.id.clone());
        self.candidates.insert(candidate.id.clone(), candidate);
        Ok(())
    }

    pub fn remove(&mut self, id: &CandidateId) -> Result<Candidate, PipelineError> {
        let candidate = self
            .candidates
            .remove(id)
            .ok_or_else(|| PipelineError::UnknownCandidate(id.clone()))?;
        let lane = self.lane_mut(candidate.status);
        if let Some(index) = lane.iter().position(|member| member == id) {
            lane.remove(index);
        }
        Ok(candidate)
    }

    pub fn candidate(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.get(id)
    }

    pub fn candidate_mut(&mut self, id: &CandidateId) -> Option<&mut Candidate> {
        self.candidates.get_mut(id)
    }

    pub fn lane(&self, stage: Stage) -> &[CandidateId] {
        self.lanes
            .get(&stage)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Where a candidate currently sits, per the lane listings.
    pub fn position(&self, id: &CandidateId) -> Option<StagePosition> {
        let stage = self.candidates.get(id)?.status;
        let index = self
            .lane(stage)
            .iter()
            .position(|member| member == id)
            .expect("candidate missing from its stage lane");
        Some(StagePosition { stage, index })
    }

    /// Validate and apply a move. The check order matters: the stale-source
    /// check runs against the recorded stage before any index validation so
    /// a stale caller is told to refetch rather than being told its index is
    /// wrong.
    pub fn apply_move(&mut self, request: &MoveRequest) -> Result<AppliedMove, PipelineError> {
        let candidate = self
            .candidates
            .get(&request.candidate_id)
            .ok_or_else(|| PipelineError::UnknownCandidate(request.candidate_id.clone()))?;

        if candidate.status != request.from_stage {
            return Err(PipelineError::StaleSourceStage {
                candidate_id: request.candidate_id.clone(),
                expected: request.from_stage,
                actual: candidate.status,
            });
        }

        let current_index = self
            .lane(request.from_stage)
            .iter()
            .position(|member| member == &request.candidate_id)
            .expect("candidate missing from its stage lane");

        let same_stage = request.from_stage == request.to_stage;
        if same_stage && request.target_index == current_index {
            return Ok(AppliedMove::NoOp);
        }

        // Valid insertion points run 0..=len of the destination lane as it
        // will look once the candidate has left its source slot.
        let max_index = if same_stage {
            self.lane(request.to_stage).len() - 1
        } else {
            self.lane(request.to_stage).len()
        };
        if request.target_index > max_index {
            return Err(PipelineError::InvalidTargetIndex {
                index: request.target_index,
                max: max_index,
            });
        }

        self.lane_mut(request.from_stage).remove(current_index);
        self.lane_mut(request.to_stage)
            .insert(request.target_index, request.candidate_id.clone());

        let status_changed = !same_stage;
        if status_changed {
            self.candidates
                .get_mut(&request.candidate_id)
                .expect("candidate present")
                .status = request.to_stage;
        }

        Ok(AppliedMove::Moved(MoveReceipt {
            candidate_id: request.candidate_id.clone(),
            from: StagePosition {
                stage: request.from_stage,
                index: current_index,
            },
            to: StagePosition {
                stage: request.to_stage,
                index: request.target_index,
            },
            status_changed,
        }))
    }

    /// Undo an applied move, restoring the prior (stage, index). Looks the
    /// candidate up by id rather than trusting the receipt's destination
    /// index, so a revert stays correct even if neighbors shifted while the
    /// persistence call was in flight.
    pub fn revert(&mut self, receipt: &MoveReceipt) {
        let destination = self.lane_mut(receipt.to.stage);
        if let Some(index) = destination
            .iter()
            .position(|member| member == &receipt.candidate_id)
        {
            destination.remove(index);
        }

        let source = self.lane_mut(receipt.from.stage);
        let index = receipt.from.index.min(source.len());
        source.insert(index, receipt.candidate_id.clone());

        if let Some(candidate) = self.candidates.get_mut(&receipt.candidate_id) {
            candidate.status = receipt.from.stage;
        }
    }

    fn lane_mut(&mut self, stage: Stage) -> &mut Vec<CandidateId> {
        self.lanes.entry(stage).or_default()
    }
}
