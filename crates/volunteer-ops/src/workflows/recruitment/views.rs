use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Candidate, CandidateId, CptOptStatus, Stage, VolunteerType};
use super::pipeline::{MoveOutcome, PipelineBoard};

/// Serializable candidate summary for board surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub applied_role: String,
    pub team: String,
    pub status: Stage,
    pub status_label: &'static str,
    pub volunteer_type: VolunteerType,
    pub volunteer_type_label: &'static str,
    pub cpt_opt_status: CptOptStatus,
    pub cpt_opt_status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_interview_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm_interview_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    pub to_do: Vec<&'static str>,
}

impl CandidateView {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            email: candidate.contact.email.clone(),
            applied_role: candidate.applied_role.clone(),
            team: candidate.team.clone(),
            status: candidate.status,
            status_label: candidate.status.label(),
            volunteer_type: candidate.volunteer_type,
            volunteer_type_label: candidate.volunteer_type.label(),
            cpt_opt_status: candidate.cpt_opt_status,
            cpt_opt_status_label: candidate.cpt_opt_status.label(),
            hr_interview_date: candidate.hr_interview_date,
            pm_interview_date: candidate.pm_interview_date,
            start_date: candidate.start_date,
            to_do: candidate.to_do(),
        }
    }
}

/// One stage lane, candidates in board order.
#[derive(Debug, Clone, Serialize)]
pub struct StageLaneView {
    pub stage: Stage,
    pub stage_label: &'static str,
    pub count: usize,
    pub candidates: Vec<CandidateView>,
}

/// The whole board, lanes in pipeline order.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub total: usize,
    pub lanes: Vec<StageLaneView>,
}

impl BoardView {
    pub fn from_board(board: &PipelineBoard) -> Self {
        let lanes = Stage::ordered()
            .into_iter()
            .map(|stage| {
                let candidates = board
                    .lane(stage)
                    .iter()
                    .filter_map(|id| board.candidate(id))
                    .map(CandidateView::from_candidate)
                    .collect::<Vec<_>>();
                StageLaneView {
                    stage,
                    stage_label: stage.label(),
                    count: candidates.len(),
                    candidates,
                }
            })
            .collect::<Vec<_>>();

        Self {
            total: board.len(),
            lanes,
        }
    }
}

/// Wire shape for a completed move.
#[derive(Debug, Clone, Serialize)]
pub struct MoveOutcomeView {
    pub candidate: CandidateView,
    pub from_stage: Stage,
    pub from_index: usize,
    pub to_stage: Stage,
    pub to_index: usize,
    pub persisted: bool,
}

impl MoveOutcomeView {
    pub fn from_outcome(outcome: &MoveOutcome) -> Self {
        Self {
            candidate: CandidateView::from_candidate(&outcome.candidate),
            from_stage: outcome.from.stage,
            from_index: outcome.from.index,
            to_stage: outcome.to.stage,
            to_index: outcome.to.index,
            persisted: outcome.persisted,
        }
    }
}
