use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::access::UserId;

/// Identifier wrapper for evaluation records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// Identifier wrapper for evaluation periods (e.g. a quarter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationKind {
    Quarterly,
    Annual,
    Probationary,
}

impl EvaluationKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quarterly => "Quarterly Review",
            Self::Annual => "Annual Review",
            Self::Probationary => "Probationary Review",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl EvaluationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }
}

/// The confidential payload of a completed evaluation. Carried as a single
/// optional value on [`Evaluation`] so that redaction produces absence the
/// receiving surface can distinguish from a genuinely blank review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDetails {
    pub overall_score: f32,
    pub criteria_scores: BTreeMap<String, f32>,
    pub feedback_text: String,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub achievements: Vec<String>,
    pub challenges: Vec<String>,
    pub goals_next_period: Vec<String>,
    pub recommended_training: Vec<String>,
}

/// An evaluation record. `details` is present iff the evaluation is
/// completed in the canonical case, and removed by the visibility engine
/// for viewers not entitled to the subject's confidential payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub subject_id: UserId,
    pub evaluator_id: UserId,
    pub period_id: PeriodId,
    pub kind: EvaluationKind,
    pub status: EvaluationStatus,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<EvaluationDetails>,
}

impl Evaluation {
    /// A not-yet-completed evaluation: no completion date, no payload.
    pub fn scheduled(
        id: impl Into<String>,
        subject_id: UserId,
        evaluator_id: UserId,
        period_id: impl Into<String>,
        kind: EvaluationKind,
        status: EvaluationStatus,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: EvaluationId(id.into()),
            subject_id,
            evaluator_id,
            period_id: PeriodId(period_id.into()),
            kind,
            status,
            due_date,
            completed_date: None,
            details: None,
        }
    }

    /// A completed evaluation carrying its confidential payload.
    pub fn completed(
        id: impl Into<String>,
        subject_id: UserId,
        evaluator_id: UserId,
        period_id: impl Into<String>,
        kind: EvaluationKind,
        due_date: NaiveDate,
        completed_date: NaiveDate,
        details: EvaluationDetails,
    ) -> Self {
        Self {
            id: EvaluationId(id.into()),
            subject_id,
            evaluator_id,
            period_id: PeriodId(period_id.into()),
            kind,
            status: EvaluationStatus::Completed,
            due_date,
            completed_date: Some(completed_date),
            details: Some(details),
        }
    }
}
