use chrono::NaiveDate;
use serde::Serialize;

use crate::access::{User, UserId, UserRole};

use super::domain::{Evaluation, EvaluationDetails, EvaluationId, EvaluationKind, EvaluationStatus, PeriodId};
use super::metrics::EvaluationMetrics;
use super::visibility::{ScopePolicy, ScopeResolution};

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationView {
    pub id: EvaluationId,
    pub subject_id: UserId,
    pub evaluator_id: UserId,
    pub period_id: PeriodId,
    pub kind: EvaluationKind,
    pub kind_label: &'static str,
    pub status: EvaluationStatus,
    pub status_label: &'static str,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EvaluationDetails>,
}

impl EvaluationView {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        Self {
            id: evaluation.id.clone(),
            subject_id: evaluation.subject_id.clone(),
            evaluator_id: evaluation.evaluator_id.clone(),
            period_id: evaluation.period_id.clone(),
            kind: evaluation.kind,
            kind_label: evaluation.kind.label(),
            status: evaluation.status,
            status_label: evaluation.status.label(),
            due_date: evaluation.due_date,
            completed_date: evaluation.completed_date,
            details: evaluation.details.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub role: UserRole,
    pub role_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserView {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            role: user.role,
            role_label: user.role.label(),
            name: user.profile.as_ref().map(|profile| profile.name.clone()),
            email: user.profile.as_ref().map(|profile| profile.email.clone()),
        }
    }
}

/// Dashboard payload: the viewer's scope, metrics over it, and the visible
/// (already sanitized) records and users.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub viewer_id: UserId,
    pub policy: ScopePolicy,
    pub policy_label: &'static str,
    pub metrics: EvaluationMetrics,
    pub records: Vec<EvaluationView>,
    pub users: Vec<UserView>,
}

impl DashboardView {
    pub fn from_resolution(viewer_id: UserId, resolution: &ScopeResolution) -> Self {
        Self {
            viewer_id,
            policy: resolution.policy,
            policy_label: resolution.policy.label(),
            metrics: resolution.metrics.clone(),
            records: resolution
                .records
                .iter()
                .map(EvaluationView::from_evaluation)
                .collect(),
            users: resolution.users.iter().map(UserView::from_user).collect(),
        }
    }
}
