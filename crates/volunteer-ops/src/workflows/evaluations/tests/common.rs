use std::collections::BTreeMap;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::access::{Project, ProjectDirectory, ProjectId, User, UserId, UserRole};
use crate::workflows::evaluations::domain::{
    Evaluation, EvaluationDetails, EvaluationId, EvaluationKind, EvaluationStatus, PeriodId,
};
use crate::workflows::evaluations::store::{DirectoryError, OrgDirectory};

pub(super) fn uid(value: &str) -> UserId {
    UserId(value.to_string())
}

pub(super) fn details(score: f32) -> EvaluationDetails {
    let mut criteria_scores = BTreeMap::new();
    criteria_scores.insert("collaboration".to_string(), score);
    criteria_scores.insert("delivery".to_string(), score);
    EvaluationDetails {
        overall_score: score,
        criteria_scores,
        feedback_text: "steady contributor".to_string(),
        strengths: vec!["communication".to_string()],
        improvement_areas: vec!["estimation".to_string()],
        achievements: vec!["shipped the intake form".to_string()],
        challenges: vec!["tight timelines".to_string()],
        goals_next_period: vec!["own a feature end to end".to_string()],
        recommended_training: vec!["accessibility basics".to_string()],
    }
}

pub(super) fn evaluation(
    id: &str,
    subject: &str,
    status: EvaluationStatus,
    score: Option<f32>,
) -> Evaluation {
    Evaluation {
        id: EvaluationId(id.to_string()),
        subject_id: uid(subject),
        evaluator_id: uid("hr-1"),
        period_id: PeriodId("2026-q2".to_string()),
        kind: EvaluationKind::Quarterly,
        status,
        due_date: NaiveDate::from_ymd_opt(2026, 6, 30).expect("valid date"),
        completed_date: (status == EvaluationStatus::Completed)
            .then(|| NaiveDate::from_ymd_opt(2026, 6, 25).expect("valid date")),
        details: score.map(details),
    }
}

pub(super) fn users() -> Vec<User> {
    vec![
        User::new("admin-1", UserRole::Admin).with_profile("Avery Quinn", "avery@example.org"),
        User::new("hr-1", UserRole::Hr).with_profile("Harper Diaz", "harper@example.org"),
        User::new("lead-1", UserRole::Lead).with_profile("Lena Voss", "lena@example.org"),
        User::new("vol-a", UserRole::Volunteer).with_profile("Ana Ruiz", "ana@example.org"),
        User::new("vol-b", UserRole::Volunteer).with_profile("Ben Osei", "ben@example.org"),
        User::new("vol-c", UserRole::Volunteer).with_profile("Cleo Marsh", "cleo@example.org"),
    ]
}

pub(super) fn projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId("proj-alpha".to_string()),
            name: "Alpha Outreach".to_string(),
            lead_id: uid("lead-1"),
            team_members: vec![uid("vol-a"), uid("vol-b")],
        },
        Project {
            id: ProjectId("proj-beta".to_string()),
            name: "Beta Insights".to_string(),
            lead_id: uid("lead-2"),
            team_members: vec![uid("vol-c")],
        },
    ]
}

/// The team scenario: the lead's own completed review, one completed and one
/// in-flight review inside the team, one pending review inside the team,
/// and one review outside the team entirely.
pub(super) fn evaluations() -> Vec<Evaluation> {
    vec![
        evaluation("eval-l", "lead-1", EvaluationStatus::Completed, Some(4.0)),
        evaluation("eval-a", "vol-a", EvaluationStatus::InProgress, Some(5.0)),
        evaluation("eval-b", "vol-b", EvaluationStatus::Pending, None),
        evaluation("eval-c", "vol-c", EvaluationStatus::Overdue, None),
    ]
}

pub(super) fn directory() -> ProjectDirectory {
    ProjectDirectory::new(projects())
}

#[derive(Default)]
pub(super) struct MemoryOrgDirectory {
    pub(super) users: Vec<User>,
    pub(super) projects: Vec<Project>,
    pub(super) evaluations: Vec<Evaluation>,
}

impl MemoryOrgDirectory {
    pub(super) fn seeded() -> Self {
        Self {
            users: users(),
            projects: projects(),
            evaluations: evaluations(),
        }
    }
}

impl OrgDirectory for MemoryOrgDirectory {
    fn users(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.users.clone())
    }

    fn projects(&self) -> Result<Vec<Project>, DirectoryError> {
        Ok(self.projects.clone())
    }

    fn evaluations(&self) -> Result<Vec<Evaluation>, DirectoryError> {
        Ok(self.evaluations.clone())
    }
}

pub(super) struct UnavailableDirectory;

impl OrgDirectory for UnavailableDirectory {
    fn users(&self) -> Result<Vec<User>, DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }

    fn projects(&self) -> Result<Vec<Project>, DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }

    fn evaluations(&self) -> Result<Vec<Evaluation>, DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
