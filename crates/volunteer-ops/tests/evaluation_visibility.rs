//! Integration specifications for the visibility engine: the team scenario
//! end to end, including what actually crosses the wire boundary once views
//! are serialized.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use volunteer_ops::access::{
    check_permission, Capability, Project, ProjectDirectory, ProjectId, User, UserId, UserRole,
};
use volunteer_ops::workflows::evaluations::{
    compute_metrics, resolve_scope, DashboardView, Evaluation, EvaluationDetails, EvaluationId,
    EvaluationKind, EvaluationStatus, PeriodId, ScopePolicy,
};

fn uid(value: &str) -> UserId {
    UserId(value.to_string())
}

fn details(score: f32) -> EvaluationDetails {
    EvaluationDetails {
        overall_score: score,
        criteria_scores: BTreeMap::from([("delivery".to_string(), score)]),
        feedback_text: "solid quarter".to_string(),
        strengths: vec!["mentoring".to_string()],
        improvement_areas: vec!["documentation".to_string()],
        achievements: vec!["led the food drive".to_string()],
        challenges: vec!["volunteer churn".to_string()],
        goals_next_period: vec!["train a successor".to_string()],
        recommended_training: vec!["project management".to_string()],
    }
}

fn record(id: &str, subject: &str, status: EvaluationStatus, score: Option<f32>) -> Evaluation {
    Evaluation {
        id: EvaluationId(id.to_string()),
        subject_id: uid(subject),
        evaluator_id: uid("hr-1"),
        period_id: PeriodId("2026-q2".to_string()),
        kind: EvaluationKind::Quarterly,
        status,
        due_date: NaiveDate::from_ymd_opt(2026, 6, 30).expect("valid date"),
        completed_date: (status == EvaluationStatus::Completed)
            .then(|| NaiveDate::from_ymd_opt(2026, 6, 20).expect("valid date")),
        details: score.map(details),
    }
}

/// Team {lead=L, members=[A, B]} with a third subject outside the team.
fn fixture() -> (Vec<User>, Vec<Evaluation>, ProjectDirectory) {
    let users = vec![
        User::new("lead-l", UserRole::Lead),
        User::new("vol-a", UserRole::Volunteer),
        User::new("vol-b", UserRole::Volunteer),
        User::new("vol-x", UserRole::Volunteer),
    ];
    let evaluations = vec![
        record("eval-l", "lead-l", EvaluationStatus::Completed, Some(4.0)),
        record("eval-a", "vol-a", EvaluationStatus::InProgress, Some(5.0)),
        record("eval-b", "vol-b", EvaluationStatus::Pending, None),
        record("eval-x", "vol-x", EvaluationStatus::Completed, Some(2.0)),
    ];
    let directory = ProjectDirectory::new(vec![Project {
        id: ProjectId("proj-1".to_string()),
        name: "Community Kitchen".to_string(),
        lead_id: uid("lead-l"),
        team_members: vec![uid("vol-a"), uid("vol-b")],
    }]);
    (users, evaluations, directory)
}

#[test]
fn the_team_scenario_resolves_exactly_as_specified() {
    let (users, evaluations, directory) = fixture();
    let lead = users[0].clone();

    let resolution = resolve_scope(&lead, &evaluations, &users, &directory);

    assert_eq!(resolution.policy, ScopePolicy::Team);
    assert_eq!(resolution.records.len(), 3);

    let own = &resolution.records[0];
    assert_eq!(own.subject_id, uid("lead-l"));
    assert_eq!(
        own.details.as_ref().map(|d| d.overall_score),
        Some(4.0),
        "the lead's own record arrives in full"
    );

    let a = &resolution.records[1];
    assert_eq!(a.subject_id, uid("vol-a"));
    assert!(a.details.is_none(), "A arrives redacted, score absent");

    let b = &resolution.records[2];
    assert_eq!(b.subject_id, uid("vol-b"));
    assert_eq!(b.status, EvaluationStatus::Pending);
    assert!(b.details.is_none());

    let metrics = &resolution.metrics;
    assert_eq!(metrics.total, 3);
    assert_eq!(metrics.completed, 1);
    assert_eq!(metrics.pending, 1);
    assert_eq!(metrics.overdue, 0);
    assert!((metrics.average_score - 4.0).abs() < f32::EPSILON);
    assert!((metrics.completion_rate - 33.33).abs() < 0.01);
}

#[test]
fn scope_containment_holds_for_every_role() {
    let (users, evaluations, directory) = fixture();

    let lead = resolve_scope(&users[0], &evaluations, &users, &directory);
    assert!(lead
        .records
        .iter()
        .all(|record| record.subject_id != uid("vol-x")));

    let volunteer = resolve_scope(&users[1], &evaluations, &users, &directory);
    assert!(volunteer
        .records
        .iter()
        .all(|record| record.subject_id == uid("vol-a")));

    let admin = resolve_scope(
        &User::new("admin-1", UserRole::Admin),
        &evaluations,
        &users,
        &directory,
    );
    assert_eq!(admin.records.len(), evaluations.len());
}

#[test]
fn redaction_survives_serialization_as_absence() {
    let (users, evaluations, directory) = fixture();
    let resolution = resolve_scope(&users[0], &evaluations, &users, &directory);
    let view = DashboardView::from_resolution(uid("lead-l"), &resolution);

    let payload = serde_json::to_value(&view).expect("serializes");
    let records = payload["records"].as_array().expect("records array");
    for record in records {
        if record["subject_id"] == "lead-l" {
            assert!(record.get("details").is_some());
        } else {
            // No `details` key at all: a UI cannot mistake redaction for an
            // explicitly blank review.
            assert!(record.get("details").is_none());
        }
    }
}

#[test]
fn metrics_recompute_instead_of_caching_across_membership_changes() {
    let (users, evaluations, directory) = fixture();
    let lead = users[0].clone();

    let before = resolve_scope(&lead, &evaluations, &users, &directory);
    assert_eq!(before.metrics.total, 3);

    // vol-b rolls off the project; the very next resolve reflects it.
    let directory = ProjectDirectory::new(vec![Project {
        id: ProjectId("proj-1".to_string()),
        name: "Community Kitchen".to_string(),
        lead_id: uid("lead-l"),
        team_members: vec![uid("vol-a")],
    }]);
    let after = resolve_scope(&lead, &evaluations, &users, &directory);
    assert_eq!(after.metrics.total, 2);
    assert!(after
        .records
        .iter()
        .all(|record| record.subject_id != uid("vol-b")));
}

#[test]
fn permission_checks_are_pure_lookups() {
    assert!(check_permission(UserRole::Hr, Capability::Create));
    assert!(!check_permission(UserRole::Lead, Capability::Create));
    // Calling twice changes nothing and touches nothing.
    assert_eq!(
        check_permission(UserRole::Lead, Capability::Create),
        check_permission(UserRole::Lead, Capability::Create)
    );
}

#[test]
fn metric_consistency_on_the_raw_dataset() {
    let (_, evaluations, _) = fixture();
    let metrics = compute_metrics(&evaluations);
    assert_eq!(metrics.total, evaluations.len());
    assert!(metrics.completed + metrics.pending + metrics.overdue <= metrics.total);
    assert_eq!(metrics.risk_evaluations, metrics.overdue + metrics.pending);
}
