use serde::Serialize;

use crate::access::{ProjectDirectory, User, UserId, UserRole};

use super::domain::Evaluation;
use super::metrics::{compute_metrics, EvaluationMetrics};

/// How far a viewer's role lets them see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopePolicy {
    SelfOnly,
    Team,
    Global,
}

impl ScopePolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SelfOnly => "Own Records",
            Self::Team => "Team",
            Self::Global => "Organization",
        }
    }
}

impl UserRole {
    /// The scope policy each role resolves to. The role enum is closed, so
    /// there is no branch that could accidentally widen an unknown role to
    /// global scope; unrecognized role strings already failed at parse time.
    pub const fn scope_policy(self) -> ScopePolicy {
        match self {
            UserRole::Admin | UserRole::Hr => ScopePolicy::Global,
            UserRole::Lead => ScopePolicy::Team,
            UserRole::Volunteer => ScopePolicy::SelfOnly,
        }
    }
}

/// Everything a viewer may render: the visible records (already redacted),
/// the visible users, and metrics recomputed over exactly that record set.
#[derive(Debug, Clone)]
pub struct ScopeResolution {
    pub policy: ScopePolicy,
    pub records: Vec<Evaluation>,
    pub users: Vec<User>,
    pub metrics: EvaluationMetrics,
}

/// Strip the confidential payload unless the viewer is the record's subject.
/// The payload is removed wholesale, leaving `details` absent rather than
/// empty, so callers can tell redaction apart from a blank review.
pub fn sanitize(evaluation: &Evaluation, viewer_id: &UserId) -> Evaluation {
    if &evaluation.subject_id == viewer_id {
        return evaluation.clone();
    }
    Evaluation {
        details: None,
        ..evaluation.clone()
    }
}

/// Resolve what `viewer` may see. Pure function of its inputs: nothing is
/// cached between calls, so a permission or membership change is reflected
/// on the next read.
pub fn resolve_scope(
    viewer: &User,
    evaluations: &[Evaluation],
    users: &[User],
    directory: &ProjectDirectory,
) -> ScopeResolution {
    let policy = viewer.role.scope_policy();

    let (records, visible_users) = match policy {
        ScopePolicy::SelfOnly => {
            // A subject always sees their own records in full, and the only
            // visible user is the viewer (the stored record when it exists).
            let records: Vec<Evaluation> = evaluations
                .iter()
                .filter(|evaluation| evaluation.subject_id == viewer.id)
                .cloned()
                .collect();
            let visible_users = vec![users
                .iter()
                .find(|user| user.id == viewer.id)
                .cloned()
                .unwrap_or_else(|| viewer.clone())];
            (records, visible_users)
        }
        ScopePolicy::Team => {
            let scope = directory.team_scope(&viewer.id);
            let records = evaluations
                .iter()
                .filter(|evaluation| scope.contains(&evaluation.subject_id))
                .map(|evaluation| sanitize(evaluation, &viewer.id))
                .collect();
            let visible_users = users
                .iter()
                .filter(|user| scope.contains(&user.id))
                .cloned()
                .collect();
            (records, visible_users)
        }
        ScopePolicy::Global => (evaluations.to_vec(), users.to_vec()),
    };

    // Metrics derive from the scoped, redacted set and nothing else.
    let metrics = compute_metrics(&records);

    ScopeResolution {
        policy,
        records,
        users: visible_users,
        metrics,
    }
}
