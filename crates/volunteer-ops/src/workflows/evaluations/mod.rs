//! Evaluation records and the visibility engine that decides, per viewer,
//! which records are in scope and which confidential fields must be absent
//! before anything leaves this module.

pub mod domain;
pub mod metrics;
pub mod router;
pub mod store;
pub mod views;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use domain::{
    Evaluation, EvaluationDetails, EvaluationId, EvaluationKind, EvaluationStatus, PeriodId,
};
pub use metrics::{compute_metrics, EvaluationMetrics};
pub use router::dashboard_router;
pub use store::{DirectoryError, OrgDirectory};
pub use views::{DashboardView, EvaluationView, UserView};
pub use visibility::{resolve_scope, sanitize, ScopePolicy, ScopeResolution};
