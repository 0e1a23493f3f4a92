use serde::Serialize;

use super::domain::{Evaluation, EvaluationStatus};

/// Aggregate metrics over a set of evaluation records. Always computed over
/// an already-scoped and redacted set, so a dashboard number can never leak
/// data the viewer was not entitled to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationMetrics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub completion_rate: f32,
    pub average_score: f32,
    pub risk_evaluations: usize,
}

pub fn compute_metrics(records: &[Evaluation]) -> EvaluationMetrics {
    let total = records.len();
    let mut completed = 0;
    let mut pending = 0;
    let mut overdue = 0;
    for record in records {
        match record.status {
            EvaluationStatus::Completed => completed += 1,
            EvaluationStatus::Pending => pending += 1,
            EvaluationStatus::Overdue => overdue += 1,
            EvaluationStatus::InProgress => {}
        }
    }

    let completion_rate = if total > 0 {
        completed as f32 / total as f32 * 100.0
    } else {
        0.0
    };

    // Absent scores (pending records, redacted payloads) are excluded from
    // the mean, not treated as zero.
    let mut score_sum = 0.0f32;
    let mut score_count = 0usize;
    for record in records {
        if let Some(details) = &record.details {
            if details.overall_score.is_finite() {
                score_sum += details.overall_score;
                score_count += 1;
            }
        }
    }
    let average_score = if score_count > 0 {
        score_sum / score_count as f32
    } else {
        0.0
    };

    EvaluationMetrics {
        total,
        completed,
        pending,
        overdue,
        completion_rate,
        average_score,
        risk_evaluations: overdue + pending,
    }
}
