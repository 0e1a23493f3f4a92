use crate::workflows::recruitment::domain::{CptOptStatus, Stage, VolunteerType};

/// Map a normalized status cell onto the stage enum. Accepts the board
/// labels plus the shorthand spellings that show up in real exports.
pub(crate) fn stage_for_normalized(value: &str) -> Option<Stage> {
    if let Some(stage) = Stage::parse(value) {
        return Some(stage);
    }
    match value {
        "applied" | "new application" => Some(Stage::ApplicationReceived),
        "hr review" | "application accepted" => Some(Stage::HrReview),
        "hr interview" => Some(Stage::HrInterviewScheduled),
        "pm interview" => Some(Stage::PmInterviewScheduled),
        "offer" => Some(Stage::OfferSent),
        "onboarded" | "active" => Some(Stage::Onboard),
        _ => None,
    }
}

pub(crate) fn volunteer_type_for_normalized(value: &str) -> Option<VolunteerType> {
    match value {
        "regular" => Some(VolunteerType::Regular),
        "cpt" => Some(VolunteerType::Cpt),
        "opt" => Some(VolunteerType::Opt),
        _ => None,
    }
}

pub(crate) fn cpt_opt_status_for_normalized(value: &str) -> Option<CptOptStatus> {
    match value {
        "not required" | "no required" | "n/a" => Some(CptOptStatus::NotRequired),
        "in progress" | "pending" => Some(CptOptStatus::InProgress),
        "completed" | "done" => Some(CptOptStatus::Completed),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn stage_lookup_for_tests(value: &str) -> Option<Stage> {
    stage_for_normalized(&super::normalizer::normalize_field(value))
}
