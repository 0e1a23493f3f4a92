use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for candidates in the recruitment pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The recruitment pipeline stages, in board order. A candidate occupies
/// exactly one stage at a time; rejection stages and `Onboard` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ApplicationReceived,
    HrReview,
    HrInterviewScheduled,
    HrInterviewCompleted,
    AcceptedByHr,
    RejectedByHr,
    PmInterviewScheduled,
    PmInterviewCompleted,
    AcceptedByPm,
    RejectedByPm,
    AcceptedByCandidate,
    RejectedByCandidate,
    OfferSent,
    Onboard,
}

impl Stage {
    pub const fn ordered() -> [Self; 14] {
        [
            Self::ApplicationReceived,
            Self::HrReview,
            Self::HrInterviewScheduled,
            Self::HrInterviewCompleted,
            Self::AcceptedByHr,
            Self::RejectedByHr,
            Self::PmInterviewScheduled,
            Self::PmInterviewCompleted,
            Self::AcceptedByPm,
            Self::RejectedByPm,
            Self::AcceptedByCandidate,
            Self::RejectedByCandidate,
            Self::OfferSent,
            Self::Onboard,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ApplicationReceived => "Application Received",
            Self::HrReview => "Application Accepted/HR Review",
            Self::HrInterviewScheduled => "HR Interview Scheduled",
            Self::HrInterviewCompleted => "HR Interview Completed",
            Self::AcceptedByHr => "Accepted by HR",
            Self::RejectedByHr => "Rejected by HR",
            Self::PmInterviewScheduled => "PM Interview Scheduled",
            Self::PmInterviewCompleted => "PM Interview Completed",
            Self::AcceptedByPm => "Accepted by PM",
            Self::RejectedByPm => "Rejected by PM",
            Self::AcceptedByCandidate => "Accepted by Candidate",
            Self::RejectedByCandidate => "Rejected by Candidate",
            Self::OfferSent => "Offer Sent",
            Self::Onboard => "Onboard",
        }
    }

    pub const fn is_rejection(self) -> bool {
        matches!(
            self,
            Self::RejectedByHr | Self::RejectedByPm | Self::RejectedByCandidate
        )
    }

    /// Rejection stages are absorbing; `Onboard` is the successful terminal.
    pub const fn is_terminal(self) -> bool {
        self.is_rejection() || matches!(self, Self::Onboard)
    }

    /// Tolerant lookup used when stage names arrive as free-form text (wire
    /// payloads, roster exports). Matches the serde token or the display
    /// label, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::ordered().into_iter().find(|stage| {
            stage.label().eq_ignore_ascii_case(&wanted) || stage.token() == wanted
        })
    }

    const fn token(self) -> &'static str {
        match self {
            Self::ApplicationReceived => "application_received",
            Self::HrReview => "hr_review",
            Self::HrInterviewScheduled => "hr_interview_scheduled",
            Self::HrInterviewCompleted => "hr_interview_completed",
            Self::AcceptedByHr => "accepted_by_hr",
            Self::RejectedByHr => "rejected_by_hr",
            Self::PmInterviewScheduled => "pm_interview_scheduled",
            Self::PmInterviewCompleted => "pm_interview_completed",
            Self::AcceptedByPm => "accepted_by_pm",
            Self::RejectedByPm => "rejected_by_pm",
            Self::AcceptedByCandidate => "accepted_by_candidate",
            Self::RejectedByCandidate => "rejected_by_candidate",
            Self::OfferSent => "offer_sent",
            Self::Onboard => "onboard",
        }
    }
}

/// Visa situation of the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolunteerType {
    Regular,
    Cpt,
    Opt,
}

impl VolunteerType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Cpt => "CPT",
            Self::Opt => "OPT",
        }
    }
}

/// Progress of the CPT/OPT paperwork. `NotRequired` whenever the volunteer
/// type is `Regular`; constructors and the roster normalizer enforce this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CptOptStatus {
    NotRequired,
    InProgress,
    Completed,
}

impl CptOptStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotRequired => "Not Required",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

/// Lifecycle of one of the three tracked onboarding documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    NotSent,
    Sent,
    Signed,
}

impl DocumentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotSent => "Not Sent",
            Self::Sent => "Sent",
            Self::Signed => "Signed",
        }
    }
}

/// Status plus optional storage link for a tracked document. Storage itself
/// is an external collaborator; only the metadata lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentState {
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self {
            status: DocumentStatus::NotSent,
            link: None,
        }
    }
}

/// The three named document slots on a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSlot {
    OfferLetter,
    VolunteerAgreement,
    WelcomeLetter,
}

impl DocumentSlot {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OfferLetter => "Offer Letter",
            Self::VolunteerAgreement => "Volunteer Agreement",
            Self::WelcomeLetter => "Welcome Letter",
        }
    }
}

/// Contact details captured at application time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A recruitment candidate. `status` is always a member of [`Stage`];
/// `cpt_opt_status` is `NotRequired` whenever `volunteer_type` is `Regular`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub contact: ContactInfo,
    pub applied_role: String,
    pub team: String,
    pub status: Stage,
    pub volunteer_type: VolunteerType,
    pub cpt_opt_status: CptOptStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr_interview_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_interview_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub offer_letter: DocumentState,
    #[serde(default)]
    pub volunteer_agreement: DocumentState,
    #[serde(default)]
    pub welcome_letter: DocumentState,
    #[serde(default)]
    pub notes: String,
}

impl Candidate {
    /// New candidate entering the board at `Application Received`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        applied_role: impl Into<String>,
        team: impl Into<String>,
        volunteer_type: VolunteerType,
    ) -> Self {
        Self {
            id: CandidateId(id.into()),
            name: name.into(),
            contact: ContactInfo {
                email: email.into(),
                phone: None,
            },
            applied_role: applied_role.into(),
            team: team.into(),
            status: Stage::ApplicationReceived,
            volunteer_type,
            cpt_opt_status: match volunteer_type {
                VolunteerType::Regular => CptOptStatus::NotRequired,
                VolunteerType::Cpt | VolunteerType::Opt => CptOptStatus::InProgress,
            },
            hr_interview_date: None,
            pm_interview_date: None,
            start_date: None,
            end_date: None,
            offer_letter: DocumentState::default(),
            volunteer_agreement: DocumentState::default(),
            welcome_letter: DocumentState::default(),
            notes: String::new(),
        }
    }

    /// Re-establish the CPT/OPT invariant after field-level edits or import.
    pub fn normalize(&mut self) {
        if self.volunteer_type == VolunteerType::Regular {
            self.cpt_opt_status = CptOptStatus::NotRequired;
        } else if self.cpt_opt_status == CptOptStatus::NotRequired {
            self.cpt_opt_status = CptOptStatus::InProgress;
        }
    }

    pub fn document(&self, slot: DocumentSlot) -> &DocumentState {
        match slot {
            DocumentSlot::OfferLetter => &self.offer_letter,
            DocumentSlot::VolunteerAgreement => &self.volunteer_agreement,
            DocumentSlot::WelcomeLetter => &self.welcome_letter,
        }
    }

    pub fn document_mut(&mut self, slot: DocumentSlot) -> &mut DocumentState {
        match slot {
            DocumentSlot::OfferLetter => &mut self.offer_letter,
            DocumentSlot::VolunteerAgreement => &mut self.volunteer_agreement,
            DocumentSlot::WelcomeLetter => &mut self.welcome_letter,
        }
    }

    /// Pending actions derived from the current stage plus paperwork state.
    pub fn to_do(&self) -> Vec<&'static str> {
        let mut items = Vec::new();
        match self.status {
            Stage::ApplicationReceived => items.push("Review application"),
            Stage::HrReview => items.push("Schedule HR interview"),
            Stage::HrInterviewScheduled => items.push("Conduct HR interview"),
            Stage::HrInterviewCompleted => items.push("Record HR decision"),
            Stage::AcceptedByHr => items.push("Schedule PM interview"),
            Stage::PmInterviewScheduled => items.push("Conduct PM interview"),
            Stage::PmInterviewCompleted => items.push("Record PM decision"),
            Stage::AcceptedByPm => items.push("Await candidate confirmation"),
            Stage::AcceptedByCandidate => items.push("Send offer letter"),
            Stage::OfferSent => {
                if self.volunteer_agreement.status != DocumentStatus::Signed {
                    items.push("Collect signed volunteer agreement");
                }
                if self.welcome_letter.status == DocumentStatus::NotSent {
                    items.push("Send welcome letter");
                }
            }
            Stage::Onboard => {
                if self.start_date.is_none() {
                    items.push("Confirm start date");
                }
            }
            Stage::RejectedByHr | Stage::RejectedByPm | Stage::RejectedByCandidate => {}
        }

        if !self.status.is_rejection()
            && self.volunteer_type != VolunteerType::Regular
            && self.cpt_opt_status != CptOptStatus::Completed
        {
            items.push("Collect CPT/OPT documentation");
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_order_starts_at_intake_and_ends_at_onboard() {
        let ordered = Stage::ordered();
        assert_eq!(ordered.len(), 14);
        assert_eq!(ordered[0], Stage::ApplicationReceived);
        assert_eq!(ordered[13], Stage::Onboard);
    }

    #[test]
    fn rejections_and_onboard_are_terminal() {
        assert!(Stage::RejectedByHr.is_terminal());
        assert!(Stage::RejectedByPm.is_terminal());
        assert!(Stage::RejectedByCandidate.is_terminal());
        assert!(Stage::Onboard.is_terminal());
        assert!(!Stage::Onboard.is_rejection());
        assert!(!Stage::OfferSent.is_terminal());
    }

    #[test]
    fn stage_parse_accepts_labels_and_tokens() {
        assert_eq!(
            Stage::parse("HR Interview Scheduled"),
            Some(Stage::HrInterviewScheduled)
        );
        assert_eq!(Stage::parse("offer_sent"), Some(Stage::OfferSent));
        assert_eq!(
            Stage::parse("  application accepted/hr review "),
            Some(Stage::HrReview)
        );
        assert_eq!(Stage::parse("shortlisted"), None);
    }

    #[test]
    fn regular_volunteers_never_carry_cpt_opt_paperwork() {
        let candidate = Candidate::new(
            "cand-1",
            "Dana Petrov",
            "dana@example.org",
            "Designer",
            "Outreach",
            VolunteerType::Regular,
        );
        assert_eq!(candidate.cpt_opt_status, CptOptStatus::NotRequired);

        let mut edited = candidate;
        edited.cpt_opt_status = CptOptStatus::InProgress;
        edited.normalize();
        assert_eq!(edited.cpt_opt_status, CptOptStatus::NotRequired);
    }

    #[test]
    fn to_do_tracks_stage_and_paperwork() {
        let mut candidate = Candidate::new(
            "cand-2",
            "Ming Zhao",
            "ming@example.org",
            "Data Analyst",
            "Insights",
            VolunteerType::Cpt,
        );
        assert_eq!(
            candidate.to_do(),
            vec!["Review application", "Collect CPT/OPT documentation"]
        );

        candidate.status = Stage::OfferSent;
        candidate.cpt_opt_status = CptOptStatus::Completed;
        assert_eq!(
            candidate.to_do(),
            vec!["Collect signed volunteer agreement", "Send welcome letter"]
        );

        candidate.volunteer_agreement.status = DocumentStatus::Signed;
        candidate.welcome_letter.status = DocumentStatus::Sent;
        assert!(candidate.to_do().is_empty());

        candidate.status = Stage::RejectedByPm;
        assert!(candidate.to_do().is_empty());
    }
}
