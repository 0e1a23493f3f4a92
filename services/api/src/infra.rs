use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::debug;

use volunteer_ops::access::{Project, ProjectId, User, UserId, UserRole};
use volunteer_ops::workflows::evaluations::{
    DirectoryError, Evaluation, EvaluationDetails, EvaluationKind, EvaluationStatus, OrgDirectory,
};
use volunteer_ops::workflows::recruitment::{
    Candidate, CandidateId, PersistenceError, Stage, StatusPersistence, VolunteerType,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stand-in for the portal's real persistence backend: accepts every stage
/// change and keeps a log so demos can show what would have been written.
#[derive(Default)]
pub(crate) struct InMemoryStatusPersistence {
    log: Mutex<Vec<(CandidateId, Stage)>>,
}

impl InMemoryStatusPersistence {
    pub(crate) fn log(&self) -> Vec<(CandidateId, Stage)> {
        self.log.lock().expect("persistence mutex poisoned").clone()
    }
}

#[async_trait]
impl StatusPersistence for InMemoryStatusPersistence {
    async fn persist_status_change(
        &self,
        candidate_id: &CandidateId,
        stage: Stage,
    ) -> Result<(), PersistenceError> {
        debug!(candidate = %candidate_id, stage = stage.label(), "recording status change");
        self.log
            .lock()
            .expect("persistence mutex poisoned")
            .push((candidate_id.clone(), stage));
        Ok(())
    }
}

/// In-memory organization dataset backing the dashboard endpoints.
pub(crate) struct InMemoryOrgDirectory {
    users: Mutex<Vec<User>>,
    projects: Mutex<Vec<Project>>,
    evaluations: Mutex<Vec<Evaluation>>,
}

impl InMemoryOrgDirectory {
    pub(crate) fn new(
        users: Vec<User>,
        projects: Vec<Project>,
        evaluations: Vec<Evaluation>,
    ) -> Self {
        Self {
            users: Mutex::new(users),
            projects: Mutex::new(projects),
            evaluations: Mutex::new(evaluations),
        }
    }
}

impl OrgDirectory for InMemoryOrgDirectory {
    fn users(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.users.lock().expect("directory mutex poisoned").clone())
    }

    fn projects(&self) -> Result<Vec<Project>, DirectoryError> {
        Ok(self
            .projects
            .lock()
            .expect("directory mutex poisoned")
            .clone())
    }

    fn evaluations(&self) -> Result<Vec<Evaluation>, DirectoryError> {
        Ok(self
            .evaluations
            .lock()
            .expect("directory mutex poisoned")
            .clone())
    }
}

fn uid(value: &str) -> UserId {
    UserId(value.to_string())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// Representative board for demos and a freshly started service.
pub(crate) fn seed_candidates() -> Vec<Candidate> {
    let mut ana = Candidate::new(
        "cand-000101",
        "Ana Ruiz",
        "ana@example.org",
        "Web Developer",
        "Platform",
        VolunteerType::Regular,
    );
    ana.status = Stage::HrInterviewScheduled;
    ana.hr_interview_date = Some(date(2026, 8, 12));

    let mut ben = Candidate::new(
        "cand-000102",
        "Ben Osei",
        "ben@example.org",
        "Data Analyst",
        "Insights",
        VolunteerType::Cpt,
    );
    ben.status = Stage::HrInterviewScheduled;
    ben.hr_interview_date = Some(date(2026, 8, 13));

    let mut cleo = Candidate::new(
        "cand-000103",
        "Cleo Marsh",
        "cleo@example.org",
        "Designer",
        "Outreach",
        VolunteerType::Regular,
    );
    cleo.status = Stage::AcceptedByHr;

    let dana = Candidate::new(
        "cand-000104",
        "Dana Petrov",
        "dana@example.org",
        "Volunteer Coordinator",
        "Outreach",
        VolunteerType::Regular,
    );

    vec![ana, ben, cleo, dana]
}

pub(crate) fn seed_users() -> Vec<User> {
    vec![
        User::new("admin-1", UserRole::Admin).with_profile("Avery Quinn", "avery@example.org"),
        User::new("hr-1", UserRole::Hr).with_profile("Harper Diaz", "harper@example.org"),
        User::new("lead-1", UserRole::Lead).with_profile("Lena Voss", "lena@example.org"),
        User::new("vol-a", UserRole::Volunteer).with_profile("Noor Haddad", "noor@example.org"),
        User::new("vol-b", UserRole::Volunteer).with_profile("Ming Zhao", "ming@example.org"),
        User::new("vol-c", UserRole::Volunteer).with_profile("Kim Park", "kim@example.org"),
    ]
}

pub(crate) fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId("proj-kitchen".to_string()),
            name: "Community Kitchen".to_string(),
            lead_id: uid("lead-1"),
            team_members: vec![uid("vol-a"), uid("vol-b")],
        },
        Project {
            id: ProjectId("proj-tutoring".to_string()),
            name: "Tutoring Network".to_string(),
            lead_id: uid("lead-2"),
            team_members: vec![uid("vol-c")],
        },
    ]
}

pub(crate) fn seed_evaluations() -> Vec<Evaluation> {
    let completed = |id: &str, subject: &str, score: f32| {
        Evaluation::completed(
            id,
            uid(subject),
            uid("hr-1"),
            "2026-q2",
            EvaluationKind::Quarterly,
            date(2026, 6, 30),
            date(2026, 6, 22),
            EvaluationDetails {
                overall_score: score,
                criteria_scores: [
                    ("collaboration".to_string(), score),
                    ("reliability".to_string(), score - 0.5),
                ]
                .into_iter()
                .collect(),
                feedback_text: "consistent and dependable".to_string(),
                strengths: vec!["communication".to_string()],
                improvement_areas: vec!["delegation".to_string()],
                achievements: vec!["organized the summer drive".to_string()],
                challenges: vec!["schedule conflicts".to_string()],
                goals_next_period: vec!["mentor a new volunteer".to_string()],
                recommended_training: vec!["first aid refresher".to_string()],
            },
        )
    };

    vec![
        completed("eval-2001", "lead-1", 4.0),
        completed("eval-2002", "vol-a", 4.5),
        Evaluation::scheduled(
            "eval-2003",
            uid("vol-b"),
            uid("lead-1"),
            "2026-q2",
            EvaluationKind::Quarterly,
            EvaluationStatus::Pending,
            date(2026, 9, 15),
        ),
        Evaluation::scheduled(
            "eval-2004",
            uid("vol-c"),
            uid("lead-2"),
            "2026-q2",
            EvaluationKind::Probationary,
            EvaluationStatus::Overdue,
            date(2026, 7, 15),
        ),
    ]
}

pub(crate) fn seed_directory() -> InMemoryOrgDirectory {
    InMemoryOrgDirectory::new(seed_users(), seed_projects(), seed_evaluations())
}
