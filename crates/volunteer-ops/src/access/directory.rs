use std::collections::BTreeSet;

use super::roles::{Project, UserId};

/// Read-only view over project/team membership used to compute team scope.
#[derive(Debug, Clone, Default)]
pub struct ProjectDirectory {
    projects: Vec<Project>,
}

impl ProjectDirectory {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn projects_led_by<'a>(&'a self, lead_id: &'a UserId) -> impl Iterator<Item = &'a Project> {
        self.projects
            .iter()
            .filter(move |project| &project.lead_id == lead_id)
    }

    /// Team scope for a lead: the lead themselves plus every member of every
    /// project they lead. A lead with no projects still sees themselves.
    pub fn team_scope(&self, lead_id: &UserId) -> BTreeSet<UserId> {
        let mut scope = BTreeSet::new();
        scope.insert(lead_id.clone());
        for project in self.projects_led_by(lead_id) {
            scope.extend(project.team_members.iter().cloned());
        }
        scope
    }
}
