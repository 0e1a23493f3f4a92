use crate::access::{Project, User};

use super::domain::Evaluation;

/// Read seam over the organization dataset the dashboard resolves scope
/// against. The hosting service supplies the implementation; tests use an
/// in-memory fake.
pub trait OrgDirectory: Send + Sync {
    fn users(&self) -> Result<Vec<User>, DirectoryError>;
    fn projects(&self) -> Result<Vec<Project>, DirectoryError>;
    fn evaluations(&self) -> Result<Vec<Evaluation>, DirectoryError>;
}

/// Error enumeration for directory reads.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("organization directory unavailable: {0}")]
    Unavailable(String),
}
