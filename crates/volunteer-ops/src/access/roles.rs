use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::permissions::AccessError;

/// Identifier wrapper for portal users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// The closed set of portal roles. Anything outside this set must fail
/// closed at the parse boundary; no role string maps to global scope by
/// accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Hr,
    Lead,
    Volunteer,
}

impl UserRole {
    pub const fn ordered() -> [Self; 4] {
        [Self::Admin, Self::Hr, Self::Lead, Self::Volunteer]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Hr => "HR",
            Self::Lead => "Project Lead",
            Self::Volunteer => "Volunteer",
        }
    }
}

impl FromStr for UserRole {
    type Err = AccessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "hr" => Ok(Self::Hr),
            "lead" => Ok(Self::Lead),
            "volunteer" => Ok(Self::Volunteer),
            _ => Err(AccessError::UnknownRole {
                value: value.to_string(),
            }),
        }
    }
}

/// Optional descriptive fields attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// A portal user: identity plus the role that selects their scope policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

impl User {
    pub fn new(id: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: UserId(id.into()),
            role,
            profile: None,
        }
    }

    pub fn with_profile(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.profile = Some(UserProfile {
            name: name.into(),
            email: email.into(),
        });
        self
    }
}

/// A project: the lead id plus the member list define its team scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub lead_id: UserId,
    pub team_members: Vec<UserId>,
}

/// Explicit identity object passed by the caller into every scoped read and
/// gated mutation. The core never reads ambient session state; the HTTP
/// layer constructs this from its own authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: UserId(user_id.into()),
            role,
        }
    }

    /// Build a session from untrusted string parts, failing closed when the
    /// role is not a member of the closed role set.
    pub fn from_parts(user_id: &str, role: &str) -> Result<Self, AccessError> {
        Ok(Self {
            user_id: UserId(user_id.trim().to_string()),
            role: role.parse()?,
        })
    }
}
