//! Shared role, permission, and team-membership model.
//!
//! Every mutating operation in the workflows consults [`permissions`] before
//! touching a record, and every read surface resolves its scope through the
//! closed [`roles::UserRole`] enum. Role strings from the outside world parse
//! through that enum and fail closed on anything unrecognized.

pub mod directory;
pub mod permissions;
pub mod roles;

pub use directory::ProjectDirectory;
pub use permissions::{
    check_permission, ensure_permission, AccessError, Capability, PermissionSet,
};
pub use roles::{Project, ProjectId, Session, User, UserId, UserProfile, UserRole};

use axum::http::HeaderMap;

/// Build the caller identity from request headers. This is a stand-in for a
/// real authenticated-session collaborator: the headers carry whatever that
/// provider resolved, and anything missing or unrecognized fails closed.
pub fn session_from_headers(headers: &HeaderMap) -> Result<Session, AccessError> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or(AccessError::MissingSession)?;
    let role = headers
        .get("x-user-role")
        .and_then(|value| value.to_str().ok())
        .ok_or(AccessError::MissingSession)?;
    Session::from_parts(user_id, role)
}
