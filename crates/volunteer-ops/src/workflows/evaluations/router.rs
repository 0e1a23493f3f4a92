use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use crate::access::{session_from_headers, AccessError, ProjectDirectory, User};

use super::store::OrgDirectory;
use super::views::DashboardView;
use super::visibility::resolve_scope;

/// Router exposing the role-scoped evaluation dashboard.
pub fn dashboard_router<D>(directory: Arc<D>) -> Router
where
    D: OrgDirectory + 'static,
{
    Router::new()
        .route(
            "/api/v1/evaluations/dashboard",
            get(dashboard_handler::<D>),
        )
        .with_state(directory)
}

pub(crate) async fn dashboard_handler<D>(
    State(directory): State<Arc<D>>,
    headers: HeaderMap,
) -> Response
where
    D: OrgDirectory + 'static,
{
    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(error) => {
            let status = match &error {
                AccessError::MissingSession => StatusCode::UNAUTHORIZED,
                _ => StatusCode::FORBIDDEN,
            };
            let payload = json!({ "error": error.to_string() });
            return (status, axum::Json(payload)).into_response();
        }
    };

    let loaded = directory.users().and_then(|users| {
        let projects = directory.projects()?;
        let evaluations = directory.evaluations()?;
        Ok((users, projects, evaluations))
    });
    let (users, projects, evaluations) = match loaded {
        Ok(loaded) => loaded,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
        }
    };

    // The session is the authority on the viewer's role; the stored profile
    // only decorates the response.
    let viewer = User {
        id: session.user_id.clone(),
        role: session.role,
        profile: users
            .iter()
            .find(|user| user.id == session.user_id)
            .and_then(|user| user.profile.clone()),
    };

    let resolution = resolve_scope(
        &viewer,
        &evaluations,
        &users,
        &ProjectDirectory::new(projects),
    );
    let view = DashboardView::from_resolution(viewer.id, &resolution);
    (StatusCode::OK, axum::Json(view)).into_response()
}
