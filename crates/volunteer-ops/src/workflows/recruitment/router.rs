use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::access::{session_from_headers, AccessError};

use super::domain::{Candidate, CandidateId, DocumentSlot, Stage, VolunteerType};
use super::pipeline::{
    next_candidate_id, CandidateUpdate, MoveRequest, PipelineError, PipelineService,
    PipelineServiceError, StatusPersistence,
};
use super::views::{BoardView, CandidateView, MoveOutcomeView};

/// Router exposing the recruitment board and its gated mutations.
pub fn board_router<P>(service: Arc<PipelineService<P>>) -> Router
where
    P: StatusPersistence + 'static,
{
    Router::new()
        .route("/api/v1/recruitment/board", get(board_handler::<P>))
        .route("/api/v1/recruitment/board/move", post(move_handler::<P>))
        .route(
            "/api/v1/recruitment/candidates",
            post(add_candidate_handler::<P>),
        )
        .route(
            "/api/v1/recruitment/candidates/:candidate_id",
            patch(update_candidate_handler::<P>),
        )
        .route(
            "/api/v1/recruitment/candidates/:candidate_id/documents",
            post(attach_document_handler::<P>),
        )
        .with_state(service)
}

/// Move payload as it arrives off the wire: stage names are free text here
/// and only become `Stage` values if they parse.
#[derive(Debug, Deserialize)]
pub(crate) struct MoveRequestBody {
    candidate_id: String,
    from_stage: String,
    to_stage: String,
    target_index: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewCandidateBody {
    name: String,
    email: String,
    #[serde(default)]
    phone: Option<String>,
    applied_role: String,
    team: String,
    volunteer_type: VolunteerType,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttachDocumentBody {
    slot: DocumentSlot,
    link: String,
}

fn parse_stage(value: &str) -> Result<Stage, PipelineError> {
    Stage::parse(value).ok_or_else(|| PipelineError::InvalidTransitionTarget {
        value: value.to_string(),
    })
}

fn pipeline_error_response(error: PipelineError) -> Response {
    let status = match &error {
        PipelineError::InvalidTransitionTarget { .. }
        | PipelineError::InvalidTargetIndex { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::StaleSourceStage { .. } | PipelineError::DuplicateCandidate(_) => {
            StatusCode::CONFLICT
        }
        PipelineError::UnknownCandidate(_) => StatusCode::NOT_FOUND,
        PipelineError::PersistenceFailed(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn access_error_response(error: AccessError) -> Response {
    let status = match &error {
        AccessError::MissingSession => StatusCode::UNAUTHORIZED,
        AccessError::UnknownRole { .. } | AccessError::PermissionDenied { .. } => {
            StatusCode::FORBIDDEN
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn service_error_response(error: PipelineServiceError) -> Response {
    match error {
        PipelineServiceError::Access(error) => access_error_response(error),
        PipelineServiceError::Pipeline(error) => pipeline_error_response(error),
    }
}

pub(crate) async fn board_handler<P>(State(service): State<Arc<PipelineService<P>>>) -> Response
where
    P: StatusPersistence + 'static,
{
    let view = service.with_board(BoardView::from_board);
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn move_handler<P>(
    State(service): State<Arc<PipelineService<P>>>,
    axum::Json(body): axum::Json<MoveRequestBody>,
) -> Response
where
    P: StatusPersistence + 'static,
{
    let request = match (parse_stage(&body.from_stage), parse_stage(&body.to_stage)) {
        (Ok(from_stage), Ok(to_stage)) => MoveRequest {
            candidate_id: CandidateId(body.candidate_id),
            from_stage,
            to_stage,
            target_index: body.target_index,
        },
        (Err(error), _) | (_, Err(error)) => return pipeline_error_response(error),
    };

    match service.move_candidate(request).await {
        Ok(outcome) => {
            let view = MoveOutcomeView::from_outcome(&outcome);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => pipeline_error_response(error),
    }
}

pub(crate) async fn add_candidate_handler<P>(
    State(service): State<Arc<PipelineService<P>>>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<NewCandidateBody>,
) -> Response
where
    P: StatusPersistence + 'static,
{
    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(error) => return access_error_response(error),
    };

    let mut candidate = Candidate::new(
        next_candidate_id().0,
        body.name,
        body.email,
        body.applied_role,
        body.team,
        body.volunteer_type,
    );
    candidate.contact.phone = body.phone;
    candidate.notes = body.notes.unwrap_or_default();

    match service.add_candidate(&session, candidate) {
        Ok(stored) => (
            StatusCode::CREATED,
            axum::Json(CandidateView::from_candidate(&stored)),
        )
            .into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn update_candidate_handler<P>(
    State(service): State<Arc<PipelineService<P>>>,
    Path(candidate_id): Path<String>,
    headers: HeaderMap,
    axum::Json(update): axum::Json<CandidateUpdate>,
) -> Response
where
    P: StatusPersistence + 'static,
{
    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(error) => return access_error_response(error),
    };

    match service.update_candidate(&session, &CandidateId(candidate_id), update) {
        Ok(updated) => (
            StatusCode::OK,
            axum::Json(CandidateView::from_candidate(&updated)),
        )
            .into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn attach_document_handler<P>(
    State(service): State<Arc<PipelineService<P>>>,
    Path(candidate_id): Path<String>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<AttachDocumentBody>,
) -> Response
where
    P: StatusPersistence + 'static,
{
    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(error) => return access_error_response(error),
    };

    match service.attach_document(&session, &CandidateId(candidate_id), body.slot, body.link) {
        Ok(updated) => (
            StatusCode::OK,
            axum::Json(CandidateView::from_candidate(&updated)),
        )
            .into_response(),
        Err(error) => service_error_response(error),
    }
}
