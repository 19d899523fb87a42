//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use lesson_core::ports::{InteractionRecord, PortError};
use lesson_core::state::ComponentsState;
use lesson_core::{import_lesson, NoRunner, NoopFeedback, PlaybackSession};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        get_lesson_handler,
        put_lesson_handler,
        get_interaction_handler,
        save_interaction_handler,
        list_user_lessons_handler,
    ),
    components(
        schemas(SaveInteractionRequest, SaveInteractionResponse)
    ),
    tags(
        (name = "Lesson API", description = "Endpoints for lesson playback, authoring uploads and saved progress.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Payload Structs
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonQuery {
    pub user_id: Option<Uuid>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionQuery {
    pub user_id: Uuid,
    pub lesson_id: String,
}

/// A snapshot of one session's component states, pushed by the viewer.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveInteractionRequest {
    pub user_id: Uuid,
    pub lesson_id: String,
    #[schema(value_type = Object)]
    pub components_state: ComponentsState,
}

/// The stored outcome, with the score re-derived server-side.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveInteractionResponse {
    pub success: bool,
    pub score: u32,
    pub total_possible: u32,
    pub completed: bool,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Fetch a lesson for playback.
///
/// With a `userId` query parameter, the caller's saved progress (if any) is
/// returned alongside the lesson so the viewer can resume.
#[utoipa::path(
    get,
    path = "/lessons/{id}",
    params(
        ("id" = String, Path, description = "The lesson id."),
        ("userId" = Option<Uuid>, Query, description = "Return this user's saved progress too.")
    ),
    responses(
        (status = 200, description = "The lesson, with the user's interaction record when present"),
        (status = 404, description = "No such lesson"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_lesson_handler(
    State(app_state): State<Arc<AppState>>,
    Path(lesson_id): Path<String>,
    Query(query): Query<LessonQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let result = app_state
        .lessons
        .get_lesson_with_interaction(&lesson_id, query.user_id)
        .await
        .map_err(port_error_response)?;
    Ok(Json(result))
}

/// Upload (or replace) a lesson document.
///
/// The body is a lesson file exactly as the builder exports it. A document
/// failing validation is rejected wholesale and nothing is stored.
#[utoipa::path(
    put,
    path = "/lessons/{id}",
    params(("id" = String, Path, description = "The lesson id; must match the document.")),
    request_body(content_type = "application/json", description = "The lesson document."),
    responses(
        (status = 204, description = "Lesson stored"),
        (status = 400, description = "The document failed validation"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn put_lesson_handler(
    State(app_state): State<Arc<AppState>>,
    Path(lesson_id): Path<String>,
    body: String,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let lesson = import_lesson(&body).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    if lesson.id != lesson_id {
        return Err((
            StatusCode::BAD_REQUEST,
            format!(
                "lesson id '{}' does not match the request path '{}'",
                lesson.id, lesson_id
            ),
        ));
    }
    app_state
        .lessons
        .put_lesson(&lesson)
        .await
        .map_err(port_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch one user's saved progress for one lesson.
#[utoipa::path(
    get,
    path = "/interactions",
    params(
        ("userId" = Uuid, Query, description = "The user."),
        ("lessonId" = String, Query, description = "The lesson.")
    ),
    responses(
        (status = 200, description = "The interaction record"),
        (status = 404, description = "The user has no saved progress for this lesson"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_interaction_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<InteractionQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let record = app_state
        .interactions
        .get_interaction(query.user_id, &query.lesson_id)
        .await
        .map_err(port_error_response)?
        .ok_or((StatusCode::NOT_FOUND, "Not found".to_string()))?;
    Ok(Json(record))
}

/// Save a session snapshot.
///
/// The score, total and completion flag are re-derived here from the lesson
/// and the submitted component states, so the stored record never depends on
/// client-side arithmetic.
#[utoipa::path(
    post,
    path = "/interactions",
    request_body = SaveInteractionRequest,
    responses(
        (status = 200, description = "Snapshot stored", body = SaveInteractionResponse),
        (status = 404, description = "The referenced lesson does not exist"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn save_interaction_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<SaveInteractionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let lesson = app_state
        .lessons
        .get_lesson(&request.lesson_id)
        .await
        .map_err(port_error_response)?;

    // Resuming a throwaway session adopts the submitted states, drops any
    // that no longer match the lesson, and replays the score.
    let submitted = InteractionRecord {
        user_id: request.user_id,
        lesson_id: request.lesson_id,
        components_state: request.components_state,
        completed: false,
        score: 0,
        total_possible: 0,
        last_updated: chrono::Utc::now(),
    };
    let seed = Uuid::new_v4().as_u128() as u64;
    let session = PlaybackSession::resume(
        lesson,
        submitted,
        seed,
        Arc::new(NoRunner),
        Arc::new(NoopFeedback),
    );
    let record = session.to_record();

    app_state
        .interactions
        .upsert_interaction(&record)
        .await
        .map_err(port_error_response)?;

    Ok(Json(SaveInteractionResponse {
        success: true,
        score: record.score,
        total_possible: record.total_possible,
        completed: record.completed,
    }))
}

/// List the lessons a user has opened, with progress and score.
#[utoipa::path(
    get,
    path = "/users/{userId}/lessons",
    params(("userId" = Uuid, Path, description = "The user.")),
    responses(
        (status = 200, description = "The user's lessons, most recently opened first"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_user_lessons_handler(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let summaries = app_state
        .user_index
        .list_lessons_for_user(user_id)
        .await
        .map_err(port_error_response)?;
    Ok(Json(summaries))
}

/// Maps a port failure onto the HTTP status it means at this boundary.
/// "Lesson not found" and "no saved progress" stay distinct: the latter never
/// reaches this function because the port encodes it as `Ok(None)`.
fn port_error_response(error: PortError) -> (StatusCode, String) {
    match error {
        PortError::NotFound(reason) => (StatusCode::NOT_FOUND, reason),
        PortError::Validation(reason) => (StatusCode::BAD_REQUEST, reason),
        PortError::Unexpected(reason) => {
            error!("store failure: {reason}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}
