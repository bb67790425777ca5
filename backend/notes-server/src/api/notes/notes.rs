//! Note REST API handlers
//!
//! Every query is scoped to the authorized user. A note owned by someone else
//! is indistinguishable from a missing one.

use crate::{
    ApiError, ApiResult, AppState, CreateNoteRequest, CurrentUser, JsonBody, NoteDto,
    NoteId, NoteListResponse, NoteResponse, UpdateNoteRequest,
};

use notes_core::{FieldValidator, Note};
use notes_db::{DbError, NoteRepository};

use axum::{Json, extract::State, http::StatusCode};

const NOTE_NOT_FOUND: &str = "Note does not exist";

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteResponse>)> {
    let limits = &state.validation;
    let title = FieldValidator::required_text(
        req.title.as_deref(),
        "title",
        limits.min_title_length,
        limits.max_title_length,
    )?;

    let note = Note::new(user.id, title, req.description);

    let repo = NoteRepository::new(state.pool.clone());
    repo.create(&note)
        .await
        .map_err(|e| duplicate_title(e, &note.title))?;

    log::info!("User {} created note {}", user.id, note.id);

    Ok((
        StatusCode::CREATED,
        Json(NoteResponse {
            success: true,
            status_code: StatusCode::CREATED.as_u16(),
            message: Some("A new note has been created".to_string()),
            note: note.into(),
        }),
    ))
}

/// GET /api/notes
pub async fn list_notes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<NoteListResponse>> {
    let repo = NoteRepository::new(state.pool.clone());
    let notes = repo.list_for_user(user.id).await?;

    Ok(Json(NoteListResponse {
        success: true,
        status_code: StatusCode::OK.as_u16(),
        total_results: notes.len(),
        notes: notes.into_iter().map(NoteDto::from).collect(),
    }))
}

/// GET /api/notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    NoteId(id): NoteId,
) -> ApiResult<Json<NoteResponse>> {
    let repo = NoteRepository::new(state.pool.clone());
    let note = repo
        .find_for_user(id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOTE_NOT_FOUND))?;

    Ok(Json(NoteResponse {
        success: true,
        status_code: StatusCode::OK.as_u16(),
        message: None,
        note: note.into(),
    }))
}

/// PUT /api/notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    NoteId(id): NoteId,
    JsonBody(req): JsonBody<UpdateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    let limits = &state.validation;
    let title = FieldValidator::optional_text(
        req.title.as_deref(),
        "title",
        limits.min_title_length,
        limits.max_title_length,
    )?;

    let repo = NoteRepository::new(state.pool.clone());
    let mut note = repo
        .find_for_user(id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOTE_NOT_FOUND))?;

    note.apply_update(title, req.description);

    let updated = repo
        .update_for_user(&note)
        .await
        .map_err(|e| duplicate_title(e, &note.title))?;
    if !updated {
        // Deleted between the read and the write
        return Err(ApiError::not_found(NOTE_NOT_FOUND));
    }

    Ok(Json(NoteResponse {
        success: true,
        status_code: StatusCode::OK.as_u16(),
        message: Some("Note has been updated!".to_string()),
        note: note.into(),
    }))
}

/// DELETE /api/notes/{id}
///
/// Returns the deleted note.
pub async fn delete_note(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    NoteId(id): NoteId,
) -> ApiResult<Json<NoteResponse>> {
    let repo = NoteRepository::new(state.pool.clone());
    let note = repo
        .find_for_user(id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOTE_NOT_FOUND))?;

    if !repo.delete_for_user(id, user.id).await? {
        return Err(ApiError::not_found(NOTE_NOT_FOUND));
    }

    log::info!("User {} deleted note {}", user.id, id);

    Ok(Json(NoteResponse {
        success: true,
        status_code: StatusCode::OK.as_u16(),
        message: Some("Note has been deleted!".to_string()),
        note: note.into(),
    }))
}

// =============================================================================
// Helpers
// =============================================================================

#[track_caller]
fn duplicate_title(error: DbError, title: &str) -> ApiError {
    match error {
        DbError::UniqueViolation { field, .. } => ApiError::duplicate(&field, title),
        other => ApiError::from(other),
    }
}
