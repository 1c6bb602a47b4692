//! Generated-artifact endpoints: study notes and practice quizzes

use axum::{extract::State, Json};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::storage::{ArtifactCache, MaterialStore};
use crate::types::{NotesRequest, NotesResponse, QuizRequest, QuizResponse};
use crate::validation::{
    validate_difficulty, validate_focus, validate_level, validate_num_questions,
};

/// POST /api/notes - Generate study notes for a material
///
/// Notes are cached per (material, subject, level, focus); repeat
/// requests with the same parameters return the cached artifact without
/// another LLM round trip.
pub async fn generate_notes(
    State(state): State<AppState>,
    Json(request): Json<NotesRequest>,
) -> Result<Json<NotesResponse>> {
    // Out-of-set parameters fall back to defaults instead of failing
    let level = validate_level(&request.level);
    let focus = validate_focus(&request.focus);

    let id = MaterialStore::parse_id(&request.material_id)?;
    let content = state.materials().full_text(&id)?;
    if content.is_empty() {
        return Err(Error::validation("No content found in material"));
    }

    tracing::info!("Generating notes for material: {}", id);

    let key = ArtifactCache::notes_key(&id, request.subject.as_deref(), level.as_str(), focus.as_str());
    let generator = state.note_generator();
    let response = state
        .artifacts()
        .get_or_compute(&key, id, || async {
            generator
                .generate(&content, request.subject.as_deref(), level.as_str(), focus.as_str())
                .await
        })
        .await?;

    Ok(Json(response))
}

/// POST /api/quiz - Generate a practice quiz for a material
pub async fn generate_quiz(
    State(state): State<AppState>,
    Json(request): Json<QuizRequest>,
) -> Result<Json<QuizResponse>> {
    let num_questions = validate_num_questions(request.num_questions);
    let difficulty = validate_difficulty(&request.difficulty);

    let id = MaterialStore::parse_id(&request.material_id)?;
    let content = state.materials().full_text(&id)?;
    if content.is_empty() {
        return Err(Error::validation("No content found in material"));
    }

    tracing::info!("Generating quiz for material: {}", id);

    let response = state
        .quiz_generator()
        .generate(&content, request.subject.as_deref(), num_questions, difficulty)
        .await?;

    Ok(Json(response))
}
