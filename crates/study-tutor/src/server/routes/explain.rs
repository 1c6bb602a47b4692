//! Explanation endpoints

use axum::{extract::State, Json};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::storage::MaterialStore;
use crate::types::{
    AnswerResponse, ApproachesRequest, ApproachesResponse, AskRequest, SimplerRequest,
    SimplerResponse,
};
use crate::validation::{sanitize_text, validate_level};

/// POST /api/ask - Ask a question, optionally grounded in a material
pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AnswerResponse>> {
    let level = validate_level(&request.level);

    let question = sanitize_text(&request.question, 1000);
    if question.is_empty() {
        return Err(Error::validation("Question cannot be empty"));
    }

    // A material id that does not resolve is ignored; the question is
    // answered without context
    let context = request
        .material_id
        .as_deref()
        .and_then(|id| MaterialStore::parse_id(id).ok())
        .and_then(|id| state.materials().full_text(&id).ok());

    tracing::info!("Question: \"{}\"", question);

    let response = state
        .explainer()
        .explain_concept(&question, context.as_deref(), level.as_str())
        .await?;

    Ok(Json(response))
}

/// POST /api/explain-simpler - Re-explain a previous answer more simply
pub async fn explain_simpler(
    State(state): State<AppState>,
    Json(request): Json<SimplerRequest>,
) -> Result<Json<SimplerResponse>> {
    let response = state
        .explainer()
        .explain_simpler(&request.original_explanation, &request.question)
        .await?;

    Ok(Json(response))
}

/// POST /api/approaches - Explain a concept three different ways
pub async fn multiple_approaches(
    State(state): State<AppState>,
    Json(request): Json<ApproachesRequest>,
) -> Result<Json<ApproachesResponse>> {
    let concept = sanitize_text(&request.concept, 500);
    if concept.is_empty() {
        return Err(Error::validation("Concept cannot be empty"));
    }

    let response = state.explainer().multiple_approaches(&concept).await?;

    Ok(Json(response))
}
