//! Material management endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::Result;
use crate::server::state::AppState;
use crate::storage::MaterialStore;
use crate::types::{MaterialListResponse, MaterialSummary};

/// GET /api/materials - List all uploaded materials
pub async fn list_materials(State(state): State<AppState>) -> Json<MaterialListResponse> {
    Json(MaterialListResponse::new(state.materials().list_items()))
}

/// GET /api/materials/:id - Get a material summary
pub async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MaterialSummary>> {
    let id = MaterialStore::parse_id(&id)?;
    state.materials().summary(&id).map(Json)
}

/// DELETE /api/materials/:id - Delete a material, its file, and its
/// cached artifacts
pub async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = MaterialStore::parse_id(&id)?;
    state.remove_material(&id).await?;

    Ok(Json(DeleteResponse {
        success: true,
        message: "Material deleted successfully".to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}
