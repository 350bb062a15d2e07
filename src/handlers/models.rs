//! Model catalog handlers

use axum::{extract::Path, Json};

use crate::prediction::{ModelDescriptor, ModelRegistry};
use crate::AppResult;

/// Models ranked best first
pub async fn list() -> Json<Vec<&'static ModelDescriptor>> {
    Json(ModelRegistry.leaderboard())
}

/// Get single model
pub async fn get(Path(key): Path<String>) -> AppResult<Json<&'static ModelDescriptor>> {
    let descriptor = ModelRegistry.lookup(&key)?;
    Ok(Json(descriptor))
}
