use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::RoastError,
    roast::Roaster,
    types::{RoastReport, RoastRequest},
};

#[derive(Clone)]
pub struct AppState {
    pub roaster: Arc<Roaster>,
}

/// `POST /api/roast` with `{"names": "a, b, c"}`.
///
/// Any failure, including an unreadable body, answers 500 with the fixed
/// `{"error": ...}` payload.
pub async fn roast(
    State(state): State<AppState>,
    payload: Result<Json<RoastRequest>, JsonRejection>,
) -> Result<Json<RoastReport>, RoastError> {
    let Json(request) = payload.map_err(|e| RoastError::InvalidInput(e.body_text()))?;
    let names = request.names.unwrap_or_default();

    let report = state.roaster.roast_names(&names).await?;
    Ok(Json(report))
}
