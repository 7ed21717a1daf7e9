//! Insight Routes
//!
//! - POST /api/v1/insights - Render plan for the requested content types

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::InsightsRequest;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::catalog::Selection;
use crate::dispatch::RenderPlan;

/// POST /api/v1/insights
///
/// Returns the same render plan the page would show.
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InsightsRequest>,
) -> ApiResult<Json<RenderPlan>> {
    let selection = Selection::from_labels(&req.categories)?;
    let plan = state.generate(&selection).await?;
    Ok(Json(plan))
}
