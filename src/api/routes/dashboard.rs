//! Dashboard Page Routes
//!
//! - GET / - Blank dashboard
//! - POST / - Run one render cycle from the submitted checkboxes

use axum::{extract::State, http::StatusCode, response::Html, Form};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::catalog::Selector;
use crate::dispatch::RenderPlan;
use crate::page::{render_page, Banner, PageView, EMPTY_SELECTION_MESSAGE, FETCH_FAILED_MESSAGE};

/// GET /
pub async fn show_dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(page(&state, &Selector::new(), None, None))
}

/// POST /
///
/// An empty selection re-renders the page with a blocking error and never
/// calls the data service. A data service failure aborts the cycle and
/// shows a generic failure banner.
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let selector = Selector::from_form(&fields);
    let selection = selector.selection();

    match state.generate(&selection).await {
        Ok(plan) => (
            StatusCode::OK,
            Html(page(&state, &selector, None, Some(&plan))),
        ),
        Err(err) => {
            let (status, code) = err.status_and_code();
            let message = match err {
                ApiError::EmptySelection => {
                    tracing::info!("Generate requested with no content types selected");
                    EMPTY_SELECTION_MESSAGE
                }
                other => {
                    tracing::error!(error_code = %code, error = %other, "Render cycle failed");
                    FETCH_FAILED_MESSAGE
                }
            };
            let banner = Banner::Error(message.to_string());
            (status, Html(page(&state, &selector, Some(banner), None)))
        }
    }
}

fn page(
    state: &AppState,
    selector: &Selector,
    banner: Option<Banner>,
    plan: Option<&RenderPlan>,
) -> String {
    render_page(&PageView {
        title: &state.dashboard.title,
        footer: &state.dashboard.footer,
        selector,
        banner,
        plan,
    })
}
