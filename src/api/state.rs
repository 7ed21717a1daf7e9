//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::api::error::{ApiError, ApiResult};
use crate::catalog::Selection;
use crate::config::DashboardConfig;
use crate::dispatch::{dispatch, DispatchOptions, RenderPlan};
use crate::source::AnalyticsSource;

/// Shared application state for all handlers
pub struct AppState {
    /// Where analytics come from
    pub source: Arc<dyn AnalyticsSource>,
    /// Page settings
    pub dashboard: Arc<DashboardConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Held for the duration of a data service call
    fetch_gate: Mutex<()>,
}

impl AppState {
    pub fn new(source: Arc<dyn AnalyticsSource>, dashboard: DashboardConfig) -> Self {
        Self {
            source,
            dashboard: Arc::new(dashboard),
            start_time: Instant::now(),
            fetch_gate: Mutex::new(()),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            comparative_scope: self.dashboard.comparative_scope,
        }
    }

    /// Run one render cycle: validate, fetch, dispatch
    ///
    /// An empty selection never reaches the data service. Only one call to
    /// the data service is in flight at a time.
    pub async fn generate(&self, selection: &Selection) -> ApiResult<RenderPlan> {
        if selection.is_empty() {
            return Err(ApiError::EmptySelection);
        }

        let response = {
            let _gate = self.fetch_gate.lock().await;
            tracing::info!(
                source = self.source.name(),
                selection = %selection,
                "Requesting analytics"
            );
            self.source.get_data(selection).await?
        };

        Ok(dispatch(selection, &response, &self.dispatch_options()))
    }
}
