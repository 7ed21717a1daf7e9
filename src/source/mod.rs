//! Analytics Data Source
//!
//! The dashboard's only outbound dependency: given the selected content
//! types, return analytics for them. The call is opaque to the rest of
//! the crate and is never retried.
//!
//! - `HttpAnalyticsSource`: POSTs the selection to a data service
//! - `FixtureAnalyticsSource`: reads a canned response from disk

mod fixture;
mod http;

pub use fixture::FixtureAnalyticsSource;
pub use http::{HttpAnalyticsSource, HttpSourceConfig};

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::catalog::Selection;
use crate::config::SourceConfig;
use crate::response::{AnalyticsResponse, ResponseError};

/// Build the configured source: the fixture file when set, else HTTP
pub fn from_config(config: &SourceConfig) -> Result<Arc<dyn AnalyticsSource>, SourceError> {
    if let Some(path) = &config.fixture {
        tracing::info!("Serving analytics from fixture {:?}", path);
        return Ok(Arc::new(FixtureAnalyticsSource::new(path)));
    }

    tracing::info!("Serving analytics from {}", config.url);
    let source = HttpAnalyticsSource::new(HttpSourceConfig {
        endpoint: config.url.clone(),
        api_key: config.api_key.clone(),
        request_timeout_secs: config.request_timeout_secs,
        health_url: config.health_url.clone(),
    })?;
    Ok(Arc::new(source))
}

/// Something that can produce analytics for a selection
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Short name for logs and health output
    fn name(&self) -> &str;

    /// Fetch analytics for exactly the given selection
    async fn get_data(&self, selection: &Selection) -> Result<AnalyticsResponse, SourceError>;

    /// Check that the source can currently be reached
    async fn health_check(&self) -> Result<(), SourceError> {
        Ok(())
    }
}

/// Errors that can occur when fetching analytics
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Data service unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Malformed response: {0}")]
    Response(#[from] ResponseError),

    #[error("Failed to read fixture {path:?}: {error}")]
    Fixture {
        path: PathBuf,
        error: std::io::Error,
    },
}

impl SourceError {
    /// Map a transport error onto the closest variant
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_connect() {
            SourceError::Unavailable
        } else {
            SourceError::Request(err)
        }
    }
}
