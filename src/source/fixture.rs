//! File-backed data source
//!
//! Re-reads the file on every call so a running dashboard picks up edits.

use async_trait::async_trait;
use std::path::PathBuf;

use super::{AnalyticsSource, SourceError};
use crate::catalog::Selection;
use crate::response::AnalyticsResponse;

/// Serves a canned JSON response from disk
pub struct FixtureAnalyticsSource {
    path: PathBuf,
}

impl FixtureAnalyticsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AnalyticsSource for FixtureAnalyticsSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn get_data(&self, selection: &Selection) -> Result<AnalyticsResponse, SourceError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|error| SourceError::Fixture {
                path: self.path.clone(),
                error,
            })?;

        tracing::debug!(path = ?self.path, selection = %selection, "Serving fixture response");
        Ok(AnalyticsResponse::from_json_str(&body)?)
    }

    async fn health_check(&self) -> Result<(), SourceError> {
        tokio::fs::metadata(&self.path)
            .await
            .map(|_| ())
            .map_err(|error| SourceError::Fixture {
                path: self.path.clone(),
                error,
            })
    }
}
