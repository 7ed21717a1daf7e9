//! HTTP data service client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::{Duration, Instant};

use super::{AnalyticsSource, SourceError};
use crate::catalog::Selection;
use crate::response::AnalyticsResponse;

/// Configuration for the HTTP data service
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Endpoint that accepts the selection (e.g., "http://localhost:7860/analytics")
    pub endpoint: String,
    /// Optional bearer token
    pub api_key: Option<String>,
    /// Optional request timeout; none waits as long as the service takes
    pub request_timeout_secs: Option<u64>,
    /// Optional URL probed by `health_check`
    pub health_url: Option<String>,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:7860/analytics".to_string(),
            api_key: None,
            request_timeout_secs: None,
            health_url: None,
        }
    }
}

/// Data service client
pub struct HttpAnalyticsSource {
    client: Client,
    config: HttpSourceConfig,
}

#[derive(Debug, Serialize)]
struct DataRequest<'a> {
    content_types: Vec<&'a str>,
}

impl HttpAnalyticsSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, SourceError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl AnalyticsSource for HttpAnalyticsSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn get_data(&self, selection: &Selection) -> Result<AnalyticsResponse, SourceError> {
        let started = Instant::now();
        let body = DataRequest {
            content_types: selection.labels(),
        };

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(SourceError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await.map_err(SourceError::from_transport)?;
        let analytics = AnalyticsResponse::from_json_str(&text)?;

        tracing::info!(
            endpoint = %self.config.endpoint,
            selection = %selection,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched analytics"
        );

        Ok(analytics)
    }

    async fn health_check(&self) -> Result<(), SourceError> {
        let Some(url) = &self.config.health_url else {
            return Ok(());
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(SourceError::from_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(SourceError::Unavailable)
        }
    }
}
