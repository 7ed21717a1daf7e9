//! Data Transfer Objects
//!
//! Request and response types for the JSON endpoints.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Insight generation request
#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    /// Content type labels, case-insensitive
    #[serde(default)]
    pub categories: Vec<String>,
}

/// One selectable content type
#[derive(Debug, Serialize)]
pub struct CategoryDto {
    pub label: &'static str,
    pub key: &'static str,
    pub icon: &'static str,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            label: category.label(),
            key: category.key(),
            icon: category.icon(),
        }
    }
}

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Data source name
    pub source: String,
    /// Data source status: ok, error
    pub source_status: String,
    pub uptime_seconds: u64,
    pub version: String,
}
