//! Response parsing errors

use thiserror::Error;

/// Errors that can occur while decoding a data service response
#[derive(Error, Debug)]
pub enum ResponseError {
    /// Body was not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level value was valid JSON but not an object
    #[error("Expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}
