//! # Pulseboard
//!
//! Social media performance dashboard: pick content types, fetch analytics
//! for them from a data service, and render metrics, insights, comparative
//! analysis and recommendations.
//!
//! ## Modules
//!
//! - [`catalog`]: Content-type categories, selection and selector
//! - [`response`]: Typed model of the data service response
//! - [`dispatch`]: Turns a selection and a response into a render plan
//! - [`source`]: The data service boundary (`get_data`)
//! - [`page`]: HTML and text rendering of a render plan
//! - [`api`]: Axum server for the page and JSON API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulseboard::catalog::Selection;
//! use pulseboard::dispatch::{dispatch, DispatchOptions};
//! use pulseboard::page::render_text;
//! use pulseboard::source::{AnalyticsSource, FixtureAnalyticsSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = FixtureAnalyticsSource::new("response.json");
//!     let selection = Selection::from_labels(["Image", "Reels"])?;
//!
//!     let response = source.get_data(&selection).await?;
//!     let plan = dispatch(&selection, &response, &DispatchOptions::default());
//!
//!     print!("{}", render_text(&plan));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod page;
pub mod response;
pub mod source;

// Re-export top-level types for convenience
pub use catalog::{Category, CategoryError, Selection, Selector};

pub use response::{AnalyticsResponse, EntryValue, ResponseError, Scalar, Section, SectionKind};

pub use dispatch::{
    dispatch, ComparativeScope, DispatchOptions, DisplayItem, EntryGroup, RenderPlan,
    SectionBlock, Tone,
};

pub use source::{
    AnalyticsSource, FixtureAnalyticsSource, HttpAnalyticsSource, HttpSourceConfig, SourceError,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    Config, ConfigError, DashboardConfig, DefaultLoad, LoggingConfig, ServerConfig, SourceConfig,
};
