//! Render Dispatcher
//!
//! Turns a `Selection` and a typed `AnalyticsResponse` into a `RenderPlan`:
//! an ordered list of section blocks, each holding groups of display items.
//! The plan is pure data; `crate::page` turns it into HTML or text.
//!
//! ## Rules
//!
//! - Sections render in fixed order: metrics, insights, comparative
//!   analysis, recommendations
//! - An absent section renders nothing, not even its heading
//! - Comparative analysis is also skipped when present but empty
//! - Only entries for selected categories render
//! - Metric numbers get thousands separators and two decimals

mod dispatcher;
mod format;
mod plan;

pub use dispatcher::{dispatch, ComparativeScope, DispatchOptions};
pub use format::{format_metric_number, humanize_key};
pub use plan::{DisplayItem, EntryGroup, RenderPlan, SectionBlock, Tone, METRICS_PER_ROW};
