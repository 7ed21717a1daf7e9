//! Page Rendering
//!
//! Turns a `RenderPlan` into output:
//! - `render_page`: the full self-contained dashboard page (inline CSS)
//! - `render_text`: a plain-text rendering for the terminal

mod html;
mod text;

pub use html::{render_page, Banner, PageView};
pub use text::render_text;

/// Shown when the action runs with nothing selected
pub const EMPTY_SELECTION_MESSAGE: &str = "🚨 Please select at least one content type to analyze!";

/// Shown when the data service call fails
pub const FETCH_FAILED_MESSAGE: &str =
    "⚠️ Unable to generate insights right now. Please try again in a moment.";
