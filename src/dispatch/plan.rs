//! Render plan types
//!
//! Serializable so the JSON API can return exactly what the page renders.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{Category, Selection};
use crate::response::SectionKind;

/// Metric groups per grid row
pub const METRICS_PER_ROW: usize = 3;

/// Visual tone of a display item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Metric tile
    Metric,
    /// Insight callout
    Info,
    /// Comparative analysis callout
    Warning,
    /// Recommendation callout
    Success,
}

impl Tone {
    pub fn for_section(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Metrics => Tone::Metric,
            SectionKind::Insights => Tone::Info,
            SectionKind::ComparativeAnalysis => Tone::Warning,
            SectionKind::Recommendations => Tone::Success,
        }
    }
}

/// One atomic unit of output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    /// Humanized key, when the value came from a keyed mapping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: String,
    pub tone: Tone,
}

/// Items rendered together under one title (a metric card, an expander)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryGroup {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub items: Vec<DisplayItem>,
}

/// A rendered section with its heading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub kind: SectionKind,
    pub heading: &'static str,
    pub icon: &'static str,
    pub groups: Vec<EntryGroup>,
}

impl SectionBlock {
    pub fn new(kind: SectionKind, groups: Vec<EntryGroup>) -> Self {
        let (icon, heading) = match kind {
            SectionKind::Metrics => ("📈", "Performance Metrics"),
            SectionKind::Insights => ("💡", "Key Insights"),
            SectionKind::ComparativeAnalysis => ("🔄", "Comparative Analysis"),
            SectionKind::Recommendations => ("🎯", "Recommendations"),
        };
        Self {
            kind,
            heading,
            icon,
            groups,
        }
    }

    /// Groups per row: a three-wide grid for metrics, stacked otherwise
    pub fn columns(&self) -> usize {
        match self.kind {
            SectionKind::Metrics => METRICS_PER_ROW,
            _ => 1,
        }
    }

    /// Groups chunked into layout rows
    pub fn rows(&self) -> std::slice::Chunks<'_, EntryGroup> {
        self.groups.chunks(self.columns())
    }

    /// Total display items across all groups
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}

/// Everything one render cycle shows below the selector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub selection: Selection,
    pub sections: Vec<SectionBlock>,
    pub generated_at: DateTime<Utc>,
}

impl RenderPlan {
    /// Find a rendered section
    pub fn section(&self, kind: SectionKind) -> Option<&SectionBlock> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Every display item in render order
    pub fn items(&self) -> impl Iterator<Item = &DisplayItem> {
        self.sections
            .iter()
            .flat_map(|s| s.groups.iter())
            .flat_map(|g| g.items.iter())
    }
}
