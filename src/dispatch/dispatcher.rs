//! Section dispatch
//!
//! Walks the selection against each section's keyed lookup and picks a
//! rendering per entry shape.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::format::{format_metric_number, humanize_key};
use super::plan::{DisplayItem, EntryGroup, RenderPlan, SectionBlock, Tone};
use crate::catalog::{Category, Selection};
use crate::response::{AnalyticsResponse, EntryValue, Scalar, Section, SectionKind};

/// Which comparative analysis entries to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparativeScope {
    /// Only entries keyed by a selected category
    #[default]
    Selected,
    /// Every entry, including cross-category keys like `best_performing`
    All,
}

/// Dispatcher options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    pub comparative_scope: ComparativeScope,
}

/// Build the render plan for one cycle
pub fn dispatch(
    selection: &Selection,
    response: &AnalyticsResponse,
    options: &DispatchOptions,
) -> RenderPlan {
    let sections = SectionKind::all()
        .iter()
        .filter_map(|&kind| {
            let section = response.section(kind)?;
            // Only comparative analysis is suppressed when empty
            if kind == SectionKind::ComparativeAnalysis && section.is_empty() {
                return None;
            }
            Some(render_section(kind, section, selection, options))
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        selection = %selection,
        sections = sections.len(),
        "Dispatched analytics response"
    );

    RenderPlan {
        selection: selection.clone(),
        sections,
        generated_at: Utc::now(),
    }
}

fn render_section(
    kind: SectionKind,
    section: &Section,
    selection: &Selection,
    options: &DispatchOptions,
) -> SectionBlock {
    let groups = match kind {
        SectionKind::ComparativeAnalysis => {
            vec![comparative_group(section, selection, options.comparative_scope)]
        }
        _ => selection
            .iter()
            .filter_map(|category| {
                section
                    .get(category)
                    .map(|value| category_group(kind, category, value))
            })
            .collect(),
    };

    SectionBlock::new(kind, groups)
}

fn category_group(kind: SectionKind, category: Category, value: &EntryValue) -> EntryGroup {
    let title = match kind {
        SectionKind::Insights => format!("{} Insights", category.label()),
        SectionKind::Recommendations => format!("{} Recommendations", category.label()),
        _ => category.label().to_string(),
    };

    EntryGroup {
        title,
        category: Some(category),
        items: entry_items(kind, value, None),
    }
}

fn comparative_group(section: &Section, selection: &Selection, scope: ComparativeScope) -> EntryGroup {
    let kind = SectionKind::ComparativeAnalysis;
    let items = match scope {
        ComparativeScope::Selected => selection
            .iter()
            .filter_map(|category| {
                section
                    .get(category)
                    .map(|value| entry_items(kind, value, Some(category.label().to_string())))
            })
            .flatten()
            .collect(),
        ComparativeScope::All => section
            .entries()
            .iter()
            .flat_map(|entry| entry_items(kind, &entry.value, Some(humanize_key(&entry.key))))
            .collect(),
    };

    EntryGroup {
        title: "View Analysis".to_string(),
        category: None,
        items,
    }
}

/// Items for one entry, chosen by the entry's shape
///
/// `entry_label` labels list and scalar items when the section shows the
/// entry key inline (comparative analysis).
fn entry_items(kind: SectionKind, value: &EntryValue, entry_label: Option<String>) -> Vec<DisplayItem> {
    let tone = Tone::for_section(kind);
    match value {
        EntryValue::Keyed(pairs) => pairs
            .iter()
            .map(|(key, scalar)| DisplayItem {
                label: Some(humanize_key(key)),
                value: render_scalar(kind, scalar),
                tone,
            })
            .collect(),
        EntryValue::List(items) => items
            .iter()
            .map(|scalar| DisplayItem {
                label: entry_label.clone(),
                value: render_scalar(kind, scalar),
                tone,
            })
            .collect(),
        EntryValue::Scalar(scalar) => vec![DisplayItem {
            label: entry_label,
            value: render_scalar(kind, scalar),
            tone,
        }],
    }
}

fn render_scalar(kind: SectionKind, scalar: &Scalar) -> String {
    if scalar.is_unsupported() {
        tracing::warn!(
            section = kind.key(),
            value = %scalar,
            "Nested value has no dedicated rendering; showing raw JSON"
        );
    }

    match (kind, scalar) {
        // Metric flags count as 0/1
        (SectionKind::Metrics, Scalar::Bool(flag)) => {
            format_metric_number(if *flag { 1.0 } else { 0.0 })
        }
        (SectionKind::Metrics, scalar) => match scalar.as_f64() {
            Some(number) => format_metric_number(number),
            None => scalar.to_string(),
        },
        _ => scalar.to_string(),
    }
}
