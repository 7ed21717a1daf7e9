//! Typed analytics response
//!
//! Parsing is lenient by design of the data service contract: missing
//! sections are `None`, a section that is not an object is present but
//! empty, and nested values below the second level are kept as JSON text.

use serde_json::{Map, Value};
use std::collections::HashMap;

use super::error::ResponseError;
use crate::catalog::Category;

/// The four top-level sections, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Metrics,
    Insights,
    ComparativeAnalysis,
    Recommendations,
}

impl SectionKind {
    /// All sections in render order
    pub fn all() -> &'static [SectionKind] {
        &[
            SectionKind::Metrics,
            SectionKind::Insights,
            SectionKind::ComparativeAnalysis,
            SectionKind::Recommendations,
        ]
    }

    /// Top-level key in the response
    pub fn key(&self) -> &'static str {
        match self {
            SectionKind::Metrics => "metrics",
            SectionKind::Insights => "insights",
            SectionKind::ComparativeAnalysis => "comparative_analysis",
            SectionKind::Recommendations => "recommendations",
        }
    }
}

/// A leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
    Bool(bool),
    Null,
    /// A nested array or object that has no dedicated rendering
    Other(String),
}

impl Scalar {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Number(n) => Scalar::Number(n),
            Value::String(s) => Scalar::Text(s),
            Value::Bool(b) => Scalar::Bool(b),
            Value::Null => Scalar::Null,
            other => Scalar::Other(other.to_string()),
        }
    }

    /// Numeric value, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Scalar::Other(_))
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Bool(true) => write!(f, "True"),
            Scalar::Bool(false) => write!(f, "False"),
            Scalar::Null => write!(f, "None"),
            Scalar::Other(json) => write!(f, "{}", json),
        }
    }
}

/// The value stored under one section entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValue {
    /// Named values, in the order received
    Keyed(Vec<(String, Scalar)>),
    /// Independent items
    List(Vec<Scalar>),
    /// A single value
    Scalar(Scalar),
}

impl EntryValue {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => EntryValue::Keyed(
                map.into_iter()
                    .map(|(k, v)| (k, Scalar::from_value(v)))
                    .collect(),
            ),
            Value::Array(items) => {
                EntryValue::List(items.into_iter().map(Scalar::from_value).collect())
            }
            other => EntryValue::Scalar(Scalar::from_value(other)),
        }
    }
}

/// One entry of a section
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Key exactly as received
    pub key: String,
    /// Category the key names, if any
    pub category: Option<Category>,
    pub value: EntryValue,
}

/// One top-level section of the response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    entries: Vec<Entry>,
    by_category: HashMap<Category, usize>,
}

impl Section {
    /// Build a section from its JSON value
    pub fn from_value(kind: SectionKind, value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(kind, map),
            other => {
                tracing::warn!(
                    section = kind.key(),
                    found = json_type_name(&other),
                    "Section is not an object; treating it as empty"
                );
                Self::default()
            }
        }
    }

    fn from_map(kind: SectionKind, map: Map<String, Value>) -> Self {
        let mut section = Self::default();

        for (key, value) in map {
            let category = Category::from_key(&key);
            let value = EntryValue::from_value(value);

            if let Some(category) = category {
                if section.by_category.contains_key(&category) {
                    tracing::warn!(
                        section = kind.key(),
                        key = %key,
                        "Duplicate entry for category; keeping the first"
                    );
                } else {
                    section.by_category.insert(category, section.entries.len());
                }
            }

            section.entries.push(Entry {
                key,
                category,
                value,
            });
        }

        section
    }

    /// Keyed lookup of the entry for a category
    pub fn get(&self, category: Category) -> Option<&EntryValue> {
        self.by_category
            .get(&category)
            .map(|&idx| &self.entries[idx].value)
    }

    /// All entries in the order received
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries whose key is not a category name
    pub fn unmatched(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.category.is_none())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parsed response from the data service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsResponse {
    pub metrics: Option<Section>,
    pub insights: Option<Section>,
    pub comparative_analysis: Option<Section>,
    pub recommendations: Option<Section>,
}

impl AnalyticsResponse {
    /// Parse a response body
    pub fn from_json_str(body: &str) -> Result<Self, ResponseError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Parse an already-decoded JSON value
    ///
    /// A string holding a JSON object (optionally inside a Markdown code
    /// fence) is unwrapped once before parsing.
    pub fn from_value(value: Value) -> Result<Self, ResponseError> {
        let value = match value {
            Value::String(text) => serde_json::from_str(strip_code_fence(&text))?,
            other => other,
        };

        let mut map = match value {
            Value::Object(map) => map,
            other => return Err(ResponseError::NotAnObject(json_type_name(&other))),
        };

        let mut take = |kind: SectionKind| {
            map.remove(kind.key())
                .map(|value| Section::from_value(kind, value))
        };

        let response = Self {
            metrics: take(SectionKind::Metrics),
            insights: take(SectionKind::Insights),
            comparative_analysis: take(SectionKind::ComparativeAnalysis),
            recommendations: take(SectionKind::Recommendations),
        };

        if !map.is_empty() {
            tracing::debug!(
                ignored = ?map.keys().collect::<Vec<_>>(),
                "Ignoring unknown top-level keys"
            );
        }

        Ok(response)
    }

    /// Get a section by kind
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        match kind {
            SectionKind::Metrics => self.metrics.as_ref(),
            SectionKind::Insights => self.insights.as_ref(),
            SectionKind::ComparativeAnalysis => self.comparative_analysis.as_ref(),
            SectionKind::Recommendations => self.recommendations.as_ref(),
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line; a one-line fence has none
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
