//! Category and Selection types
//!
//! `Category` is a closed enum; its declaration order is the display order
//! used everywhere (selector grid, dispatch iteration, serialized labels).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

/// A content-type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Text-only posts
    Text,
    /// Single image posts
    Image,
    /// Long-form video
    Video,
    /// Short vertical video
    Reels,
    /// Multi-slide posts
    Carousel,
}

impl Category {
    /// Get all categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Category::Text,
            Category::Image,
            Category::Video,
            Category::Reels,
            Category::Carousel,
        ]
    }

    /// Human-readable label shown on the selector
    pub fn label(&self) -> &'static str {
        match self {
            Category::Text => "Text",
            Category::Image => "Image",
            Category::Video => "Video",
            Category::Reels => "Reels",
            Category::Carousel => "Carousel",
        }
    }

    /// Icon shown next to the label
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Text => "📝",
            Category::Image => "🖼️",
            Category::Video => "🎥",
            Category::Reels => "📱",
            Category::Carousel => "🎠",
        }
    }

    /// Lower-case key used by the data service and by form fields
    pub fn key(&self) -> &'static str {
        match self {
            Category::Text => "text",
            Category::Image => "image",
            Category::Video => "video",
            Category::Reels => "reels",
            Category::Carousel => "carousel",
        }
    }

    /// Case-insensitive lookup that returns `None` instead of an error.
    ///
    /// Used when matching response keys, where unknown keys are expected.
    pub fn from_key(key: &str) -> Option<Category> {
        let key = key.trim();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_key(s).ok_or_else(|| CategoryError::Unknown(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors from parsing category labels
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Unknown content type: {0:?} (expected one of Text, Image, Video, Reels, Carousel)")]
    Unknown(String),
}

/// The set of categories a user picked for one render cycle
///
/// Iteration always follows `Category::all()` order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    categories: BTreeSet<Category>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a selection from labels, rejecting unknown ones
    pub fn from_labels<I, S>(labels: I) -> Result<Self, CategoryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| label.as_ref().parse::<Category>())
            .collect()
    }

    /// Builder method: add a category
    pub fn with(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn insert(&mut self, category: Category) -> bool {
        self.categories.insert(category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Iterate selected categories in display order
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().copied()
    }

    /// Display labels of the selected categories
    pub fn labels(&self) -> Vec<&'static str> {
        self.iter().map(|c| c.label()).collect()
    }
}

impl FromIterator<Category> for Selection {
    fn from_iter<T: IntoIterator<Item = Category>>(iter: T) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.labels().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("image".parse::<Category>().unwrap(), Category::Image);
        assert_eq!("REELS".parse::<Category>().unwrap(), Category::Reels);
        assert_eq!(" Carousel ".parse::<Category>().unwrap(), Category::Carousel);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "story".parse::<Category>().unwrap_err();
        assert_eq!(err, CategoryError::Unknown("story".to_string()));
    }

    #[test]
    fn test_selection_order_is_fixed() {
        let selection = Selection::from_labels(["carousel", "Text", "video"]).unwrap();
        assert_eq!(selection.labels(), vec!["Text", "Video", "Carousel"]);
    }

    #[test]
    fn test_selection_ignores_duplicates() {
        let selection = Selection::from_labels(["image", "Image", "IMAGE"]).unwrap();
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(Category::Image));
    }

    #[test]
    fn test_selection_serializes_as_labels() {
        let selection = Selection::new().with(Category::Reels).with(Category::Text);
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"["Text","Reels"]"#);

        let back: Selection = serde_json::from_str(r#"["reels","text"]"#).unwrap();
        assert_eq!(back, selection);
    }

    #[test]
    fn test_selection_rejects_unknown_label() {
        assert!(Selection::from_labels(["Text", "Podcast"]).is_err());
    }
}
