//! Checkbox Selector
//!
//! Holds one toggle per category and turns the checked ones into a
//! `Selection`. The page posts one form field per checked box, named by
//! the category key.

use std::collections::HashMap;

use super::types::{Category, Selection};

/// Independent boolean toggles, one per category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    checked: [bool; 5],
}

impl Selector {
    /// Create a selector with nothing checked
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered `(label, icon)` pairs for rendering the controls
    pub fn options() -> Vec<(&'static str, &'static str)> {
        Category::all().iter().map(|c| (c.label(), c.icon())).collect()
    }

    /// Build toggle state from submitted form fields
    ///
    /// A field named after a category key counts as checked unless its
    /// value is an explicit off value. Other fields are ignored.
    pub fn from_form(fields: &HashMap<String, String>) -> Self {
        let mut selector = Self::new();
        for (name, value) in fields {
            if let Some(category) = Category::from_key(name) {
                selector.set(category, is_checked_value(value));
            }
        }
        selector
    }

    /// Mirror an existing selection, e.g. to re-render the form
    pub fn from_selection(selection: &Selection) -> Self {
        let mut selector = Self::new();
        for category in selection.iter() {
            selector.set(category, true);
        }
        selector
    }

    pub fn set(&mut self, category: Category, checked: bool) {
        self.checked[slot(category)] = checked;
    }

    pub fn toggle(&mut self, category: Category) {
        let slot = slot(category);
        self.checked[slot] = !self.checked[slot];
    }

    pub fn is_checked(&self, category: Category) -> bool {
        self.checked[slot(category)]
    }

    /// The categories whose toggle is currently on
    pub fn selection(&self) -> Selection {
        Category::all()
            .iter()
            .copied()
            .filter(|c| self.is_checked(*c))
            .collect()
    }
}

fn slot(category: Category) -> usize {
    match category {
        Category::Text => 0,
        Category::Image => 1,
        Category::Video => 2,
        Category::Reels => 3,
        Category::Carousel => 4,
    }
}

fn is_checked_value(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "off" | "false" | "0"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_options_are_ordered() {
        let labels: Vec<_> = Selector::options().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Text", "Image", "Video", "Reels", "Carousel"]);
    }

    #[test]
    fn test_empty_selector_gives_empty_selection() {
        assert!(Selector::new().selection().is_empty());
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut selector = Selector::new();
        selector.toggle(Category::Video);
        selector.set(Category::Text, true);
        selector.toggle(Category::Text);

        assert!(selector.is_checked(Category::Video));
        assert!(!selector.is_checked(Category::Text));
        assert_eq!(selector.selection().labels(), vec!["Video"]);
    }

    #[test]
    fn test_from_form() {
        let fields = form(&[
            ("image", "on"),
            ("reels", "on"),
            ("carousel", "off"),
            ("action", "generate"),
        ]);
        let selector = Selector::from_form(&fields);
        assert_eq!(selector.selection().labels(), vec!["Image", "Reels"]);
    }

    #[test]
    fn test_every_subset_round_trips() {
        for mask in 0u8..32 {
            let expected: Selection = Category::all()
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect();

            let fields: HashMap<String, String> = expected
                .iter()
                .map(|c| (c.key().to_string(), "on".to_string()))
                .collect();

            assert_eq!(Selector::from_form(&fields).selection(), expected);
        }
    }
}
