//! Content-Type Catalog
//!
//! The fixed set of content-type categories a user can analyze, the
//! selection built from them, and the checkbox selector that produces it.
//!
//! - `Category`: one of Text, Image, Video, Reels, Carousel
//! - `Selection`: ordered, duplicate-free set of categories
//! - `Selector`: one independent toggle per category

mod selector;
mod types;

pub use selector::Selector;
pub use types::{Category, CategoryError, Selection};
