//! API Routes
//!
//! Route handlers organized by functionality.

pub mod categories;
pub mod dashboard;
pub mod health;
pub mod insights;
