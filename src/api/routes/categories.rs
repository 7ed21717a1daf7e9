//! Category Routes
//!
//! - GET /api/v1/categories - Selectable content types in display order

use axum::Json;

use crate::api::dto::CategoryDto;
use crate::catalog::Category;

/// GET /api/v1/categories
pub async fn list_categories() -> Json<Vec<CategoryDto>> {
    Json(Category::all().iter().copied().map(CategoryDto::from).collect())
}
