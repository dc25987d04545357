//! Category HTTP handlers.
//!
//! - GET /v1/categories - List the demo user's categories

use crate::{
    error::AppError,
    models::category::{Category, CategoryResponse},
    services::users,
    state::AppState,
};
use axum::{Json, extract::State};

/// List all categories for the demo user.
///
/// Ordered by `parentId` with top-level categories (`parentId` null) last,
/// then by name. Returns `[]` when the demo user does not exist.
///
/// ```json
/// [
///   { "id": "...", "name": "Dining", "parentId": "..." },
///   { "id": "...", "name": "Food", "parentId": null }
/// ]
/// ```
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let Some(user_id) = users::find_user_id(&state.pool, &state.demo_user_email).await? else {
        return Ok(Json(Vec::new()));
    };

    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, user_id, name, parent_id, created_at
        FROM categories
        WHERE user_id = $1
        ORDER BY parent_id ASC NULLS LAST, name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}
