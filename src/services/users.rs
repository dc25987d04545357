//! Demo user resolution.
//!
//! Every data operation is scoped to a single user found by email until
//! real authentication replaces it.

use uuid::Uuid;

use crate::{db::DbPool, error::AppError};

/// Look up a user id by email, `None` if no such user exists.
pub async fn find_user_id(pool: &DbPool, email: &str) -> Result<Option<Uuid>, AppError> {
    let id = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(id)
}

/// Resolve the demo user, failing with 404 when the database was never seeded.
pub async fn demo_user_id(pool: &DbPool, email: &str) -> Result<Uuid, AppError> {
    find_user_id(pool, email).await?.ok_or_else(|| {
        AppError::NotFound("Demo user not found. Did you run the seed binary?".to_string())
    })
}
