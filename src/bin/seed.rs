//! Populate the database with the demo user and a little starter data.
//!
//! Safe to run repeatedly: existing rows are reused, and the demo expense is
//! only inserted when the user has no transactions yet.

use aurum_api::{
    config::Config,
    db::{self, DbPool},
    models::{transaction::TransactionType, user::User},
};
use chrono::Utc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email)
        VALUES ($1)
        ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
        RETURNING id, email, created_at
        "#,
    )
    .bind(&config.demo_user_email)
    .fetch_one(&pool)
    .await?;
    tracing::info!(user_id = %user.id, email = %user.email, "demo user ready");

    let food = find_or_create_category(&pool, user.id, "Food", None).await?;
    for child in ["Groceries", "Dining"] {
        find_or_create_category(&pool, user.id, child, Some(food)).await?;
    }

    let account = find_or_create_account(&pool, user.id, "Cash", "USD").await?;

    let has_transactions: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM transactions WHERE user_id = $1)")
            .bind(user.id)
            .fetch_one(&pool)
            .await?;

    if !has_transactions {
        sqlx::query(
            r#"
            INSERT INTO transactions
                (user_id, account_id, category_id, type, amount_cents, currency, occurred_at, merchant, note)
            VALUES ($1, $2, $3, $4, $5, 'USD', $6, 'Whole Foods', 'Demo transaction')
            "#,
        )
        .bind(user.id)
        .bind(account)
        .bind(food)
        .bind(TransactionType::Expense)
        .bind(1299_i64)
        .bind(Utc::now())
        .execute(&pool)
        .await?;
        tracing::info!("demo transaction inserted");
    }

    tracing::info!("Seed complete");
    Ok(())
}

async fn find_or_create_category(
    pool: &DbPool,
    user_id: Uuid,
    name: &str,
    parent_id: Option<Uuid>,
) -> Result<Uuid, sqlx::Error> {
    let existing: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id FROM categories
        WHERE user_id = $1 AND name = $2 AND parent_id IS NOT DISTINCT FROM $3
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(parent_id)
    .fetch_optional(pool)
    .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    sqlx::query_scalar(
        "INSERT INTO categories (user_id, name, parent_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(name)
    .bind(parent_id)
    .fetch_one(pool)
    .await
}

async fn find_or_create_account(
    pool: &DbPool,
    user_id: Uuid,
    name: &str,
    currency: &str,
) -> Result<Uuid, sqlx::Error> {
    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM accounts WHERE user_id = $1 AND name = $2")
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    sqlx::query_scalar(
        "INSERT INTO accounts (user_id, name, currency) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(name)
    .bind(currency)
    .fetch_one(pool)
    .await
}
