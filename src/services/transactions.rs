//! Transaction service - owner-scoped CRUD over the `transactions` table.
//!
//! Every query filters by `user_id`, so a transaction, account or category
//! belonging to someone else is indistinguishable from one that does not exist.
//!
//! Ownership checks run as separate reads before the write. They are not
//! wrapped in a database transaction.

use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::transaction::{NewTransaction, Transaction, TransactionChanges, TransactionFilter},
};

/// Fail with 404 unless `account_id` belongs to the user.
pub async fn ensure_account_owned(
    pool: &DbPool,
    user_id: Uuid,
    account_id: Uuid,
) -> Result<(), AppError> {
    let _: Uuid = sqlx::query_scalar("SELECT id FROM accounts WHERE id = $1 AND user_id = $2")
        .bind(account_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Account"))?;

    Ok(())
}

/// Fail with 404 unless `category_id` belongs to the user.
pub async fn ensure_category_owned(
    pool: &DbPool,
    user_id: Uuid,
    category_id: Uuid,
) -> Result<(), AppError> {
    let _: Uuid = sqlx::query_scalar("SELECT id FROM categories WHERE id = $1 AND user_id = $2")
        .bind(category_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;

    Ok(())
}

/// List transactions newest first, applying the optional filters and pagination.
pub async fn list_transactions(
    pool: &DbPool,
    user_id: Uuid,
    filter: &TransactionFilter,
) -> Result<Vec<Transaction>, AppError> {
    let transactions = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT *
        FROM transactions
        WHERE user_id = $1
          AND ($2::uuid IS NULL OR account_id = $2)
          AND ($3::uuid IS NULL OR category_id = $3)
          AND ($4::timestamptz IS NULL OR occurred_at >= $4)
          AND ($5::timestamptz IS NULL OR occurred_at <= $5)
        ORDER BY occurred_at DESC, id DESC
        LIMIT $6 OFFSET $7
        "#,
    )
    .bind(user_id)
    .bind(filter.account_id)
    .bind(filter.category_id)
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(pool)
    .await?;

    Ok(transactions)
}

/// Get one transaction owned by the user.
pub async fn get_transaction(
    pool: &DbPool,
    user_id: Uuid,
    transaction_id: Uuid,
) -> Result<Transaction, AppError> {
    sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1 AND user_id = $2")
        .bind(transaction_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Transaction"))
}

/// Record a new transaction.
///
/// # Errors
///
/// - `NotFound`: account (or category, when given) is not the user's
/// - `Database`: database error occurred
pub async fn create_transaction(
    pool: &DbPool,
    user_id: Uuid,
    new: NewTransaction,
) -> Result<Transaction, AppError> {
    ensure_account_owned(pool, user_id, new.account_id).await?;
    if let Some(category_id) = new.category_id {
        ensure_category_owned(pool, user_id, category_id).await?;
    }

    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (
            user_id,
            account_id,
            type,
            amount_cents,
            currency,
            occurred_at,
            category_id,
            merchant,
            note,
            transfer_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(new.account_id)
    .bind(new.transaction_type)
    .bind(new.amount_cents)
    .bind(new.currency)
    .bind(new.occurred_at)
    .bind(new.category_id)
    .bind(new.merchant)
    .bind(new.note)
    .bind(new.transfer_id)
    .fetch_one(pool)
    .await?;

    tracing::info!(
        transaction_id = %transaction.id,
        account_id = %transaction.account_id,
        amount_cents = transaction.amount_cents,
        "transaction created"
    );

    Ok(transaction)
}

/// Apply a partial update. Fields left as `None` keep their stored value.
pub async fn update_transaction(
    pool: &DbPool,
    user_id: Uuid,
    transaction_id: Uuid,
    changes: TransactionChanges,
) -> Result<Transaction, AppError> {
    get_transaction(pool, user_id, transaction_id).await?;
    if let Some(account_id) = changes.account_id {
        ensure_account_owned(pool, user_id, account_id).await?;
    }
    if let Some(category_id) = changes.category_id {
        ensure_category_owned(pool, user_id, category_id).await?;
    }

    sqlx::query_as::<_, Transaction>(
        r#"
        UPDATE transactions
        SET account_id = COALESCE($3, account_id),
            type = COALESCE($4, type),
            amount_cents = COALESCE($5, amount_cents),
            currency = COALESCE($6, currency),
            occurred_at = COALESCE($7, occurred_at),
            category_id = COALESCE($8, category_id),
            merchant = COALESCE($9, merchant),
            note = COALESCE($10, note),
            transfer_id = COALESCE($11, transfer_id),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(transaction_id)
    .bind(user_id)
    .bind(changes.account_id)
    .bind(changes.transaction_type)
    .bind(changes.amount_cents)
    .bind(changes.currency)
    .bind(changes.occurred_at)
    .bind(changes.category_id)
    .bind(changes.merchant)
    .bind(changes.note)
    .bind(changes.transfer_id)
    .fetch_optional(pool)
    .await?
    // Deleted between the ownership check and the update
    .ok_or_else(|| AppError::not_found("Transaction"))
}

/// Delete a transaction owned by the user.
pub async fn delete_transaction(
    pool: &DbPool,
    user_id: Uuid,
    transaction_id: Uuid,
) -> Result<(), AppError> {
    let deleted = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
        .bind(transaction_id)
        .bind(user_id)
        .execute(pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::not_found("Transaction"));
    }

    tracing::info!(transaction_id = %transaction_id, "transaction deleted");
    Ok(())
}
