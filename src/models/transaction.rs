//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing a transaction
//! - Request types for creating, updating and listing transactions
//! - `TransactionResponse`: Response body returned to clients

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Largest page size accepted by the list endpoint.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Page size used when the client does not send `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest single amount accepted, in cents. Keeps monthly sums well inside `BIGINT`.
pub const MAX_AMOUNT_CENTS: i64 = i32::MAX as i64;

/// Kind of money movement.
///
/// Stored as the `transaction_type` PostgreSQL enum and serialized in
/// upper case (`"INCOME"`, `"EXPENSE"`, `"TRANSFER"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "transaction_type", rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
    /// Movement between the user's own accounts; ignored by analytics.
    Transfer,
}

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction:
/// - Belongs to exactly one user and one account
/// - Optionally references a category owned by the same user
/// - Stores amount in positive cents (enforced by CHECK constraint)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub account_id: Uuid,
    pub category_id: Option<Uuid>,
    #[sqlx(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount_cents: i64,
    pub currency: String,
    pub occurred_at: DateTime<Utc>,
    pub merchant: Option<String>,
    pub note: Option<String>,

    /// Pairs the two legs of a transfer. Not enforced yet.
    pub transfer_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a transaction.
///
/// # JSON Example
///
/// ```json
/// {
///   "accountId": "550e8400-e29b-41d4-a716-446655440000",
///   "type": "EXPENSE",
///   "amountCents": 1299,
///   "occurredAt": "2025-01-15T12:30:00Z",
///   "categoryId": "660e8400-e29b-41d4-a716-446655440001",
///   "merchant": "Whole Foods"
/// }
/// ```
///
/// # Validation
///
/// - `amountCents`: integer, between 1 and `i32::MAX`
/// - `occurredAt`: ISO 8601 date or date-time
/// - `currency`: optional, defaults to "USD"
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub account_id: Uuid,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    pub amount_cents: i64,

    pub currency: Option<String>,

    pub occurred_at: String,

    pub category_id: Option<Uuid>,
    pub merchant: Option<String>,
    pub note: Option<String>,
    pub transfer_id: Option<String>,
}

/// A create request that passed validation.
#[derive(Debug)]
pub struct NewTransaction {
    pub account_id: Uuid,
    pub transaction_type: TransactionType,
    pub amount_cents: i64,
    pub currency: String,
    pub occurred_at: DateTime<Utc>,
    pub category_id: Option<Uuid>,
    pub merchant: Option<String>,
    pub note: Option<String>,
    pub transfer_id: Option<String>,
}

impl CreateTransactionRequest {
    pub fn validate(self) -> Result<NewTransaction, AppError> {
        validate_amount(self.amount_cents)?;
        let occurred_at = parse_timestamp("occurredAt", &self.occurred_at)?;

        Ok(NewTransaction {
            account_id: self.account_id,
            transaction_type: self.transaction_type,
            amount_cents: self.amount_cents,
            currency: self.currency.unwrap_or_else(|| "USD".to_string()),
            occurred_at,
            category_id: self.category_id,
            merchant: self.merchant,
            note: self.note,
            transfer_id: self.transfer_id,
        })
    }
}

/// Request body for a partial update. Absent (or null) fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    pub account_id: Option<Uuid>,

    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,

    pub amount_cents: Option<i64>,
    pub currency: Option<String>,
    pub occurred_at: Option<String>,
    pub category_id: Option<Uuid>,
    pub merchant: Option<String>,
    pub note: Option<String>,
    pub transfer_id: Option<String>,
}

/// An update request that passed validation.
#[derive(Debug, Default)]
pub struct TransactionChanges {
    pub account_id: Option<Uuid>,
    pub transaction_type: Option<TransactionType>,
    pub amount_cents: Option<i64>,
    pub currency: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    pub merchant: Option<String>,
    pub note: Option<String>,
    pub transfer_id: Option<String>,
}

impl UpdateTransactionRequest {
    pub fn validate(self) -> Result<TransactionChanges, AppError> {
        if let Some(amount) = self.amount_cents {
            validate_amount(amount)?;
        }
        let occurred_at = self
            .occurred_at
            .as_deref()
            .map(|raw| parse_timestamp("occurredAt", raw))
            .transpose()?;

        Ok(TransactionChanges {
            account_id: self.account_id,
            transaction_type: self.transaction_type,
            amount_cents: self.amount_cents,
            currency: self.currency,
            occurred_at,
            category_id: self.category_id,
            merchant: self.merchant,
            note: self.note,
            transfer_id: self.transfer_id,
        })
    }
}

/// Query string for `GET /v1/transactions`.
///
/// `from` and `to` are inclusive. A bare date in `to` covers that whole day.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    pub account_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// Validated list filters.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub account_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub offset: i64,
    pub limit: i64,
}

impl ListTransactionsQuery {
    pub fn validate(self) -> Result<TransactionFilter, AppError> {
        let offset = self.offset.unwrap_or(0);
        if offset < 0 {
            return Err(AppError::invalid("offset must not be less than 0"));
        }

        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(AppError::invalid(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let from = self
            .from
            .as_deref()
            .map(|raw| parse_timestamp("from", raw))
            .transpose()?;
        let to = self
            .to
            .as_deref()
            .map(|raw| parse_upper_bound("to", raw))
            .transpose()?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(AppError::invalid("from must not be after to"));
            }
        }

        Ok(TransactionFilter {
            account_id: self.account_id,
            category_id: self.category_id,
            from,
            to,
            offset,
            limit,
        })
    }
}

/// Response returned for transaction endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "770e8400-e29b-41d4-a716-446655440002",
///   "accountId": "550e8400-e29b-41d4-a716-446655440000",
///   "type": "EXPENSE",
///   "amountCents": 1299,
///   "currency": "USD",
///   "occurredAt": "2025-01-15T12:30:00Z",
///   "categoryId": null,
///   "merchant": "Whole Foods",
///   "note": null,
///   "transferId": null,
///   "createdAt": "2025-01-15T12:31:00Z",
///   "updatedAt": "2025-01-15T12:31:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub account_id: Uuid,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount_cents: i64,
    pub currency: String,
    pub occurred_at: DateTime<Utc>,
    pub category_id: Option<Uuid>,
    pub merchant: Option<String>,
    pub note: Option<String>,
    pub transfer_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            user_id: transaction.user_id,
            account_id: transaction.account_id,
            transaction_type: transaction.transaction_type,
            amount_cents: transaction.amount_cents,
            currency: transaction.currency,
            occurred_at: transaction.occurred_at,
            category_id: transaction.category_id,
            merchant: transaction.merchant,
            note: transaction.note,
            transfer_id: transaction.transfer_id,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}

fn validate_amount(amount_cents: i64) -> Result<(), AppError> {
    if amount_cents < 1 {
        return Err(AppError::invalid("amountCents must not be less than 1"));
    }
    if amount_cents > MAX_AMOUNT_CENTS {
        return Err(AppError::invalid(format!(
            "amountCents must not be greater than {MAX_AMOUNT_CENTS}"
        )));
    }
    Ok(())
}

/// Parse an ISO 8601 date or date-time.
///
/// Accepts RFC 3339 timestamps, offset-less date-times (read as UTC) and
/// bare dates (midnight UTC).
pub fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    Err(AppError::invalid(format!(
        "{field} must be a valid ISO 8601 date string"
    )))
}

/// Like [`parse_timestamp`], but a bare date resolves to the last instant of that day.
fn parse_upper_bound(field: &str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let end_of_day = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
            .unwrap_or(NaiveTime::MIN);
        return Ok(Utc.from_utc_datetime(&date.and_time(end_of_day)));
    }
    parse_timestamp(field, raw)
}
