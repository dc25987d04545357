//! Account data models and API response types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents an account record from the database.
///
/// Maps to the `accounts` table. Every transaction references exactly one account,
/// and queries always filter by `user_id` so one user never sees another's accounts.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,

    /// Human-readable name, e.g. "Cash"
    pub name: String,

    /// Currency code (ISO 4217)
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// Response body for `GET /v1/accounts`.
///
/// ```json
/// { "id": "550e8400-e29b-41d4-a716-446655440000", "name": "Cash", "currency": "USD" }
/// ```
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub name: String,
    pub currency: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            currency: account.currency,
        }
    }
}
