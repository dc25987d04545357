//! Data models representing database entities and API payloads.

/// Bank/cash account model
pub mod account;
/// Monthly summary, category breakdown and report payloads
pub mod analytics;
/// Spending category model
pub mod category;
/// Income, expense and transfer records
pub mod transaction;
/// Demo user model
pub mod user;
