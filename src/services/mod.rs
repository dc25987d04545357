//! Business logic layer.
//!
//! Handlers validate input and delegate here; these functions own the SQL.

/// Monthly totals, deltas and category breakdown
pub mod analytics;
/// Summary, breakdown and insights combined
pub mod report;
/// Owner-scoped transaction CRUD
pub mod transactions;
/// Demo user lookup
pub mod users;
