//! Aurum personal-finance API.
//!
//! A JSON API over PostgreSQL for accounts, categories and transactions,
//! plus monthly analytics and rule-based insights for the dashboard.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Identity**: a single demo user resolved by email, pending real authentication
//! - **Format**: JSON requests/responses with camelCase fields

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod insights;
pub mod models;
pub mod services;
pub mod state;
