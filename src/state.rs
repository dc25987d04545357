//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{config::Config, db::DbPool, insights::InsightEngine};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,

    /// Email of the user every request is scoped to until real authentication exists.
    pub demo_user_email: Arc<str>,

    /// Engine producing insights for the monthly report.
    pub insights: Arc<dyn InsightEngine>,
}

impl AppState {
    pub fn new(pool: DbPool, config: &Config) -> Self {
        Self {
            pool,
            demo_user_email: Arc::from(config.demo_user_email.as_str()),
            insights: crate::insights::build_engine(&config.insights),
        }
    }
}
