//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::{Deserialize, Deserializer};

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3001
/// - `CORS_ORIGIN` (optional): Origin allowed to call the API, defaults to the dashboard dev server
/// - `DEMO_USER_EMAIL` (optional): Email of the user all requests are scoped to
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    #[serde(default = "default_demo_user_email")]
    pub demo_user_email: String,

    /// Insight engine settings, read from `AURUM_`-prefixed variables.
    #[serde(skip)]
    pub insights: InsightsConfig,
}

/// Which insight engine serves the monthly report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsightsMode {
    /// Rule-based insights only.
    #[default]
    Rules,
    /// Rule-based insights merged with the generative placeholder.
    Hybrid,
}

impl InsightsMode {
    /// Only `hybrid` selects the hybrid engine; any other value falls back to rules.
    pub fn from_setting(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("hybrid") {
            Self::Hybrid
        } else {
            Self::Rules
        }
    }
}

fn lenient_mode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<InsightsMode, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(InsightsMode::from_setting(&raw))
}

/// Only the literal `true` turns a flag on; anything else reads as false.
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim() == "true")
}

/// Insight engine configuration.
///
/// # Environment Variables
///
/// - `AURUM_INSIGHTS_MODE`: `hybrid`, otherwise rules
/// - `AURUM_INSIGHTS_MAX`: cap on merged insights, defaults to 10
/// - `AURUM_LLM_PLACEHOLDER`: `true` emits the placeholder insight, anything else does not
///
/// Unrecognized mode or flag values fall back to their defaults instead of
/// failing startup.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsConfig {
    #[serde(default, deserialize_with = "lenient_mode")]
    pub insights_mode: InsightsMode,

    #[serde(default = "default_insights_max")]
    pub insights_max: usize,

    #[serde(default, deserialize_with = "lenient_flag")]
    pub llm_placeholder: bool,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            insights_mode: InsightsMode::default(),
            insights_max: default_insights_max(),
            llm_placeholder: false,
        }
    }
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3001
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_demo_user_email() -> String {
    "demo@aurum.local".to_string()
}

fn default_insights_max() -> usize {
    10
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: database_url -> DATABASE_URL
        let mut config = envy::from_env::<Config>()?;
        config.insights = envy::prefixed("AURUM_").from_env::<InsightsConfig>()?;

        Ok(config)
    }
}
