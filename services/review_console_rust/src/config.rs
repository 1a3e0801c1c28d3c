//! Configuration constants and environment loading for the review console.
//!
//! This module manages all runtime configuration:
//! - Backend and Football-AI base URLs
//! - Review-queue refresh interval
//! - Auto-save quiescence window
//! - Headless admin credential

use std::env;
use std::time::Duration;

use review_core::autosave::DEFAULT_QUIESCENCE_MS;

/// Default staking-backend base URL (local development).
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

/// Default Football-AI prediction service base URL.
pub const DEFAULT_FOOTBALL_AI_URL: &str = "http://localhost:8090";

/// Default review-queue refresh interval in seconds.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub football_ai_url: String,
    pub refresh_interval: Duration,
    pub quiescence_window: Duration,
    /// Pre-issued admin token for headless sessions; when absent the console
    /// runs unauthenticated and the backend decides what it may see.
    pub admin_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let backend_url =
            env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

        let football_ai_url =
            env::var("FOOTBALL_AI_URL").unwrap_or_else(|_| DEFAULT_FOOTBALL_AI_URL.to_string());

        let refresh_interval = Duration::from_secs(
            env::var("REFRESH_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
                .max(5),
        );

        let quiescence_window = Duration::from_millis(
            env::var("AUTOSAVE_QUIESCENCE_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_QUIESCENCE_MS)
                .clamp(100, 10_000),
        );

        let admin_token = env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());

        Self {
            backend_url,
            football_ai_url,
            refresh_interval,
            quiescence_window,
            admin_token,
        }
    }
}
