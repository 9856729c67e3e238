//! Configuration management

use anyhow::{Context, Result};

/// Bot configuration, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token
    pub bot_token: String,

    /// Yandex Tracker OAuth token
    pub tracker_token: String,

    /// Yandex Tracker organization id
    pub tracker_org_id: String,

    /// Tracker API base URL (overridable for tests)
    pub tracker_base_url: String,

    /// Telegram id that always resolves to the admin role
    pub admin_telegram_id: Option<String>,

    /// Per-request timeout against the tracker, in seconds
    pub request_timeout_secs: u64,
}

const DEFAULT_TRACKER_URL: &str = "https://api.tracker.yandex.net/v2";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let bot_token =
            std::env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN is not set")?;

        let tracker_token = std::env::var("YT_TOKEN").context("YT_TOKEN is not set")?;
        let tracker_org_id = std::env::var("YT_ORG_ID").context("YT_ORG_ID is not set")?;

        let tracker_base_url =
            std::env::var("YT_BASE_URL").unwrap_or_else(|_| DEFAULT_TRACKER_URL.to_string());

        let admin_telegram_id = std::env::var("ADMIN_TELEGRAM_ID").ok();

        let request_timeout_secs = std::env::var("YT_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            bot_token,
            tracker_token,
            tracker_org_id,
            tracker_base_url,
            admin_telegram_id,
            request_timeout_secs,
        })
    }
}
