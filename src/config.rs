use anyhow::{Context, Result};
use dotenv::dotenv;

use std::env;
use std::time::Duration;

/// The LeetCode accounts both flows report on.
pub const USERNAMES: [&str; 3] = ["godwin-jg", "aswinscse", "the_peaky_blinder"];

pub const DEFAULT_API_BASE: &str = "https://leetcode-api-pied.vercel.app";
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const SNAPSHOT_PATH: &str = "last_seen.json";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Everything the tracker and the daily summary need at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub usernames: Vec<String>,
    pub bot_token: String,
    pub chat_id: String,
    pub poll_interval: Duration,
    pub api_base: String,
    pub snapshot_path: String,
}

impl Config {
    /// Reads configuration from the environment (and `.env` in the project root).
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let bot_token = env::var("BOT_TOKEN")
            .context("Expected 'BOT_TOKEN=<token>' in .env in project root.")?;
        let chat_id = env::var("CHAT_ID")
            .context("Expected 'CHAT_ID=<chat id>' in .env in project root.")?;

        let poll_interval = parse_poll_interval(env::var("POLL_INTERVAL").ok().as_deref())?;

        let api_base = env::var("LEETCODE_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| String::from(DEFAULT_API_BASE));

        Ok(Self {
            usernames: USERNAMES.iter().map(|u| u.to_string()).collect(),
            bot_token,
            chat_id,
            poll_interval,
            api_base,
            snapshot_path: String::from(SNAPSHOT_PATH),
        })
    }
}

/// An unset or blank value means the default interval.
fn parse_poll_interval(raw: Option<&str>) -> Result<Duration> {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return Ok(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));
    };

    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("POLL_INTERVAL must be a whole number of seconds, got '{raw}'"))?;

    // tokio's interval panics on a zero period
    anyhow::ensure!(secs > 0, "POLL_INTERVAL must be at least 1 second");

    Ok(Duration::from_secs(secs))
}
