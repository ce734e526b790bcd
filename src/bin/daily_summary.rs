use anyhow::Result;
use chrono::Utc;
use env_logger::Env;

use leekrelay::config::{Config, TELEGRAM_API_BASE};
use leekrelay::lcapi::LcApi;
use leekrelay::lcbot::{TelegramNotifier, run_daily_summary};

use std::process::ExitCode;

async fn run() -> Result<()> {
    let config = Config::from_env()?;

    let source = LcApi::new(&config.api_base)?;
    let notifier = TelegramNotifier::new(
        TELEGRAM_API_BASE,
        &config.bot_token,
        config.chat_id.clone(),
    )?;

    run_daily_summary(&source, &notifier, &config.usernames, Utc::now()).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Fatal error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
