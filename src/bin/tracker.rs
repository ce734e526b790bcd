use anyhow::Result;
use env_logger::Env;

use leekrelay::config::{Config, TELEGRAM_API_BASE};
use leekrelay::lcapi::LcApi;
use leekrelay::lcbot::{TelegramNotifier, Tracker, poll_ticker};
use leekrelay::lcdb::LastSeen;

use std::process::ExitCode;

async fn run() -> Result<()> {
    let config = Config::from_env()?;

    // Only one tracker may use a given snapshot file at a time.
    let snapshot = LastSeen::load(&config.snapshot_path)?;
    log::info!("Loaded {} last-seen entries from {}", snapshot.len(), snapshot.path().display());
    log::info!("Poll interval: {}s", config.poll_interval.as_secs());

    let source = LcApi::new(&config.api_base)?;
    let notifier = TelegramNotifier::new(
        TELEGRAM_API_BASE,
        &config.bot_token,
        config.chat_id.clone(),
    )?;

    let mut tracker = Tracker::new(config.usernames.clone(), source, notifier, snapshot);
    tracker.run(poll_ticker(config.poll_interval)).await;

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
