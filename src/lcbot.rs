//! The two announcement flows: the polling tracker and the daily summary.
pub mod announce;
pub mod summary;
pub mod telegram;
pub mod tracker;

#[cfg(test)]
mod fakes;

pub use summary::run_daily_summary;
pub use telegram::{Notifier, TelegramNotifier};
pub use tracker::{Ticker, Tracker, poll_ticker};
