use anyhow::{Context, Result};
use tokio::time::{Duration, Interval, MissedTickBehavior};

use std::future::Future;

use crate::lcapi::SubmissionSource;
use crate::lcbot::{announce, telegram::Notifier};
use crate::lcdb::SnapshotStore;

/// Paces the polling loop.
pub trait Ticker {
    /// Waits for the next tick. Returning `false` stops the loop.
    fn tick(&mut self) -> impl Future<Output = bool>;
}

impl Ticker for Interval {
    async fn tick(&mut self) -> bool {
        Interval::tick(self).await;
        true
    }
}

/// An interval whose first tick completes immediately.
pub fn poll_ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Announces each user's newest submission once.
///
/// Only the head of the feed is ever compared against the snapshot, so when a
/// user submits several times between two ticks only the latest is announced.
pub struct Tracker<S, N, D> {
    usernames: Vec<String>,
    source: S,
    notifier: N,
    snapshot: D,
}

impl<S, N, D> Tracker<S, N, D>
where
    S: SubmissionSource,
    N: Notifier,
    D: SnapshotStore,
{
    pub fn new(usernames: Vec<String>, source: S, notifier: N, snapshot: D) -> Self {
        Self { usernames, source, notifier, snapshot }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn snapshot(&self) -> &D {
        &self.snapshot
    }

    /// Checks one user's feed. Returns whether an announcement was sent.
    ///
    /// The snapshot is persisted before sending, so a failed send is not retried.
    pub async fn check_user(&mut self, username: &str) -> Result<bool> {
        let submissions = self.source.fetch_submissions(username).await?;

        let Some(latest) = submissions.first() else {
            log::trace!("[check_user] No submissions for {username}");
            return Ok(false);
        };

        if self.snapshot.get(username) == Some(&latest.id) {
            log::trace!("[check_user] Nothing new for {username} (head {})", latest.id);
            return Ok(false);
        }

        self.snapshot
            .set_and_persist(username, latest.id.clone())
            .with_context(|| format!("Could not record submission {} for {username}", latest.id))?;

        let message = announce::format_submission(username, latest);
        self.notifier
            .send(&message)
            .await
            .with_context(|| format!("Could not announce submission {} for {username}", latest.id))?;

        log::info!("{username}: new submission notified ({})", latest.title);
        Ok(true)
    }

    /// One poll cycle over every user, in order. Failures are logged per user.
    /// Returns how many announcements went out.
    pub async fn tick(&mut self) -> usize {
        let mut notified = 0;

        for username in self.usernames.clone() {
            match self.check_user(&username).await {
                Ok(true) => notified += 1,
                Ok(false) => {}
                Err(err) => log::error!("{username}: {err:#}"),
            }
        }

        notified
    }

    /// Polls on every tick of `ticker` until it stops.
    pub async fn run<T: Ticker>(&mut self, mut ticker: T) {
        log::info!("LeetCode multi-user tracker started");
        log::info!("Users: {}", self.usernames.join(", "));

        while ticker.tick().await {
            let notified = self.tick().await;
            log::debug!("[run] Tick finished, {notified} announcement(s) sent.");
        }
    }
}
