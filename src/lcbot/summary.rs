use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use itertools::Itertools;

use crate::lcapi::SubmissionSource;
use crate::lcbot::{announce, telegram::Notifier};
use crate::models::{self, Difficulty, SolvedProblem, UserSummary};

const DAY_IN_SECS: i64 = 86_400;

/// Half-open `[start, end)` range of epoch seconds covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start: i64,
    pub end: i64,
}

impl DayRange {
    pub fn contains(&self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp < self.end
    }
}

/// The calendar day containing `now`, as seen from `offset`.
pub fn today_range(now: DateTime<Utc>, offset: FixedOffset) -> DayRange {
    let shift = i64::from(offset.local_minus_utc());
    let local_midnight = (now.timestamp() + shift).div_euclid(DAY_IN_SECS) * DAY_IN_SECS;
    let start = local_midnight - shift;

    DayRange { start, end: start + DAY_IN_SECS }
}

/// Accepted submissions made within `range`, in feed order.
pub fn todays_accepted(submissions: &[models::Submission], range: DayRange) -> Vec<&models::Submission> {
    submissions
        .iter()
        .filter(|sub| range.contains(sub.timestamp) && sub.is_accepted())
        .collect()
}

/// Keeps the first submission seen for each problem slug, in input order.
pub fn dedup_by_slug<'a, I>(submissions: I) -> Vec<(String, &'a models::Submission)>
where
    I: IntoIterator<Item = &'a models::Submission>,
{
    submissions
        .into_iter()
        .map(|sub| (sub.slug(), sub))
        .unique_by(|(slug, _)| slug.clone())
        .collect()
}

/// Today's distinct accepted problems for one user, earliest first.
///
/// A feed that can't be fetched counts as no submissions; a difficulty that
/// can't be looked up counts as `Unknown`.
pub async fn summarize_user<S: SubmissionSource>(
    source: &S,
    username: &str,
    range: DayRange,
) -> UserSummary {
    let submissions = source
        .fetch_submissions(username)
        .await
        .unwrap_or_else(|err| {
            log::error!("Failed to fetch submissions for {username}: {err:#}");
            Vec::new()
        });

    let mut problems = Vec::new();
    for (slug, sub) in dedup_by_slug(todays_accepted(&submissions, range)) {
        let difficulty = source.fetch_difficulty(&slug).await.unwrap_or_else(|err| {
            log::warn!("[summarize_user] Difficulty lookup failed for {slug}: {err:#}");
            Difficulty::Unknown
        });

        problems.push(SolvedProblem {
            title: sub.title.clone(),
            slug,
            difficulty,
            url: sub.relative_url(),
            timestamp: sub.timestamp,
        });
    }

    problems.sort_by_key(|problem| problem.timestamp);

    UserSummary { username: username.to_string(), problems }
}

/// Builds and sends the one daily summary message. Returns the text that was sent.
pub async fn run_daily_summary<S, N>(
    source: &S,
    notifier: &N,
    usernames: &[String],
    now: DateTime<Utc>,
) -> Result<String>
where
    S: SubmissionSource,
    N: Notifier,
{
    log::info!("Daily summary generator started");
    log::info!("Users: {}", usernames.join(", "));

    let range = today_range(now, announce::ist());
    let mut summaries = Vec::with_capacity(usernames.len());

    for username in usernames {
        log::info!("Fetching data for {username}...");
        let summary = summarize_user(source, username, range).await;
        log::info!("  -> {} problem(s) solved today", summary.problems.len());
        summaries.push(summary);
    }

    let message = announce::format_summary(&summaries, &announce::format_summary_date(now));
    log::info!("--- Preview ---\n{message}\n--- End Preview ---");

    notifier
        .send(&message)
        .await
        .context("Could not deliver the daily summary.")?;

    log::info!("Daily summary sent to Telegram!");
    Ok(message)
}
