//! In-memory stand-ins for the network collaborators.
use anyhow::{Result, anyhow};

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::lcapi::SubmissionSource;
use crate::lcbot::telegram::Notifier;
use crate::lcbot::tracker::Ticker;
use crate::models::{Difficulty, Submission, SubmissionId};

pub fn submission(id: &str, title: &str, status: &str, timestamp: i64) -> Submission {
    Submission {
        id: SubmissionId::from(id),
        title: title.to_string(),
        title_slug: None,
        status_display: status.to_string(),
        lang: String::from("python3"),
        lang_name: Some(String::from("Python3")),
        runtime: None,
        memory: None,
        timestamp,
        url: Some(format!("/submissions/detail/{id}/")),
    }
}

#[derive(Default)]
pub struct FakeSource {
    feeds: RefCell<HashMap<String, Vec<Submission>>>,
    broken_users: HashSet<String>,
    difficulties: HashMap<String, Difficulty>,
    pub fetches: RefCell<Vec<String>>,
    pub lookups: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn with_feed(self, username: &str, feed: Vec<Submission>) -> Self {
        self.set_feed(username, feed);
        self
    }

    pub fn with_broken_user(mut self, username: &str) -> Self {
        self.broken_users.insert(username.to_string());
        self
    }

    pub fn with_difficulty(mut self, slug: &str, difficulty: Difficulty) -> Self {
        self.difficulties.insert(slug.to_string(), difficulty);
        self
    }

    pub fn set_feed(&self, username: &str, feed: Vec<Submission>) {
        self.feeds.borrow_mut().insert(username.to_string(), feed);
    }
}

impl SubmissionSource for FakeSource {
    async fn fetch_submissions(&self, username: &str) -> Result<Vec<Submission>> {
        self.fetches.borrow_mut().push(username.to_string());
        if self.broken_users.contains(username) {
            return Err(anyhow!("feed unavailable for {username}"));
        }
        Ok(self.feeds.borrow().get(username).cloned().unwrap_or_default())
    }

    async fn fetch_difficulty(&self, title_slug: &str) -> Result<Difficulty> {
        self.lookups.borrow_mut().push(title_slug.to_string());
        self.difficulties
            .get(title_slug)
            .copied()
            .ok_or_else(|| anyhow!("no such problem: {title_slug}"))
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    pub sent: RefCell<Vec<String>>,
    pub failing: bool,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }
}

impl Notifier for FakeNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        if self.failing {
            return Err(anyhow!("chat unreachable"));
        }
        self.sent.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// Fires a fixed number of ticks immediately, then stops the loop.
pub struct CountingTicker {
    pub remaining: usize,
}

impl Ticker for CountingTicker {
    async fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
