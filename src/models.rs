use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Status string the submissions feed uses for a passing submission.
pub const ACCEPTED: &str = "Accepted";

/// Fixed offset (UTC+05:30) every "today" and every timestamp is rendered in.
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// A submission identifier, kept in whatever JSON type the feed used for it.
///
/// Equality is type-sensitive: `"42"` and `42` are different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmissionId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionId::Number(n) => write!(f, "{n}"),
            SubmissionId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for SubmissionId {
    fn from(value: &str) -> Self {
        SubmissionId::Text(value.to_string())
    }
}

impl From<i64> for SubmissionId {
    fn from(value: i64) -> Self {
        SubmissionId::Number(value)
    }
}

/// One record of a user's recent submission feed, as the feed sends it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    pub title: String,
    #[serde(default)]
    pub title_slug: Option<String>,
    #[serde(default)]
    pub status_display: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub lang_name: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub memory: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: i64,
    #[serde(default)]
    pub url: Option<String>,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        self.status_display == ACCEPTED
    }

    /// Human-readable language name, falling back to the short language key.
    pub fn language(&self) -> &str {
        self.lang_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.lang)
    }

    /// The problem's slug. When the feed omits it, it is approximated from the
    /// title: lower-cased, with every whitespace run replaced by a hyphen.
    pub fn slug(&self) -> String {
        match self.title_slug.as_deref() {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => WHITESPACE
                .replace_all(&self.title.to_lowercase(), "-")
                .into_owned(),
        }
    }

    /// Relative link to this submission on the platform.
    pub fn relative_url(&self) -> String {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("/submissions/detail/{}/", self.id),
        }
    }
}

/// The feed is inconsistent about timestamps: some records carry a number,
/// others a numeric string.
fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    #[serde(other)]
    Unknown,
}

/// An accepted problem, deduplicated and enriched for the daily summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedProblem {
    pub title: String,
    pub slug: String,
    pub difficulty: Difficulty,
    pub url: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub username: String,
    pub problems: Vec<SolvedProblem>,
}

impl UserSummary {
    pub fn tally(&self) -> DifficultyTally {
        DifficultyTally::of(&self.problems)
    }
}

/// Solved-problem counts per difficulty. `total` also counts `Unknown`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyTally {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub total: usize,
}

impl DifficultyTally {
    pub fn of(problems: &[SolvedProblem]) -> Self {
        problems.iter().fold(Self::default(), |mut tally, problem| {
            match problem.difficulty {
                Difficulty::Easy => tally.easy += 1,
                Difficulty::Medium => tally.medium += 1,
                Difficulty::Hard => tally.hard += 1,
                Difficulty::Unknown => {}
            }
            tally.total += 1;
            tally
        })
    }
}

impl std::ops::AddAssign for DifficultyTally {
    fn add_assign(&mut self, other: Self) {
        self.easy += other.easy;
        self.medium += other.medium;
        self.hard += other.hard;
        self.total += other.total;
    }
}

impl std::iter::Sum for DifficultyTally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, tally| {
            acc += tally;
            acc
        })
    }
}
