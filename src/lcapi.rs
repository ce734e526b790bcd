use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use std::future::Future;

use crate::models::{self, Difficulty};

/// Where submissions and problem details come from.
pub trait SubmissionSource {
    /// Recent submissions for `username`, most recent first.
    /// An absent or empty feed is an empty list, not an error.
    fn fetch_submissions(&self, username: &str)
        -> impl Future<Output = Result<Vec<models::Submission>>>;

    fn fetch_difficulty(&self, title_slug: &str) -> impl Future<Output = Result<Difficulty>>;
}

#[derive(Deserialize)]
struct ProblemDetail {
    #[serde(default)]
    difficulty: Option<Difficulty>,
}

/// The HTTP client every outbound request goes through.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("leekrelay/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Could not build the HTTP client.")
}

/// Client for the public LeetCode REST proxy.
pub struct LcApi {
    client: Client,
    base: String,
}

impl LcApi {
    pub fn new(base: impl Into<String>) -> Result<Self> {
        Ok(Self { client: http_client()?, base: base.into() })
    }

    fn submissions_url(&self, username: &str) -> String {
        format!("{}/user/{}/submissions", self.base, username)
    }

    fn problem_url(&self, title_slug: &str) -> String {
        format!("{}/{}", self.base, title_slug)
    }
}

impl SubmissionSource for LcApi {
    async fn fetch_submissions(&self, username: &str) -> Result<Vec<models::Submission>> {
        log::trace!("[fetch_submissions] Fetching submissions for {username}...");

        let submissions = self.client
            .get(self.submissions_url(username))
            .send()
            .await
            .with_context(|| format!("Could not reach the submissions feed for {username}"))?
            .error_for_status()
            .with_context(|| format!("Submissions feed rejected the request for {username}"))?
            .json::<Option<Vec<models::Submission>>>()
            .await
            .with_context(|| format!("Couldn't deserialize submissions for {username}"))?
            .unwrap_or_default();

        log::trace!("[fetch_submissions] {} submission(s) for {username}", submissions.len());
        Ok(submissions)
    }

    async fn fetch_difficulty(&self, title_slug: &str) -> Result<Difficulty> {
        let detail = self.client
            .get(self.problem_url(title_slug))
            .send()
            .await
            .with_context(|| format!("Could not reach problem details for {title_slug}"))?
            .error_for_status()
            .with_context(|| format!("Problem lookup rejected for {title_slug}"))?
            .json::<ProblemDetail>()
            .await
            .with_context(|| format!("Malformed problem details for {title_slug}"))?;

        Ok(detail.difficulty.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_proxy_urls() {
        let api = LcApi::new("https://example.test").unwrap();
        assert_eq!(
            api.submissions_url("alice"),
            "https://example.test/user/alice/submissions"
        );
        assert_eq!(api.problem_url("two-sum"), "https://example.test/two-sum");
    }

    #[test]
    fn problem_detail_tolerates_missing_or_null_difficulty() {
        let detail: ProblemDetail = serde_json::from_str(r#"{"title":"Two Sum"}"#).unwrap();
        assert_eq!(detail.difficulty.unwrap_or_default(), Difficulty::Unknown);

        let detail: ProblemDetail = serde_json::from_str(r#"{"difficulty":null}"#).unwrap();
        assert_eq!(detail.difficulty.unwrap_or_default(), Difficulty::Unknown);

        let detail: ProblemDetail = serde_json::from_str(r#"{"difficulty":"Hard"}"#).unwrap();
        assert_eq!(detail.difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn null_feed_is_empty() {
        let feed: Option<Vec<models::Submission>> = serde_json::from_str("null").unwrap();
        assert!(feed.unwrap_or_default().is_empty());
    }
}
