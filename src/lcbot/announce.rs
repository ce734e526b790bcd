//! Telegram-Markdown templates for both announcements.
//!
//! Titles and usernames are inserted verbatim; nothing is escaped.
use chrono::{DateTime, FixedOffset, Utc};

use crate::models::{self, Difficulty, DifficultyTally, UserSummary};

const SUBMISSION_DIVIDER: &str = "━━━━━━━━━━━━━━━━━━";
const SUMMARY_DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━";

pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(models::IST_OFFSET_SECS).expect("IST offset is less than a day")
}

pub fn difficulty_emoji(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "🟢",
        Difficulty::Medium => "🟡",
        Difficulty::Hard => "🔴",
        Difficulty::Unknown => "⚪",
    }
}

pub fn status_emoji(status: &str) -> &'static str {
    if status == models::ACCEPTED { "✅" } else { "❌" }
}

/// e.g. `15 Nov 2023, 3:43 am`
pub fn format_submitted_at(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .with_timezone(&ist())
        .format("%-d %b %Y, %-I:%M %P")
        .to_string()
}

/// e.g. `Wednesday, 15 Nov 2023`
pub fn format_summary_date(now: DateTime<Utc>) -> String {
    now.with_timezone(&ist()).format("%A, %-d %b %Y").to_string()
}

/// Runtime and memory are only worth showing when the feed actually measured them.
fn measured(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty() && *v != "N/A")
}

/// The alert the tracker sends for a user's newest submission.
pub fn format_submission(username: &str, sub: &models::Submission) -> String {
    let mut lines = vec![
        String::from("📊 *LeetCode Submission Alert*"),
        String::from(SUBMISSION_DIVIDER),
        format!("👤 *User:* `{username}`"),
        String::new(),
        String::from("📝 *Problem*"),
        format!("• {}", sub.title),
        String::new(),
        String::from("📌 *Details*"),
        format!("{} *Status:* {}", status_emoji(&sub.status_display), sub.status_display),
        format!("💻 *Language:* {}", sub.language()),
    ];

    if let Some(runtime) = measured(&sub.runtime) {
        lines.push(format!("⏱ *Runtime:* {runtime}"));
    }
    if let Some(memory) = measured(&sub.memory) {
        lines.push(format!("💾 *Memory:* {memory}"));
    }

    lines.extend([
        String::new(),
        String::from("🕒 *Submitted At:*"),
        format!("• {}", format_submitted_at(sub.timestamp)),
        String::new(),
        String::from("🔗 *Submission Link*"),
        format!("👉 https://leetcode.com{}", sub.relative_url()),
    ]);

    lines.join("\n")
}

/// Closing line of the daily summary, picked by how many problems the group solved.
pub fn motivational_footer(group_total: usize) -> String {
    match group_total {
        0 => String::from("😤 No one solved today! Let's bounce back tomorrow! 💥"),
        1..=4 => String::from("💪 Keep grinding! Consistency is key! 🔑"),
        n => format!("🔥 Amazing day! {n} problems crushed! Keep it up! 💪"),
    }
}

/// The single consolidated daily message.
pub fn format_summary(summaries: &[UserSummary], date: &str) -> String {
    let mut lines = vec![
        String::from("📋 *LeetCode Daily Summary*"),
        format!("📅 {date}"),
        String::new(),
    ];

    let mut group = DifficultyTally::default();

    for summary in summaries {
        lines.push(String::from(SUMMARY_DIVIDER));
        lines.push(String::new());
        lines.push(format!("👤 *{}*", summary.username));

        if summary.problems.is_empty() {
            lines.push(String::from("😴 No submissions today"));
            lines.push(String::new());
            continue;
        }

        let tally = summary.tally();
        group += tally;

        lines.push(format!("🧩 *Solved Today:* {}", tally.total));
        lines.push(format!(
            "🟢 Easy: {}  •  🟡 Medium: {}  •  🔴 Hard: {}",
            tally.easy, tally.medium, tally.hard
        ));
        lines.push(String::new());

        for problem in &summary.problems {
            lines.push(format!(
                "  ✅ *{}* {}",
                problem.title,
                difficulty_emoji(problem.difficulty)
            ));
            lines.push(format!(
                "       🔗 [View Problem](https://leetcode.com/problems/{}/)",
                problem.slug
            ));
        }

        lines.push(String::new());
    }

    lines.extend([
        String::from(SUMMARY_DIVIDER),
        String::new(),
        String::from("🏆 *Group Stats*"),
        format!("🧩 *Total Solved:* {}", group.total),
        format!("🟢 {}  •  🟡 {}  •  🔴 {}", group.easy, group.medium, group.hard),
        String::new(),
        motivational_footer(group.total),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SolvedProblem, Submission, SubmissionId};

    fn submission() -> Submission {
        Submission {
            id: SubmissionId::from("42"),
            title: String::from("Two Sum"),
            title_slug: Some(String::from("two-sum")),
            status_display: String::from("Accepted"),
            lang: String::from("rust"),
            lang_name: Some(String::from("Rust")),
            runtime: Some(String::from("0 ms")),
            memory: Some(String::from("2.1 MB")),
            timestamp: 1_700_000_000,
            url: Some(String::from("/submissions/detail/42/")),
        }
    }

    fn solved(title: &str, slug: &str, difficulty: Difficulty) -> SolvedProblem {
        SolvedProblem {
            title: title.to_string(),
            slug: slug.to_string(),
            difficulty,
            url: String::from("/x"),
            timestamp: 0,
        }
    }

    #[test]
    fn emoji_tables_have_fallbacks() {
        assert_eq!(difficulty_emoji(Difficulty::Easy), "🟢");
        assert_eq!(difficulty_emoji(Difficulty::Unknown), "⚪");
        assert_eq!(status_emoji("Accepted"), "✅");
        assert_eq!(status_emoji("Time Limit Exceeded"), "❌");
    }

    #[test]
    fn submitted_at_is_rendered_in_ist() {
        // 1700000000 is 2023-11-14 22:13:20 UTC
        assert_eq!(format_submitted_at(1_700_000_000), "15 Nov 2023, 3:43 am");
    }

    #[test]
    fn summary_date_uses_ist_calendar_day() {
        let late_utc = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(format_summary_date(late_utc), "Wednesday, 15 Nov 2023");
    }

    #[test]
    fn submission_alert_layout() {
        let text = format_submission("alice", &submission());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "📊 *LeetCode Submission Alert*");
        assert_eq!(lines[2], "👤 *User:* `alice`");
        assert_eq!(lines[5], "• Two Sum");
        assert!(text.contains("✅ *Status:* Accepted"));
        assert!(text.contains("💻 *Language:* Rust"));
        assert!(text.contains("⏱ *Runtime:* 0 ms"));
        assert!(text.contains("💾 *Memory:* 2.1 MB"));
        assert_eq!(
            lines.last().copied(),
            Some("👉 https://leetcode.com/submissions/detail/42/")
        );
    }

    #[test]
    fn submission_alert_skips_unmeasured_fields() {
        let mut sub = submission();
        sub.status_display = String::from("Wrong Answer");
        sub.runtime = Some(String::from("N/A"));
        sub.memory = None;

        let text = format_submission("bob", &sub);
        assert!(text.contains("❌ *Status:* Wrong Answer"));
        assert!(!text.contains("Runtime"));
        assert!(!text.contains("Memory"));
    }

    #[test]
    fn titles_pass_through_unescaped() {
        let mut sub = submission();
        sub.title = String::from("Sum_of *Stars* [x]");
        assert!(format_submission("alice", &sub).contains("• Sum_of *Stars* [x]"));
    }

    #[test]
    fn footer_variants() {
        assert!(motivational_footer(0).contains("No one solved today"));
        assert!(motivational_footer(3).contains("Keep grinding"));
        assert!(motivational_footer(4).contains("Keep grinding"));
        assert_eq!(
            motivational_footer(7),
            "🔥 Amazing day! 7 problems crushed! Keep it up! 💪"
        );
        assert!(motivational_footer(5).contains("Amazing day"));
    }

    #[test]
    fn summary_sections_and_group_stats() {
        let summaries = vec![
            UserSummary {
                username: String::from("alice"),
                problems: vec![
                    solved("Two Sum", "two-sum", Difficulty::Easy),
                    solved("LRU Cache", "lru-cache", Difficulty::Medium),
                    solved("Mystery", "mystery", Difficulty::Unknown),
                ],
            },
            UserSummary { username: String::from("bob"), problems: vec![] },
        ];

        let text = format_summary(&summaries, "Monday, 19 Oct 2026");

        assert!(text.starts_with("📋 *LeetCode Daily Summary*\n📅 Monday, 19 Oct 2026\n"));
        assert!(text.contains("👤 *alice*\n🧩 *Solved Today:* 3\n🟢 Easy: 1  •  🟡 Medium: 1  •  🔴 Hard: 0"));
        assert!(text.contains(
            "  ✅ *Two Sum* 🟢\n       🔗 [View Problem](https://leetcode.com/problems/two-sum/)"
        ));
        assert!(text.contains("  ✅ *Mystery* ⚪"));
        assert!(text.contains("👤 *bob*\n😴 No submissions today"));
        assert!(text.contains("🏆 *Group Stats*\n🧩 *Total Solved:* 3\n🟢 1  •  🟡 1  •  🔴 0"));
        assert!(text.ends_with("💪 Keep grinding! Consistency is key! 🔑"));
    }

    #[test]
    fn empty_group_gets_bounce_back_footer() {
        let summaries = vec![UserSummary { username: String::from("alice"), problems: vec![] }];
        let text = format_summary(&summaries, "today");

        assert!(text.contains("🧩 *Total Solved:* 0"));
        assert!(text.ends_with("😤 No one solved today! Let's bounce back tomorrow! 💥"));
    }
}
