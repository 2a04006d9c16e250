use crate::github::{Author, Issue, Label, PullRequest};
use chrono::{DateTime, Utc};
use serenity::all::{CreateEmbed, CreateEmbedFooter};
use serenity::model::Timestamp;

/// How much of an item body makes it into the embed description.
pub const BODY_PREVIEW_CHARS: usize = 500;
const NO_DESCRIPTION: &str = "No description provided";

const PULL_COLOR: u32 = 0x2ECC71;
const ISSUE_COLOR: u32 = 0xE74C3C;

/// First 500 characters of the body, with an ellipsis when truncated and a
/// placeholder when the body is missing or empty. Char-indexed so a multibyte
/// body never splits a code point.
pub fn describe_body(body: Option<&str>) -> String {
    match body {
        None | Some("") => NO_DESCRIPTION.to_string(),
        Some(text) => {
            let mut preview: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
            if text.chars().count() > BODY_PREVIEW_CHARS {
                preview.push_str("...");
            }
            preview
        }
    }
}

/// Pull request embed without the timestamp/thumbnail/footer decorations,
/// the shape the one-shot webhook path sends.
pub fn pull_request_summary(repo: &str, pr: &PullRequest) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("🔀 New Pull Request: {}", pr.title))
        .url(pr.html_url.as_str())
        .description(describe_body(pr.body.as_deref()))
        .color(PULL_COLOR)
        .field("Repository", repo, true)
        .field("Author", pr.user.login.as_str(), true)
        .field(
            "Branch",
            format!("{} → {}", pr.head.name, pr.base.name),
            false,
        );

    if let Some(labels) = join_labels(&pr.labels) {
        embed = embed.field("Labels", labels, false);
    }

    embed
}

/// Issue embed without decorations.
pub fn issue_summary(repo: &str, issue: &Issue) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("🐛 New Issue: {}", issue.title))
        .url(issue.html_url.as_str())
        .description(describe_body(issue.body.as_deref()))
        .color(ISSUE_COLOR)
        .field("Repository", repo, true)
        .field("Author", issue.user.login.as_str(), true);

    if let Some(labels) = join_labels(&issue.labels) {
        embed = embed.field("Labels", labels, false);
    }

    embed
}

/// Full channel embed for the polling bot.
pub fn pull_request_embed(repo: &str, pr: &PullRequest) -> CreateEmbed {
    decorate(
        pull_request_summary(repo, pr),
        &pr.user,
        pr.created_at,
        format!("PR #{}", pr.number),
    )
}

/// Full channel embed for the polling bot.
pub fn issue_embed(repo: &str, issue: &Issue) -> CreateEmbed {
    decorate(
        issue_summary(repo, issue),
        &issue.user,
        issue.created_at,
        format!("Issue #{}", issue.number),
    )
}

fn decorate(
    embed: CreateEmbed,
    author: &Author,
    created_at: DateTime<Utc>,
    footer: String,
) -> CreateEmbed {
    let mut embed = embed
        .thumbnail(author.avatar_url.as_str())
        .footer(CreateEmbedFooter::new(footer));
    if let Ok(timestamp) = Timestamp::from_unix_timestamp(created_at.timestamp()) {
        embed = embed.timestamp(timestamp);
    }
    embed
}

fn join_labels(labels: &[Label]) -> Option<String> {
    if labels.is_empty() {
        return None;
    }
    let joined = labels
        .iter()
        .map(|label| label.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::BranchRef;

    fn sample_pull() -> PullRequest {
        PullRequest {
            id: 101,
            number: 7,
            title: "Add frobnicator".to_string(),
            body: Some("Implements the frobnicator.".to_string()),
            html_url: "https://github.com/octocat/hello-world/pull/7".to_string(),
            user: Author {
                login: "octocat".to_string(),
                avatar_url: "https://avatars.example/u/1".to_string(),
            },
            created_at: "2024-03-01T12:00:00Z".parse().unwrap(),
            labels: vec![
                Label {
                    name: "enhancement".to_string(),
                },
                Label {
                    name: "needs-review".to_string(),
                },
            ],
            head: BranchRef {
                name: "feature/frobnicator".to_string(),
            },
            base: BranchRef {
                name: "main".to_string(),
            },
        }
    }

    fn sample_issue() -> Issue {
        Issue {
            id: 202,
            number: 8,
            title: "It is broken".to_string(),
            body: None,
            html_url: "https://github.com/octocat/hello-world/issues/8".to_string(),
            user: Author {
                login: "reporter".to_string(),
                avatar_url: "https://avatars.example/u/2".to_string(),
            },
            created_at: "2024-03-02T09:30:00Z".parse().unwrap(),
            labels: vec![],
            pull_request: None,
        }
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "x".repeat(600);
        let preview = describe_body(Some(&body));
        assert_eq!(preview.len(), BODY_PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
        assert!(preview.starts_with(&"x".repeat(BODY_PREVIEW_CHARS)));
    }

    #[test]
    fn keeps_short_bodies_unmodified() {
        let body = "y".repeat(400);
        assert_eq!(describe_body(Some(&body)), body);
    }

    #[test]
    fn exact_limit_is_not_truncated() {
        let body = "z".repeat(BODY_PREVIEW_CHARS);
        assert_eq!(describe_body(Some(&body)), body);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let body = "é".repeat(600);
        let preview = describe_body(Some(&body));
        assert_eq!(preview.chars().count(), BODY_PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn missing_body_gets_placeholder() {
        assert_eq!(describe_body(None), NO_DESCRIPTION);
        assert_eq!(describe_body(Some("")), NO_DESCRIPTION);
    }

    #[test]
    fn pull_request_embed_shape() {
        let embed = pull_request_embed("octocat/hello-world", &sample_pull());
        let value = serde_json::to_value(&embed).unwrap();

        assert_eq!(value["title"], "🔀 New Pull Request: Add frobnicator");
        assert_eq!(value["url"], "https://github.com/octocat/hello-world/pull/7");
        assert_eq!(value["description"], "Implements the frobnicator.");
        assert_eq!(value["color"].as_u64(), Some(0x2ECC71 as u64));
        assert_eq!(value["footer"]["text"], "PR #7");
        assert_eq!(value["thumbnail"]["url"], "https://avatars.example/u/1");

        let fields = value["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0]["name"], "Repository");
        assert_eq!(fields[0]["value"], "octocat/hello-world");
        assert_eq!(fields[2]["name"], "Branch");
        assert_eq!(fields[2]["value"], "feature/frobnicator → main");
        assert_eq!(fields[3]["name"], "Labels");
        assert_eq!(fields[3]["value"], "enhancement, needs-review");
    }

    #[test]
    fn issue_embed_shape() {
        let embed = issue_embed("octocat/hello-world", &sample_issue());
        let value = serde_json::to_value(&embed).unwrap();

        assert_eq!(value["title"], "🐛 New Issue: It is broken");
        assert_eq!(value["description"], "No description provided");
        assert_eq!(value["color"].as_u64(), Some(0xE74C3C as u64));
        assert_eq!(value["footer"]["text"], "Issue #8");

        // No labels on this one, so only the two shared fields.
        let fields = value["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn summary_embeds_carry_no_decorations() {
        let value = serde_json::to_value(pull_request_summary(
            "octocat/hello-world",
            &sample_pull(),
        ))
        .unwrap();

        assert!(value.get("footer").map_or(true, |v| v.is_null()));
        assert!(value.get("thumbnail").map_or(true, |v| v.is_null()));
        assert!(value.get("timestamp").map_or(true, |v| v.is_null()));
    }
}
