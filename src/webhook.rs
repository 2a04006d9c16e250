use crate::github::{Issue, PullRequest};
use crate::notify;
use serde::Deserialize;
use serenity::all::{CreateEmbed, ExecuteWebhook, Webhook};
use serenity::http::Http;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct EventRepository {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub pull_request: PullRequest,
    pub repository: EventRepository,
}

#[derive(Debug, Deserialize)]
pub struct IssuesEvent {
    pub action: String,
    pub issue: Issue,
    pub repository: EventRepository,
}

/// Build the embed for a raw event payload. Only newly opened pull requests
/// and issues announce anything; every other event kind or action is `None`.
pub fn embed_for_event(event_name: &str, payload: &str) -> anyhow::Result<Option<CreateEmbed>> {
    match event_name {
        "pull_request" => {
            let event: PullRequestEvent = serde_json::from_str(payload)?;
            if event.action != "opened" {
                return Ok(None);
            }
            Ok(Some(notify::pull_request_summary(
                &event.repository.full_name,
                &event.pull_request,
            )))
        }
        "issues" => {
            let event: IssuesEvent = serde_json::from_str(payload)?;
            if event.action != "opened" {
                return Ok(None);
            }
            Ok(Some(notify::issue_summary(
                &event.repository.full_name,
                &event.issue,
            )))
        }
        _ => Ok(None),
    }
}

/// Deliver at most one message for the event to the webhook, then return.
/// Delivery failures propagate to the caller.
pub async fn dispatch(webhook_url: &str, event_name: &str, payload: &str) -> anyhow::Result<()> {
    let Some(embed) = embed_for_event(event_name, payload)? else {
        info!("Nothing to announce for {} event", event_name);
        return Ok(());
    };

    let http = Http::new("");
    let webhook = Webhook::from_url(&http, webhook_url).await?;
    webhook
        .execute(&http, true, ExecuteWebhook::new().embed(embed))
        .await?;

    Ok(())
}
