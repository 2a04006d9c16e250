use crate::config::Config;
use crate::github::{GithubClient, ItemKind};
use crate::notify;
use crate::store::SeenStore;
use serenity::all::{ChannelId, CreateEmbed, CreateMessage};
use serenity::http::Http;
use std::sync::Arc;
use tokio::time::{interval, sleep, Duration};
use tracing::{debug, error, info};

/// Delay between consecutive channel messages within one cycle, so a burst
/// of new items does not trip Discord rate limits.
const MESSAGE_DELAY: Duration = Duration::from_secs(1);

/// Background task that polls one GitHub repository and announces new pull
/// requests and issues in one Discord channel.
pub struct RepoWatcher {
    github: GithubClient,
    store: SeenStore,
    http: Arc<Http>,
    channel_id: ChannelId,
    repo: String,
    poll_interval: Duration,
}

impl RepoWatcher {
    pub fn new(config: &Config, github: GithubClient, store: SeenStore, http: Arc<Http>) -> Self {
        Self {
            github,
            store,
            http,
            channel_id: ChannelId::new(config.channel_id),
            repo: config.github_repo.clone(),
            poll_interval: Duration::from_secs(config.check_interval_secs),
        }
    }

    pub async fn run(self) {
        let mut ticker = interval(self.poll_interval);
        loop {
            ticker.tick().await;
            self.check_repository().await;
        }
    }

    /// One cycle: pull requests, then issues, then persist the seen set.
    /// An unavailable fetch for one kind never blocks the other, and state
    /// is persisted regardless.
    async fn check_repository(&self) {
        debug!("Checking repository: {}", self.repo);

        self.check_pulls().await;
        self.check_issues().await;

        if let Err(e) = self.store.save() {
            error!("Error saving seen items: {}", e);
        }
    }

    async fn check_pulls(&self) {
        let Some(pulls) = self.github.fetch_open_pulls().await else {
            return;
        };

        for pr in self.store.claim_new(ItemKind::PullRequest, pulls) {
            self.deliver(notify::pull_request_embed(&self.repo, &pr))
                .await;
            info!("New PR detected: #{} - {}", pr.number, pr.title);
            sleep(MESSAGE_DELAY).await;
        }
    }

    async fn check_issues(&self) {
        let Some(mut issues) = self.github.fetch_open_issues().await else {
            return;
        };
        // The issues endpoint also returns pull requests.
        issues.retain(|issue| !issue.is_pull_request());

        for issue in self.store.claim_new(ItemKind::Issue, issues) {
            self.deliver(notify::issue_embed(&self.repo, &issue)).await;
            info!("New issue detected: #{} - {}", issue.number, issue.title);
            sleep(MESSAGE_DELAY).await;
        }
    }

    /// Send one embed to the notification channel. Failures are logged and
    /// the item is not re-queued; its ID is already claimed.
    async fn deliver(&self, embed: CreateEmbed) {
        let message = CreateMessage::new().embed(embed);
        if let Err(e) = self.channel_id.send_message(&self.http, message).await {
            error!("Error sending Discord message: {}", e);
        }
    }
}
