use crate::config::Config;
use chrono::{DateTime, Utc};
use reqwest::header;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{error, warn};

const GITHUB_API: &str = "https://api.github.com";
/// Listing window per poll. A burst of more than this many new items between
/// two polls silently misses the overflow.
const PER_PAGE: u8 = 10;
const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub login: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
    pub user: Author,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub head: BranchRef,
    pub base: BranchRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
    pub user: Author,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Present when the issues endpoint hands back a pull request in
    /// issue clothing.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    PullRequest,
    Issue,
}

/// Anything with a stable upstream identifier the seen-item store can track.
pub trait TrackedItem {
    fn id(&self) -> u64;
}

impl TrackedItem for PullRequest {
    fn id(&self) -> u64 {
        self.id
    }
}

impl TrackedItem for Issue {
    fn id(&self) -> u64 {
        self.id
    }
}

pub struct GithubClient {
    http: reqwest::Client,
    repo: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            repo: config.github_repo.clone(),
            token: config.github_token.clone(),
        }
    }

    pub async fn fetch_open_pulls(&self) -> Option<Vec<PullRequest>> {
        self.list_open("pulls").await
    }

    pub async fn fetch_open_issues(&self) -> Option<Vec<Issue>> {
        self.list_open("issues").await
    }

    /// One GET against the listing endpoint for `resource`, newest first.
    /// Returns `None` when the listing is unavailable this cycle; the caller
    /// skips that resource kind rather than treating it as empty.
    async fn list_open<T: DeserializeOwned>(&self, resource: &str) -> Option<Vec<T>> {
        let url = format!(
            "{GITHUB_API}/repos/{}/{resource}?state=open&sort=created&direction=desc&per_page={PER_PAGE}",
            self.repo
        );

        let mut request = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .header(header::USER_AGENT, APP_USER_AGENT);
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("token {token}"));
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Error fetching {} from GitHub: {}", resource, e);
                return None;
            }
        };

        let status = response.status();
        if status == StatusCode::OK {
            match response.json::<Vec<T>>().await {
                Ok(items) => Some(items),
                Err(e) => {
                    error!("Failed to decode GitHub {} listing: {}", resource, e);
                    None
                }
            }
        } else if status == StatusCode::FORBIDDEN {
            warn!(
                "GitHub rate limit exceeded fetching {}. Consider setting GITHUB_TOKEN to increase limits.",
                resource
            );
            None
        } else {
            warn!("GitHub API error fetching {}: {}", resource, status);
            None
        }
    }
}
