use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub channel_id: u64,
    pub github_repo: String,
    pub github_token: Option<String>,
    pub check_interval_secs: u64,
    pub seen_file: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::build()
    }

    fn build() -> anyhow::Result<Self> {
        let github_repo = env::var("GITHUB_REPO")
            .map_err(|_| anyhow::anyhow!("GITHUB_REPO must be set (format: owner/repo)"))?;
        if !github_repo.contains('/') {
            return Err(anyhow::anyhow!(
                "GITHUB_REPO must be in owner/repo format, got '{}'",
                github_repo
            ));
        }

        Ok(Config {
            discord_token: env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| anyhow::anyhow!("DISCORD_BOT_TOKEN must be set"))?,
            channel_id: env::var("DISCORD_CHANNEL_ID")
                .map_err(|_| anyhow::anyhow!("DISCORD_CHANNEL_ID must be set"))?
                .parse()
                .map_err(|_| anyhow::anyhow!("DISCORD_CHANNEL_ID must be a valid u64"))?,
            github_repo,
            // Optional; raises the GitHub rate-limit ceiling when present.
            github_token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            check_interval_secs: env::var("CHECK_INTERVAL")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
            seen_file: env::var("SEEN_FILE").unwrap_or_else(|_| "seen_items.json".to_string()),
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"[REDACTED]")
            .field("channel_id", &self.channel_id)
            .field("github_repo", &self.github_repo)
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("check_interval_secs", &self.check_interval_secs)
            .field("seen_file", &self.seen_file)
            .finish()
    }
}
