use std::env;
use std::fs;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let webhook_url =
        env::var("DISCORD_WEBHOOK").map_err(|_| anyhow::anyhow!("DISCORD_WEBHOOK must be set"))?;
    let event_name = env::var("GITHUB_EVENT_NAME")
        .map_err(|_| anyhow::anyhow!("GITHUB_EVENT_NAME must be set"))?;
    let event_path = env::var("GITHUB_EVENT_PATH")
        .map_err(|_| anyhow::anyhow!("GITHUB_EVENT_PATH must be set"))?;

    let payload = fs::read_to_string(&event_path)
        .map_err(|e| anyhow::anyhow!("Failed to read event payload {}: {}", event_path, e))?;

    githerald::webhook::dispatch(&webhook_url, &event_name, &payload).await?;
    info!("Processed {} event", event_name);

    Ok(())
}
