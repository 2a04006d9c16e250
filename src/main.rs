use githerald::commands::watch;
use githerald::github::GithubClient;
use githerald::store::SeenStore;
use githerald::watcher::RepoWatcher;
use githerald::{config::Config, Data};
use poise::serenity_prelude as serenity;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    let discord_token = config.discord_token.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![watch::status(), watch::reset()],
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                info!("Bot is ready!");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                ctx.set_activity(Some(serenity::ActivityData::watching(&config.github_repo)));

                info!("Monitoring repository: {}", config.github_repo);
                info!("Notification channel ID: {}", config.channel_id);
                info!("Check interval: {} seconds", config.check_interval_secs);

                // Load previously seen items and start the monitoring task
                let store = SeenStore::load(&config.seen_file);
                let github = GithubClient::new(&config);
                let watcher = RepoWatcher::new(&config, github, store.clone(), ctx.http.clone());
                tokio::spawn(watcher.run());

                Ok(Data { config, store })
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    let mut client = serenity::ClientBuilder::new(&discord_token, intents)
        .framework(framework)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create client: {}", e))?;

    info!("Starting bot...");
    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    Ok(())
}
