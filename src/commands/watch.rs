use crate::{Context, Error};
use tracing::{error, info};

/// Show what the bot is monitoring and how much it has tracked
#[poise::command(slash_command)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    // Only answer in the notification channel.
    if ctx.channel_id().get() != data.config.channel_id {
        return Ok(());
    }

    let (prs, issues) = data.store.counts();
    ctx.say(format!(
        "✅ Monitoring **{}**\n📊 Tracking {} PRs and {} issues\n⏱️ Checking every {} seconds",
        data.config.github_repo, prs, issues, data.config.check_interval_secs
    ))
    .await?;

    Ok(())
}

/// Reset item tracking so all open PRs and issues are announced again (Admin only)
#[poise::command(slash_command, required_permissions = "ADMINISTRATOR", guild_only)]
pub async fn reset(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    if ctx.channel_id().get() != data.config.channel_id {
        return Ok(());
    }

    data.store.reset();
    if let Err(e) = data.store.save() {
        error!("Error saving cleared seen items: {}", e);
    }
    info!("Seen-item tracking reset by {}", ctx.author().name);

    ctx.say("🔄 Tracking reset! Will notify about all current open PRs and issues on next check.")
        .await?;

    Ok(())
}
