use anyhow::Context;

use purge_core::config::Config;
use purge_discord::DiscordHttpClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    purge_core::logging::init("purge")?;

    let cfg = Config::load().context("invalid configuration")?;
    let api = DiscordHttpClient::new(cfg.api_base.clone(), cfg.discord_token.clone())?;

    let summary = purge_core::run::run(&api, &cfg)
        .await
        .context("purge run aborted")?;
    summary.log();

    Ok(())
}
