use chrono::{DateTime, Utc};
use tokio::time::sleep;

use crate::{
    api::port::DiscordApi,
    config::Config,
    domain::AccountIdentity,
    drain::drain,
    identity::resolve_identity,
    search::{search, SearchPolicy},
    targets::{apply_config, list_targets, TargetCounts},
    Result,
};

/// Aggregate counts for a finished run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub account: AccountIdentity,
    pub targets: usize,
    pub guilds: usize,
    pub direct_messages: usize,
    /// Sum of the `total_results` reported per target.
    pub found: u64,
    pub deleted: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn log(&self) {
        let elapsed = self.finished_at - self.started_at;
        tracing::info!(
            "Done: {} targets, {} messages found, {} deleted, {} failed in {}s",
            self.targets,
            self.found,
            self.deleted,
            self.failed,
            elapsed.num_seconds()
        );
    }
}

/// Resolve the account, list targets, then search and drain each in turn.
///
/// Setup failures (identity, listing) are returned. Per-target failures are
/// logged by the search and drain steps and never stop the run.
pub async fn run(api: &dyn DiscordApi, cfg: &Config) -> Result<RunSummary> {
    let started_at = Utc::now();

    let account = resolve_identity(api).await?;
    let targets = apply_config(list_targets(api).await?, cfg);
    let counts = TargetCounts::of(&targets);
    tracing::info!(
        "Total targets: {} (Guilds: {} | DMs: {})",
        counts.total(),
        counts.guilds,
        counts.direct_messages
    );

    let policy = SearchPolicy {
        max_batch: cfg.max_batch,
        retry_after_factor: cfg.retry_after_factor,
    };

    let mut found: u64 = 0;
    let mut deleted = 0;
    let mut failed = 0;

    for target in &targets {
        tracing::info!("{} {} ID: {}", target.kind.label(), target.name, target.id);

        let result = search(api, target, &account.id, policy).await;
        tracing::info!("Total messages: {}", result.total_results);
        found += result.total_results;

        let report = drain(api, result.messages, target, cfg.delete_delay).await;
        deleted += report.deleted();
        failed += report.failed;

        sleep(cfg.target_delay).await;
    }

    Ok(RunSummary {
        account,
        targets: counts.total(),
        guilds: counts.guilds,
        direct_messages: counts.direct_messages,
        found,
        deleted,
        failed,
        started_at,
        finished_at: Utc::now(),
    })
}
