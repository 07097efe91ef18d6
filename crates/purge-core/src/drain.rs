use std::time::Duration;

use tokio::time::sleep;

use crate::{
    api::{endpoints, port::DiscordApi, types::MessageMatch},
    domain::Target,
};

/// Outcome of draining one target's hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Delete requests issued.
    pub attempted: usize,
    /// Of those, how many got a non-2xx or never completed.
    pub failed: usize,
}

impl DrainReport {
    pub fn deleted(&self) -> usize {
        self.attempted - self.failed
    }
}

/// Delete every hit, oldest page first, pausing `delay` after each request.
///
/// Best-effort: a failed delete is counted and skipped, never retried.
pub async fn drain(
    api: &dyn DiscordApi,
    messages: Vec<MessageMatch>,
    target: &Target,
    delay: Duration,
) -> DrainReport {
    let mut report = DrainReport::default();

    for entry in messages {
        let Some(message) = entry.hit() else {
            tracing::warn!("Skipping an empty search hit in [{}]", target.name);
            continue;
        };

        report.attempted += 1;
        let req = endpoints::delete_message(&message.channel_id, &message.id);
        match api.send(req).await {
            Ok(resp) if resp.is_success() => {}
            Ok(resp) => {
                report.failed += 1;
                tracing::debug!("Delete of {} returned HTTP {}", message.id, resp.status);
            }
            Err(e) => {
                report.failed += 1;
                tracing::debug!("Delete of {} failed: {e}", message.id);
            }
        }

        sleep(delay).await;
        tracing::info!("Deleting [{}] {}", target.name, message.content);
    }

    report
}
