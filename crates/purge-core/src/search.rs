//! Paginated author search for one target.
//!
//! The loop walks the search endpoint by offset. Each response is classified:
//!
//! - `200`: append the page, then stop on the first matching guard
//!   (no results, empty page, offset past the total, batch cap) or advance
//!   the offset by the page length.
//! - `202` (index still building) / `429` (rate limited): sleep for the
//!   server's `retry_after` scaled by [`SearchPolicy::retry_after_factor`],
//!   then repeat the same offset.
//! - anything else: stop and keep what was gathered.
//!
//! Transport failures repeat the same offset straight away, with no cap.

use std::time::Duration;

use tokio::time::sleep;

use crate::{
    api::{
        endpoints,
        port::DiscordApi,
        types::{MessageMatch, RetryLater, SearchPage},
    },
    domain::{Target, UserId},
};

#[derive(Clone, Copy, Debug)]
pub struct SearchPolicy {
    /// Stop once *more than* this many hits have been gathered.
    pub max_batch: usize,
    /// Multiplier on the server's `retry_after` seconds.
    pub retry_after_factor: f64,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_batch: 100,
            retry_after_factor: 2.0,
        }
    }
}

impl SearchPolicy {
    /// Time to wait before repeating a request that got `retry_after` seconds.
    ///
    /// Negative and NaN values wait zero; anything too large for a `Duration`
    /// saturates.
    pub fn backoff(&self, retry_after: f64) -> Duration {
        let secs = retry_after * self.retry_after_factor;
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// Why pagination ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// `total_results` was zero.
    NoResults,
    /// The last page carried no hits.
    EmptyPage,
    /// The requested offset was already at or past `total_results`.
    ReachedEnd,
    /// More than `max_batch` hits gathered; the rest waits for the next run.
    BatchCap,
    /// Terminal HTTP status for this target.
    Status(u16),
    /// The body of a 200/202/429 did not decode.
    Decode(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub total_results: u64,
    pub messages: Vec<MessageMatch>,
    pub stop: StopReason,
}

pub async fn search(
    api: &dyn DiscordApi,
    target: &Target,
    author: &UserId,
    policy: SearchPolicy,
) -> SearchResult {
    let mut offset: usize = 0;
    let mut total_results: u64 = 0;
    let mut messages: Vec<MessageMatch> = Vec::new();

    let stop = loop {
        let resp = match api.send(endpoints::search(target, author, offset)).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("Failed to get the messages ({e}). Retrying...");
                continue;
            }
        };

        match resp.status {
            200 => {
                let page: SearchPage = match serde_json::from_str(&resp.body) {
                    Ok(page) => page,
                    Err(e) => break StopReason::Decode(e.to_string()),
                };
                total_results = page.total_results;
                let received = page.messages.len();
                messages.extend(page.messages);

                tracing::info!(
                    "Gathering [{}] messages: {} / {} offset: {}",
                    target.name,
                    messages.len(),
                    total_results,
                    offset
                );

                if total_results == 0 {
                    break StopReason::NoResults;
                } else if received == 0 {
                    break StopReason::EmptyPage;
                } else if offset as u64 >= total_results {
                    break StopReason::ReachedEnd;
                } else if messages.len() > policy.max_batch {
                    break StopReason::BatchCap;
                }
                offset += received;
            }
            202 | 429 => {
                let retry: RetryLater = match serde_json::from_str(&resp.body) {
                    Ok(retry) => retry,
                    Err(e) => break StopReason::Decode(e.to_string()),
                };
                let wait = policy.backoff(retry.retry_after);
                tracing::debug!(
                    "HTTP {} on [{}], waiting {:?} before offset {}",
                    resp.status,
                    target.name,
                    wait,
                    offset
                );
                sleep(wait).await;
            }
            status => break StopReason::Status(status),
        }
    };

    match &stop {
        StopReason::Status(status) => {
            tracing::warn!("Search on [{}] stopped with HTTP {status}", target.name)
        }
        StopReason::Decode(e) => {
            tracing::warn!("Search on [{}] returned an unreadable body: {e}", target.name)
        }
        _ => {}
    }

    SearchResult {
        total_results,
        messages,
        stop,
    }
}
