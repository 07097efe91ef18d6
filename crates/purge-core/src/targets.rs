use std::collections::HashSet;

use serde::de::DeserializeOwned;

use crate::{
    api::{
        endpoints,
        port::{ApiRequest, DiscordApi},
        types::{DmChannel, Guild},
    },
    config::Config,
    domain::{Target, TargetKind},
    errors::Error,
    Result,
};

/// Display name for a DM channel with no recipients.
pub const DM_FALLBACK_NAME: &str = "Direct Message Channel";

/// List every conversation the account can purge: guilds first, then DMs.
///
/// There is no partial mode; either listing failing fails the whole call.
pub async fn list_targets(api: &dyn DiscordApi) -> Result<Vec<Target>> {
    let guilds: Vec<Guild> = fetch_list(api, endpoints::CURRENT_USER_GUILDS).await?;
    let channels: Vec<DmChannel> = fetch_list(api, endpoints::CURRENT_USER_CHANNELS).await?;

    let mut targets: Vec<Target> = guilds
        .into_iter()
        .map(|g| Target::guild(g.id, g.name))
        .collect();
    targets.extend(channels.into_iter().map(dm_target));
    Ok(targets)
}

fn dm_target(dm: DmChannel) -> Target {
    let name = dm
        .recipients
        .unwrap_or_default()
        .into_iter()
        .map(|u| u.username)
        .collect::<Vec<_>>()
        .join(", ");
    let name = if name.is_empty() {
        DM_FALLBACK_NAME.to_string()
    } else {
        name
    };
    Target::direct_message(dm.id, name)
}

async fn fetch_list<T: DeserializeOwned>(api: &dyn DiscordApi, path: &str) -> Result<Vec<T>> {
    let resp = api.send(ApiRequest::get(path)).await?;
    if !resp.is_success() {
        return Err(Error::Api {
            endpoint: path.to_string(),
            status: resp.status,
        });
    }
    Ok(serde_json::from_str(&resp.body)?)
}

/// Drop targets whose id is listed.
pub fn exclude(targets: Vec<Target>, ids: &[String]) -> Vec<Target> {
    if ids.is_empty() {
        return targets;
    }
    let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();
    targets
        .into_iter()
        .filter(|t| !ids.contains(t.id.as_str()))
        .collect()
}

/// Move listed targets to the front. Both halves keep their arrival order;
/// the order of `ids` itself is not a ranking.
pub fn prioritize(targets: Vec<Target>, ids: &[String]) -> Vec<Target> {
    if ids.is_empty() {
        return targets;
    }
    let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let (mut first, rest): (Vec<Target>, Vec<Target>) = targets
        .into_iter()
        .partition(|t| ids.contains(t.id.as_str()));
    first.extend(rest);
    first
}

/// Exclusion, then prioritization, as configured.
pub fn apply_config(targets: Vec<Target>, cfg: &Config) -> Vec<Target> {
    prioritize(exclude(targets, &cfg.exclude_targets), &cfg.prioritized_targets)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetCounts {
    pub guilds: usize,
    pub direct_messages: usize,
}

impl TargetCounts {
    pub fn of(targets: &[Target]) -> Self {
        let guilds = targets
            .iter()
            .filter(|t| t.kind == TargetKind::Guild)
            .count();
        Self {
            guilds,
            direct_messages: targets.len() - guilds,
        }
    }

    pub fn total(&self) -> usize {
        self.guilds + self.direct_messages
    }
}
