use crate::domain::{Target, TargetKind, UserId};

use super::port::ApiRequest;

pub const CURRENT_USER: &str = "/users/@me";
pub const CURRENT_USER_GUILDS: &str = "/users/@me/guilds";
pub const CURRENT_USER_CHANNELS: &str = "/users/@me/channels";

/// Search endpoint for a target: guild-wide for guilds, channel-scoped for DMs.
pub fn search_path(target: &Target) -> String {
    let scope = match target.kind {
        TargetKind::Guild => "guilds",
        TargetKind::DirectMessage => "channels",
    };
    format!("/{scope}/{}/messages/search", target.id)
}

pub fn search(target: &Target, author: &UserId, offset: usize) -> ApiRequest {
    ApiRequest::get(search_path(target))
        .with_query("author_id", &author.0)
        .with_query("include_nsfw", "true")
        .with_query("offset", offset)
}

pub fn delete_message(channel_id: &str, message_id: &str) -> ApiRequest {
    ApiRequest::delete(format!("/channels/{channel_id}/messages/{message_id}"))
}
