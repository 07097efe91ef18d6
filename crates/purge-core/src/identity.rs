use crate::{
    api::{
        endpoints,
        port::{ApiRequest, DiscordApi},
        types::User,
    },
    domain::{AccountIdentity, UserId},
    errors::Error,
    Result,
};

/// Fetch the account the token belongs to.
///
/// Never retried: without the author id there is nothing to search for, so
/// any failure here should abort the run.
pub async fn resolve_identity(api: &dyn DiscordApi) -> Result<AccountIdentity> {
    let resp = match api.send(ApiRequest::get(endpoints::CURRENT_USER)).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!("Account: failed to log in: {e}");
            return Err(Error::Auth(e.to_string()));
        }
    };

    if !resp.is_success() {
        tracing::error!("Account: failed to log in (HTTP {})", resp.status);
        return Err(Error::Auth(format!(
            "{} returned HTTP {}",
            endpoints::CURRENT_USER,
            resp.status
        )));
    }

    let user: User = serde_json::from_str(&resp.body)?;
    let display_name = user
        .global_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| user.username.clone());
    tracing::info!("Account: logged in as {display_name}");

    Ok(AccountIdentity {
        id: UserId(user.id),
        username: user.username,
        display_name,
    })
}
