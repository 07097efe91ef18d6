//! Discord REST adapter.
//!
//! Implements the core `DiscordApi` port over `reqwest`. The user token is sent
//! verbatim in `Authorization` (no `Bot`/`Bearer` prefix).

use async_trait::async_trait;
use purge_core::{
    api::port::{ApiRequest, ApiResponse, DiscordApi, Method},
    errors::Error,
    Result,
};

const USER_AGENT: &str = "purge-rust/0.1";

#[derive(Clone, Debug)]
pub struct DiscordHttpClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl DiscordHttpClient {
    /// No request timeout is set; a stalled request fails only when the
    /// connection does.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Transport(format!("http client build error: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DiscordApi for DiscordHttpClient {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&req.path);
        let builder = match req.method {
            Method::Get => self.http.get(&url),
            Method::Delete => self.http.delete(&url),
        };

        let resp = builder
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .query(&req.query)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("{} {url}: {e}", method_name(req.method))))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Transport(format!("reading body of {url}: {e}")))?;

        Ok(ApiResponse { status, body })
    }
}

fn method_name(method: Method) -> &'static str {
    match method {
        Method::Get => "GET",
        Method::Delete => "DELETE",
    }
}
