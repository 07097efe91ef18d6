use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tokio::time::Instant;

use crate::{
    api::{
        port::{ApiRequest, ApiResponse, DiscordApi},
        types::{Message, MessageMatch},
    },
    Result,
};

type Handler = Box<dyn Fn(&ApiRequest, usize) -> Result<ApiResponse> + Send + Sync>;

/// Scripted `DiscordApi`. The handler sees each request and its call index.
pub struct FakeApi {
    handler: Handler,
    calls: Mutex<Vec<(Instant, ApiRequest)>>,
}

impl FakeApi {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest, usize) -> Result<ApiResponse> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }

    pub fn timed_requests(&self) -> Vec<(Instant, ApiRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn offsets(&self) -> Vec<usize> {
        self.requests()
            .iter()
            .filter_map(|r| r.query_value("offset"))
            .map(|v| v.parse().unwrap())
            .collect()
    }
}

#[async_trait]
impl DiscordApi for FakeApi {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse> {
        let idx = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((Instant::now(), req.clone()));
            calls.len() - 1
        };
        (self.handler)(&req, idx)
    }
}

pub fn message(id: &str, channel_id: &str, content: &str) -> Message {
    Message {
        id: id.to_string(),
        channel_id: channel_id.to_string(),
        content: content.to_string(),
    }
}

/// A 200 search page with `count` hits numbered from `first_id`.
pub fn page(total_results: u64, first_id: usize, count: usize) -> ApiResponse {
    let messages: Vec<MessageMatch> = (first_id..first_id + count)
        .map(|i| MessageMatch::new(message(&i.to_string(), "c1", &format!("msg {i}"))))
        .collect();
    ApiResponse::new(
        200,
        json!({ "total_results": total_results, "messages": messages }).to_string(),
    )
}

pub fn retry_later(status: u16, retry_after: f64) -> ApiResponse {
    ApiResponse::new(status, json!({ "retry_after": retry_after }).to_string())
}
