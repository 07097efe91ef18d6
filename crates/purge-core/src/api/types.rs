use serde::{Deserialize, Serialize};

/// `GET /users/@me`
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
}

/// One entry of `GET /users/@me/guilds`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Guild {
    pub id: String,
    pub name: String,
}

/// One entry of `GET /users/@me/channels`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DmChannel {
    pub id: String,
    #[serde(default)]
    pub recipients: Option<Vec<User>>,
}

/// Body of a 200 from the search endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SearchPage {
    pub total_results: u64,
    #[serde(default)]
    pub messages: Vec<MessageMatch>,
}

/// A single search hit.
///
/// The API wraps every hit in a one-element list (`"messages": [[{..}], [{..}]]`).
/// The wrapper is kept as-is on the wire; [`MessageMatch::hit`] reads element 0.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MessageMatch(pub Vec<Message>);

impl MessageMatch {
    pub fn new(message: Message) -> Self {
        Self(vec![message])
    }

    pub fn hit(&self) -> Option<&Message> {
        self.0.first()
    }
}

/// The fields of a message record the purge actually uses.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    #[serde(default)]
    pub content: String,
}

/// Body of a 202 (index not ready) or 429 (rate limited).
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct RetryLater {
    /// Seconds, possibly fractional.
    pub retry_after: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_page_keeps_nested_hits() {
        let body = json!({
            "total_results": 2,
            "analytics_id": "x",
            "messages": [
                [{"id": "1", "channel_id": "c", "content": "hello", "author": {"id": "u"}}],
                [{"id": "2", "channel_id": "c"}]
            ]
        });
        let page: SearchPage = serde_json::from_value(body).unwrap();
        assert_eq!(page.total_results, 2);
        assert_eq!(page.messages.len(), 2);
        assert_eq!(page.messages[0].hit().unwrap().content, "hello");
        assert_eq!(page.messages[1].hit().unwrap().content, "");
    }

    #[test]
    fn flattened_hits_do_not_decode() {
        let body = json!({
            "total_results": 1,
            "messages": [{"id": "1", "channel_id": "c"}]
        });
        assert!(serde_json::from_value::<SearchPage>(body).is_err());
    }

    #[test]
    fn empty_match_has_no_hit() {
        assert!(MessageMatch::default().hit().is_none());
    }

    #[test]
    fn retry_later_accepts_fractional_seconds() {
        let r: RetryLater =
            serde_json::from_str(r#"{"message":"slow down","retry_after":1.5,"global":false}"#)
                .unwrap();
        assert_eq!(r.retry_after, 1.5);
    }
}
