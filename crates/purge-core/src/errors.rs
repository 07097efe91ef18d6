/// Core error type.
///
/// Adapter crates map their transport errors into [`Error::Transport`] so the
/// orchestrator can tell setup failures from per-target ones.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("{endpoint} returned HTTP {status}")]
    Api { endpoint: String, status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
