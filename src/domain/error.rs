use thiserror::Error;

#[derive(Error, Debug)]
pub enum QtError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown translator: {0}")]
    UnknownTranslator(String),
}

/// Failure of a single provider fetch.
///
/// These never cross the provider boundary as errors; they travel inside
/// [`FetchOutcome::Failed`](crate::domain::model::FetchOutcome::Failed).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, timeout, broken body stream.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx response. Displays as the bare reason phrase.
    #[error("{reason}")]
    Status { code: u16, reason: String },

    /// 2xx response whose body is not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}
