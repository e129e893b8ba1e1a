use thiserror::Error;

/// Failures surfaced by the dashboard client and the theme store.
///
/// None of these are retried: the user re-triggers the request.
#[derive(Debug, Error)]
pub enum DashError {
    /// Network failure before any HTTP status was received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` carries the body's `error` field when present.
    #[error("request failed with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body still reports an `error`.
    #[error("backend reported an error: {0}")]
    Reported(String),

    #[error("failed to decode {what}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// Rejected before any request was sent.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("preference storage failed")]
    Preferences(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashError>;
