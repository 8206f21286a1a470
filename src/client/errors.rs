#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("API_URL must be set")]
    MissingBaseUrl,
    #[error("session storage failure: {0}")]
    Storage(#[from] std::io::Error),
    #[error("session data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    /// The API answered 401; the stored session has been cleared.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Any other non-2xx answer, with the `error` field of the body.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[cfg(feature = "client")]
    #[error("HTTP failure: {0}")]
    Http(#[from] reqwest::Error),
}
