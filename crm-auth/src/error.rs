use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Access token expired and no usable refresh token remains.
    #[error("session expired")]
    Expired,

    /// The backend rejected the refresh token. Terminal; the session has
    /// been cleared by the time this is returned.
    #[error("refresh token rejected by the backend")]
    RefreshInvalid,

    /// A refresh attempt performed by another caller failed; the outcome is
    /// shared with everyone who was waiting on it.
    #[error("token refresh failed: {0}")]
    Refresh(String),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("auth endpoint returned {status}: {message}")]
    Http { status: u16, message: String },

    /// None of the supported callback shapes carried tokens.
    #[error("no authentication tokens found in the callback")]
    TokensNotFound,

    #[error("failed to decode identity token: {0}")]
    Decode(String),

    #[error("token storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
