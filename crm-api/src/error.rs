use crm_auth::AuthError;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response outside the 401-retry path, with whatever message
    /// and details the backend provided.
    #[error("({status}) {message}")]
    Http {
        status: StatusCode,
        message: String,
        details: serde_json::Value,
    },

    /// The request never completed: timeout, refused connection, DNS.
    /// Recoverable; does not invalidate the session.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The access token expired and could not be refreshed. The session has
    /// been logged out by the time this surfaces.
    #[error("session expired, please sign in again")]
    AuthExpired,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Stable status code for user-visible messaging. `0` when the failure
    /// produced no HTTP response at all.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => status.as_u16(),
            ApiError::AuthExpired => 401,
            ApiError::Auth(AuthError::Expired | AuthError::RefreshInvalid) => 401,
            ApiError::Auth(AuthError::Http { status, .. }) => *status,
            ApiError::Network(e) => e.status().map_or(0, |s| s.as_u16()),
            _ => 0,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_)) || matches!(self, ApiError::Auth(AuthError::Network(_)))
    }
}

/// Error body shape used by the backend: `{error, details}`, with `message`
/// seen from some proxies.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    pub(crate) details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub(crate) fn message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "An unknown error occurred".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_keeps_backend_message() {
        let err = ApiError::Http {
            status: StatusCode::CONFLICT,
            message: "contact already exists".to_string(),
            details: serde_json::json!({"field": "email"}),
        };
        assert_eq!(err.status(), 409);
        assert!(err.message().contains("contact already exists"));
    }

    #[test]
    fn auth_expired_reads_as_401() {
        assert_eq!(ApiError::AuthExpired.status(), 401);
    }

    #[test]
    fn error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "nope", "message": "other"}"#).unwrap();
        assert_eq!(body.message(), "nope");

        let body: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(body.message(), "An unknown error occurred");
    }
}
