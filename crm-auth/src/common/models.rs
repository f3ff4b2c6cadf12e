use serde::{Deserialize, Serialize};

/// Token bundle extracted from a login callback (query, code exchange or
/// fragment) and fed into the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    /// Lifetime of the access token in seconds. Defaults to one hour when
    /// the provider omits it.
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub id_token: Option<String>,
    pub expires_in: Option<u64>,
}

/// Profile claims carried by the identity token or returned by `/users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub sub: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(flatten)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}
