use super::Settings;
use crate::common::CallbackTokens;
use crate::error::AuthError;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// Extract a token bundle from a login redirect URL.
///
/// Three shapes are supported, tried in priority order:
/// 1. tokens passed directly as query parameters,
/// 2. an authorization `code` (+ `state`) exchanged with the backend
///    callback endpoint,
/// 3. tokens in the URL fragment (implicit flow).
///
/// Anything else is a dead end surfaced as [`AuthError::TokensNotFound`];
/// the user has to start the login over, there is nothing to retry here.
pub async fn extract_tokens(
    url: &Url,
    http: &reqwest::Client,
    settings: &Settings,
) -> Result<CallbackTokens, AuthError> {
    let query: HashMap<String, String> = url.query_pairs().into_owned().collect();

    if let Some(tokens) = bundle_from(&query) {
        debug!("callback carried tokens in the query string");
        return Ok(tokens);
    }

    if query.contains_key("code") {
        debug!("callback carried an authorization code, exchanging it");
        return exchange_code(url, http, settings).await;
    }

    if let Some(fragment) = url.fragment() {
        let params: HashMap<String, String> =
            url::form_urlencoded::parse(fragment.as_bytes()).into_owned().collect();
        if let Some(tokens) = bundle_from(&params) {
            debug!("callback carried tokens in the fragment");
            return Ok(tokens);
        }
    }

    Err(AuthError::TokensNotFound)
}

async fn exchange_code(
    url: &Url,
    http: &reqwest::Client,
    settings: &Settings,
) -> Result<CallbackTokens, AuthError> {
    let exchange_url = format!(
        "{}?{}",
        settings.callback_url(),
        url.query().unwrap_or_default()
    );

    let response = http.get(&exchange_url).send().await.map_err(AuthError::Network)?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(AuthError::Http {
            status: status.as_u16(),
            message,
        });
    }

    response.json().await.map_err(AuthError::Network)
}

fn bundle_from(params: &HashMap<String, String>) -> Option<CallbackTokens> {
    let access_token = params.get("access_token")?.clone();
    Some(CallbackTokens {
        access_token,
        refresh_token: params.get("refresh_token").cloned(),
        id_token: params.get("id_token").cloned(),
        expires_in: params.get("expires_in").and_then(|v| v.parse().ok()),
    })
}
