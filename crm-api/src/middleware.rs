use crate::error::ApiError;
use async_trait::async_trait;
use crm_auth::{AuthError, Session};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::sync::Arc;
use tracing::{debug, warn};

/// Endpoints that never carry a bearer header. Matched on the exact path,
/// not by substring, so a resource path that happens to contain "login"
/// still gets authenticated.
const UNAUTHENTICATED_PATHS: [&str; 3] = ["/login", "/signup", "/refresh-token"];

pub(crate) fn requires_auth(path: &str) -> bool {
    !UNAUTHENTICATED_PATHS.contains(&path)
}

/// What the gateway knows about a logical request across attempts.
pub struct RequestContext {
    pub path: String,
    /// Flips false -> true at most once; a request is never replayed twice.
    pub retried: bool,
}

pub enum Verdict {
    Continue,
    /// Replay the request once (the gateway enforces the once).
    Retry,
}

/// Ordered hooks around every request the gateway sends. The auth header
/// and the 401-retry behavior are both middleware so each stays an
/// independently testable unit.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before_send(
        &self,
        _ctx: &RequestContext,
        _headers: &mut HeaderMap,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    async fn on_response(
        &self,
        _ctx: &RequestContext,
        _status: StatusCode,
    ) -> Result<Verdict, ApiError> {
        Ok(Verdict::Continue)
    }
}

/// Attaches `Authorization: Bearer <token>` to authenticated endpoints,
/// refreshing first when the stored token has already expired. Requests
/// without any token go out unauthenticated and let the backend decide.
pub struct BearerAuth {
    session: Arc<Session>,
}

impl BearerAuth {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Middleware for BearerAuth {
    async fn before_send(
        &self,
        ctx: &RequestContext,
        headers: &mut HeaderMap,
    ) -> Result<(), ApiError> {
        if !requires_auth(&ctx.path) {
            return Ok(());
        }
        let Some(mut token) = self.session.access_token() else {
            return Ok(());
        };

        // An expired token must never go out without a refresh attempt.
        if self.session.is_token_expired() {
            debug!(path = %ctx.path, "access token expired, refreshing before send");
            token = match self.session.refresh().await {
                Ok(token) => token,
                Err(AuthError::RefreshInvalid | AuthError::Expired) => {
                    return Err(ApiError::AuthExpired);
                }
                Err(e) => return Err(e.into()),
            };
        }

        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| ApiError::Auth(AuthError::Decode(e.to_string())))?;
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// On a 401 from an authenticated endpoint: one shared refresh, one replay.
/// A second 401 on the replay propagates; an unrecoverable refresh logs the
/// session out and surfaces [`ApiError::AuthExpired`].
pub struct RetryOn401 {
    session: Arc<Session>,
}

impl RetryOn401 {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Middleware for RetryOn401 {
    async fn on_response(
        &self,
        ctx: &RequestContext,
        status: StatusCode,
    ) -> Result<Verdict, ApiError> {
        if status != StatusCode::UNAUTHORIZED || ctx.retried || !requires_auth(&ctx.path) {
            return Ok(Verdict::Continue);
        }

        debug!(path = %ctx.path, "got 401, refreshing token for a single retry");
        match self.session.refresh().await {
            Ok(_) => Ok(Verdict::Retry),
            Err(AuthError::RefreshInvalid | AuthError::Expired) => {
                warn!(path = %ctx.path, "refresh after 401 failed, logging out");
                self.session.logout();
                Err(ApiError::AuthExpired)
            }
            Err(e) => Err(e.into()),
        }
    }
}
