use super::scheduler::RefreshScheduler;
use super::token_storage::TokenStore;
use super::{callback, id_token, Settings};
use crate::common::{CallbackTokens, RefreshRequest, RefreshResponse, UserProfile};
use crate::error::AuthError;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use reqwest::StatusCode;
use std::sync::{Arc, RwLock, Weak};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use url::Url;

const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;
/// Ceiling for backend-supplied token lifetimes (one year). Values past
/// this would overflow `TimeDelta`.
const MAX_EXPIRES_IN_SECS: u64 = 365 * 24 * 3600;

fn expiry_from(expires_in: u64) -> DateTime<Utc> {
    let capped = expires_in.min(MAX_EXPIRES_IN_SECS) as i64;
    Utc::now() + TimeDelta::seconds(capped)
}

/// Lifecycle of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No credentials, or credentials present but no resolved user.
    #[default]
    Anonymous,
    /// Credentials accepted, user resolution in flight.
    Authenticating,
    /// Credentials and a resolved user.
    Authenticated,
}

#[derive(Debug, Default, Clone)]
struct SessionTokens {
    access_token: Option<String>,
    refresh_token: Option<String>,
    id_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl SessionTokens {
    fn load(store: &TokenStore) -> Self {
        let expires_at = store
            .get(TokenStore::TOKEN_EXPIRY)
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single());

        Self {
            access_token: store.get(TokenStore::ACCESS_TOKEN),
            refresh_token: store.get(TokenStore::REFRESH_TOKEN),
            id_token: store.get(TokenStore::ID_TOKEN),
            expires_at,
        }
    }
}

#[derive(Default)]
struct SessionInner {
    tokens: SessionTokens,
    current_user: Option<UserProfile>,
    state: AuthState,
}

/// Outcome of the most recent refresh attempt, shared with every caller
/// that was waiting on it so a 401 storm produces exactly one refresh call.
#[derive(Debug, Clone)]
enum RefreshOutcome {
    Success(String),
    Invalid,
    Expired,
    Failed(String),
}

impl RefreshOutcome {
    fn to_result(&self) -> Result<String, AuthError> {
        match self {
            RefreshOutcome::Success(token) => Ok(token.clone()),
            RefreshOutcome::Invalid => Err(AuthError::RefreshInvalid),
            RefreshOutcome::Expired => Err(AuthError::Expired),
            RefreshOutcome::Failed(message) => Err(AuthError::Refresh(message.clone())),
        }
    }
}

/// The authenticated session: single source of truth for tokens and the
/// current user, injected into the request gateway rather than shared as
/// ambient global state.
pub struct Session {
    weak: Weak<Session>,
    settings: Settings,
    store: TokenStore,
    http: reqwest::Client,
    scheduler: RefreshScheduler,
    inner: RwLock<SessionInner>,
    /// Serializes refresh attempts. Holds the outcome of the last one so
    /// callers that queued up behind an attempt can share it.
    refresh_gate: tokio::sync::Mutex<Option<RefreshOutcome>>,
    /// Bumped after every completed refresh attempt, success or not.
    refresh_epoch: std::sync::atomic::AtomicU64,
    state_tx: watch::Sender<AuthState>,
}

impl Session {
    pub fn new(settings: Settings, store: TokenStore) -> Arc<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .expect("Failed to create HTTP client");

        let (state_tx, _) = watch::channel(AuthState::Anonymous);
        let scheduler = RefreshScheduler::new(settings.refresh_lead());

        Arc::new_cyclic(|weak| Self {
            weak: weak.clone(),
            settings,
            store,
            http,
            scheduler,
            inner: RwLock::new(SessionInner::default()),
            refresh_gate: tokio::sync::Mutex::new(None),
            refresh_epoch: std::sync::atomic::AtomicU64::new(0),
            state_tx,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().tokens.access_token.clone()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.read().current_user.clone()
    }

    pub fn state(&self) -> AuthState {
        self.read().state
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().current_user.is_some()
    }

    /// True when the access token must not be used without a refresh first:
    /// expiry unknown, or already reached.
    pub fn is_token_expired(&self) -> bool {
        match self.read().tokens.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => true,
        }
    }

    /// Watch auth state transitions. The receiver starts at the current
    /// state and sees every change from then on.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state_tx.subscribe()
    }

    /// Load persisted tokens into memory without contacting the backend.
    /// The user stays unresolved and no timer is armed; request middleware
    /// can still attach and refresh the credentials on demand.
    pub fn load_tokens(&self) {
        self.write().tokens = SessionTokens::load(&self.store);
    }

    /// Restore a persisted session and try to resolve the current user.
    ///
    /// A 401 from `/users/me` gets exactly one refresh-then-retry; a
    /// rejected refresh clears the session. Transient failures keep the
    /// stored tokens and merely leave the user unresolved, so flaky
    /// networks don't log people out.
    pub async fn bootstrap(&self) -> AuthState {
        let tokens = SessionTokens::load(&self.store);
        if tokens.access_token.is_none() {
            debug!("no stored session");
            self.set_state(AuthState::Anonymous);
            return AuthState::Anonymous;
        }

        let expires_at = tokens.expires_at;
        {
            let mut inner = self.write();
            inner.tokens = tokens;
            inner.state = AuthState::Authenticating;
        }
        self.notify();
        if let Some(expires_at) = expires_at {
            self.scheduler.arm(self.weak.clone(), expires_at);
        }

        match self.resolve_user().await {
            Ok(user) => {
                info!("session restored");
                let mut inner = self.write();
                inner.current_user = Some(user);
                inner.state = AuthState::Authenticated;
                drop(inner);
                self.notify();
                AuthState::Authenticated
            }
            Err(AuthError::Expired) | Err(AuthError::RefreshInvalid) => {
                info!("stored session is no longer valid");
                self.clear_session();
                AuthState::Anonymous
            }
            Err(e) => {
                warn!(error = %e, "could not resolve user, keeping stored tokens");
                self.set_state(AuthState::Anonymous);
                AuthState::Anonymous
            }
        }
    }

    /// Extract tokens from a login redirect URL and apply them.
    pub async fn handle_callback(&self, url: &Url) -> Result<AuthState, AuthError> {
        let tokens = callback::extract_tokens(url, &self.http, &self.settings).await?;
        self.apply_callback(tokens).await
    }

    /// Accept a token bundle from the login callback: persist it, arm the
    /// refresh timer and resolve the user (from the identity token when it
    /// decodes, from `/users/me` otherwise).
    pub async fn apply_callback(&self, tokens: CallbackTokens) -> Result<AuthState, AuthError> {
        let expires_at = expiry_from(tokens.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS));

        self.store.set(TokenStore::ACCESS_TOKEN, &tokens.access_token)?;
        if let Some(refresh_token) = &tokens.refresh_token {
            self.store.set(TokenStore::REFRESH_TOKEN, refresh_token)?;
        }
        if let Some(id_token) = &tokens.id_token {
            self.store.set(TokenStore::ID_TOKEN, id_token)?;
        }
        self.store
            .set(TokenStore::TOKEN_EXPIRY, &expires_at.timestamp_millis().to_string())?;

        {
            let mut inner = self.write();
            inner.tokens = SessionTokens {
                access_token: Some(tokens.access_token.clone()),
                refresh_token: tokens.refresh_token.clone(),
                id_token: tokens.id_token.clone(),
                expires_at: Some(expires_at),
            };
            inner.current_user = None;
            inner.state = AuthState::Authenticating;
        }
        self.notify();
        self.scheduler.arm(self.weak.clone(), expires_at);

        let decoded = tokens.id_token.as_deref().and_then(|t| match id_token::decode(t) {
            Ok(profile) => Some(profile),
            Err(e) => {
                debug!(error = %e, "identity token did not decode, falling back to /users/me");
                None
            }
        });

        let user = match decoded {
            Some(profile) => Some(profile),
            None => match self.resolve_user().await {
                Ok(profile) => Some(profile),
                Err(AuthError::Expired) | Err(AuthError::RefreshInvalid) => {
                    self.clear_session();
                    return Ok(AuthState::Anonymous);
                }
                Err(e) => {
                    warn!(error = %e, "could not resolve user after callback");
                    None
                }
            },
        };

        let state = match user {
            Some(profile) => {
                info!("signed in");
                let mut inner = self.write();
                inner.current_user = Some(profile);
                inner.state = AuthState::Authenticated;
                AuthState::Authenticated
            }
            None => {
                let mut inner = self.write();
                inner.state = AuthState::Anonymous;
                AuthState::Anonymous
            }
        };
        self.notify();
        Ok(state)
    }

    /// Mint a new access token from the stored refresh token.
    ///
    /// Single-flight: concurrent callers (the proactive timer and any
    /// number of 401-triggered retries) converge on one `/refresh-token`
    /// call and all observe its outcome. A 400/401 from the refresh
    /// endpoint is terminal and clears the session; other failures are
    /// surfaced without touching the stored tokens.
    pub async fn refresh(&self) -> Result<String, AuthError> {
        use std::sync::atomic::Ordering;

        // Snapshot before waiting on the gate; if another attempt completes
        // while we are queued, the epoch moves and we share its outcome
        // instead of starting a second refresh.
        let seen_epoch = self.refresh_epoch.load(Ordering::Acquire);

        let mut gate = self.refresh_gate.lock().await;
        if self.refresh_epoch.load(Ordering::Acquire) != seen_epoch {
            if let Some(outcome) = gate.as_ref() {
                debug!("sharing refresh outcome from concurrent attempt");
                return outcome.to_result();
            }
        }

        let result = self.do_refresh().await;
        *gate = Some(match &result {
            Ok(token) => RefreshOutcome::Success(token.clone()),
            Err(AuthError::RefreshInvalid) => RefreshOutcome::Invalid,
            Err(AuthError::Expired) => RefreshOutcome::Expired,
            Err(e) => RefreshOutcome::Failed(e.to_string()),
        });
        self.refresh_epoch.fetch_add(1, Ordering::AcqRel);
        result
    }

    async fn do_refresh(&self) -> Result<String, AuthError> {
        let Some(refresh_token) = self.read().tokens.refresh_token.clone() else {
            warn!("no refresh token available, clearing session");
            self.clear_session();
            return Err(AuthError::Expired);
        };

        debug!("refreshing access token");
        let response = self
            .http
            .post(self.settings.refresh_url())
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(AuthError::Network)?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            warn!(%status, "refresh token rejected, clearing session");
            self.clear_session();
            return Err(AuthError::RefreshInvalid);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(%status, "refresh endpoint failed");
            return Err(AuthError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body: RefreshResponse = response.json().await.map_err(AuthError::Network)?;
        let expires_at = expiry_from(body.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS));

        self.store.set(TokenStore::ACCESS_TOKEN, &body.access_token)?;
        if let Some(id_token) = &body.id_token {
            self.store.set(TokenStore::ID_TOKEN, id_token)?;
        }
        self.store
            .set(TokenStore::TOKEN_EXPIRY, &expires_at.timestamp_millis().to_string())?;

        {
            let mut inner = self.write();
            inner.tokens.access_token = Some(body.access_token.clone());
            if let Some(id_token) = &body.id_token {
                inner.tokens.id_token = Some(id_token.clone());
            }
            inner.tokens.expires_at = Some(expires_at);
        }
        self.scheduler.arm(self.weak.clone(), expires_at);

        info!("access token refreshed");
        Ok(body.access_token)
    }

    /// Clear storage and in-memory state, cancel the refresh timer, and
    /// return the external logout URL for the caller to navigate to.
    pub fn logout(&self) -> String {
        info!("logging out");
        self.clear_session();
        self.settings.logout_url()
    }

    fn clear_session(&self) {
        self.scheduler.disarm();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear token storage");
        }
        {
            let mut inner = self.write();
            *inner = SessionInner::default();
        }
        self.notify();
    }

    /// Fetch `/users/me` with the current access token, refreshing first if
    /// it is already expired, and retrying exactly once after a 401.
    async fn resolve_user(&self) -> Result<UserProfile, AuthError> {
        let mut token = self.access_token().ok_or(AuthError::Expired)?;
        if self.is_token_expired() {
            token = self.refresh().await?;
        }

        let response = self.whoami(&token).await?;
        let response = if response.status() == StatusCode::UNAUTHORIZED {
            let token = self.refresh().await?;
            self.whoami(&token).await?
        } else {
            response
        };

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

    async fn whoami(&self, token: &str) -> Result<reqwest::Response, AuthError> {
        self.http
            .get(self.settings.whoami_url())
            .bearer_auth(token)
            .send()
            .await
            .map_err(AuthError::Network)
    }

    #[cfg(test)]
    pub(crate) fn refresh_timer_armed(&self) -> bool {
        self.scheduler.is_armed()
    }

    fn set_state(&self, state: AuthState) {
        self.write().state = state;
        self.notify();
    }

    fn notify(&self) {
        let state = self.read().state;
        self.state_tx.send_replace(state);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionInner> {
        self.inner.read().expect("session lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionInner> {
        self.inner.write().expect("session lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_id_token(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        format!("{}.{}.sig", header, payload)
    }

    struct Harness {
        _dir: tempfile::TempDir,
        session: Arc<Session>,
        store_path: std::path::PathBuf,
    }

    fn harness_with(server_uri: &str, lead_secs: u64) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("session.json");
        let settings = Settings {
            api_base_url: format!("{}/api", server_uri),
            auth_base_url: server_uri.to_string(),
            refresh_lead_secs: lead_secs,
            request_timeout_secs: 5,
        };
        let session = Session::new(settings, TokenStore::at(&store_path));
        Harness {
            _dir: dir,
            session,
            store_path,
        }
    }

    fn seed_tokens(path: &std::path::Path, access: &str, refresh: &str, expires_at: DateTime<Utc>) {
        let store = TokenStore::at(path);
        store.set(TokenStore::ACCESS_TOKEN, access).unwrap();
        store.set(TokenStore::REFRESH_TOKEN, refresh).unwrap();
        store
            .set(TokenStore::TOKEN_EXPIRY, &expires_at.timestamp_millis().to_string())
            .unwrap();
    }

    #[tokio::test]
    async fn bootstrap_with_empty_store_is_anonymous() {
        let h = harness_with("http://127.0.0.1:9", 60);
        assert_eq!(h.session.bootstrap().await, AuthState::Anonymous);
        assert!(!h.session.is_authenticated());
    }

    #[tokio::test]
    async fn bootstrap_resolves_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .and(header("authorization", "Bearer a1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sub": "u-1", "email": "ada@example.com",
            })))
            .mount(&server)
            .await;

        let h = harness_with(&server.uri(), 60);
        seed_tokens(&h.store_path, "a1", "r1", Utc::now() + TimeDelta::seconds(3600));

        assert_eq!(h.session.bootstrap().await, AuthState::Authenticated);
        assert_eq!(
            h.session.current_user().and_then(|u| u.email),
            Some("ada@example.com".to_string())
        );
        assert!(h.session.refresh_timer_armed());
    }

    #[tokio::test]
    async fn bootstrap_refreshes_once_on_401() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .and(header("authorization", "Bearer a1"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .and(header("authorization", "Bearer a2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sub": "u-1",
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/refresh-token"))
            .and(body_json(serde_json::json!({ "refresh_token": "r1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "a2", "expires_in": 3600,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness_with(&server.uri(), 60);
        seed_tokens(&h.store_path, "a1", "r1", Utc::now() + TimeDelta::seconds(3600));

        assert_eq!(h.session.bootstrap().await, AuthState::Authenticated);
        assert_eq!(h.session.access_token().as_deref(), Some("a2"));
    }

    #[tokio::test]
    async fn bootstrap_keeps_tokens_on_network_failure() {
        // Nothing listens here, so /users/me fails at the connection level.
        let h = harness_with("http://127.0.0.1:9", 60);
        seed_tokens(&h.store_path, "a1", "r1", Utc::now() + TimeDelta::seconds(3600));

        assert_eq!(h.session.bootstrap().await, AuthState::Anonymous);
        assert!(!h.session.is_authenticated());
        // Tokens stay in place for the next attempt.
        let store = TokenStore::at(&h.store_path);
        assert_eq!(store.get(TokenStore::ACCESS_TOKEN).as_deref(), Some("a1"));
    }

    #[tokio::test]
    async fn rejected_refresh_clears_the_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/refresh-token"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let h = harness_with(&server.uri(), 60);
        seed_tokens(&h.store_path, "a1", "r1", Utc::now() + TimeDelta::seconds(3600));

        assert_eq!(h.session.bootstrap().await, AuthState::Anonymous);
        assert!(!h.session.is_authenticated());
        assert!(TokenStore::at(&h.store_path).is_empty());
        assert!(!h.session.refresh_timer_armed());
    }

    #[tokio::test]
    async fn apply_callback_persists_and_decodes() {
        let h = harness_with("http://127.0.0.1:9", 60);
        let id_token = make_id_token(serde_json::json!({ "sub": "u-7", "name": "Ada" }));

        let before = Utc::now();
        let state = h
            .session
            .apply_callback(CallbackTokens {
                access_token: "a1".to_string(),
                refresh_token: Some("r1".to_string()),
                id_token: Some(id_token),
                expires_in: Some(3600),
            })
            .await
            .unwrap();

        assert_eq!(state, AuthState::Authenticated);
        assert_eq!(h.session.current_user().and_then(|u| u.name), Some("Ada".to_string()));
        assert!(h.session.refresh_timer_armed());

        let store = TokenStore::at(&h.store_path);
        assert_eq!(store.get(TokenStore::ACCESS_TOKEN).as_deref(), Some("a1"));
        assert_eq!(store.get(TokenStore::REFRESH_TOKEN).as_deref(), Some("r1"));

        let expiry: i64 = store.get(TokenStore::TOKEN_EXPIRY).unwrap().parse().unwrap();
        let expected = (before + TimeDelta::seconds(3600)).timestamp_millis();
        assert!((expiry - expected).abs() < 5_000, "expiry {} ~ {}", expiry, expected);
        assert!(!h.session.is_token_expired());
    }

    #[tokio::test]
    async fn absurd_expires_in_is_capped() {
        let h = harness_with("http://127.0.0.1:9", 60);
        let id_token = make_id_token(serde_json::json!({ "sub": "u-7", "name": "Ada" }));

        let state = h
            .session
            .apply_callback(CallbackTokens {
                access_token: "a1".to_string(),
                refresh_token: Some("r1".to_string()),
                id_token: Some(id_token),
                expires_in: Some(u64::MAX),
            })
            .await
            .unwrap();
        assert_eq!(state, AuthState::Authenticated);

        let expiry: i64 = TokenStore::at(&h.store_path)
            .get(TokenStore::TOKEN_EXPIRY)
            .unwrap()
            .parse()
            .unwrap();
        let ceiling = (Utc::now() + TimeDelta::days(366)).timestamp_millis();
        assert!(expiry <= ceiling, "expiry {} beyond {}", expiry, ceiling);
        assert!(!h.session.is_token_expired());
    }

    #[tokio::test]
    async fn concurrent_refreshes_share_one_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/refresh-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(100))
                    .set_body_json(serde_json::json!({
                        "access_token": "a2", "expires_in": 3600,
                    })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let h = harness_with(&server.uri(), 60);
        seed_tokens(&h.store_path, "a1", "r1", Utc::now() + TimeDelta::seconds(10));
        // Load tokens without touching /users/me.
        {
            let mut inner = h.session.write();
            inner.tokens = SessionTokens::load(&TokenStore::at(&h.store_path));
        }

        let (first, second) = tokio::join!(h.session.refresh(), h.session.refresh());
        assert_eq!(first.unwrap(), "a2");
        assert_eq!(second.unwrap(), "a2");
    }

    #[tokio::test]
    async fn refresh_stores_a_later_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/refresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "a2", "expires_in": 3600,
            })))
            .mount(&server)
            .await;

        let h = harness_with(&server.uri(), 60);
        let old_expiry = Utc::now() + TimeDelta::seconds(10);
        seed_tokens(&h.store_path, "a1", "r1", old_expiry);
        {
            let mut inner = h.session.write();
            inner.tokens = SessionTokens::load(&TokenStore::at(&h.store_path));
        }

        h.session.refresh().await.unwrap();

        let stored: i64 = TokenStore::at(&h.store_path)
            .get(TokenStore::TOKEN_EXPIRY)
            .unwrap()
            .parse()
            .unwrap();
        assert!(stored > old_expiry.timestamp_millis());
    }

    #[tokio::test]
    async fn proactive_refresh_fires_before_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sub": "u-1",
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/refresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "a2", "expires_in": 3600,
            })))
            .expect(1)
            .mount(&server)
            .await;

        // Zero lead and a near-immediate expiry: timer fires right away.
        let h = harness_with(&server.uri(), 0);
        seed_tokens(&h.store_path, "a1", "r1", Utc::now() + TimeDelta::milliseconds(500));
        h.session.bootstrap().await;

        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(h.session.access_token().as_deref(), Some("a2"));
    }

    #[tokio::test]
    async fn logout_clears_storage_and_cancels_timer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sub": "u-1",
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/refresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "a2", "expires_in": 3600,
            })))
            .expect(0)
            .mount(&server)
            .await;

        let h = harness_with(&server.uri(), 0);
        // Timer would fire shortly after bootstrap if left armed.
        seed_tokens(&h.store_path, "a1", "r1", Utc::now() + TimeDelta::milliseconds(500));
        h.session.bootstrap().await;

        let mut states = h.session.subscribe();
        let logout_url = h.session.logout();
        assert!(logout_url.ends_with("/logout"));
        assert!(!h.session.refresh_timer_armed());
        assert!(TokenStore::at(&h.store_path).is_empty());
        assert_eq!(*states.borrow_and_update(), AuthState::Anonymous);

        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(h.session.bootstrap().await, AuthState::Anonymous);
        assert!(!h.session.is_authenticated());
    }

    #[test]
    fn expired_when_expiry_absent_or_past() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default();
        let session = Session::new(settings, TokenStore::at(dir.path().join("s.json")));

        assert!(session.is_token_expired());

        session.write().tokens.expires_at = Some(Utc::now() - TimeDelta::seconds(1));
        assert!(session.is_token_expired());

        session.write().tokens.expires_at = Some(Utc::now() + TimeDelta::seconds(60));
        assert!(!session.is_token_expired());
    }
}
