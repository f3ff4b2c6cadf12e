use super::session::Session;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// One-shot timer that refreshes the access token shortly before it
/// expires. Re-arming cancels the previous timer, so at most one is ever
/// pending; the task holds only a weak session handle so a session cleared
/// by logout cannot be resurrected by a late firing.
pub(crate) struct RefreshScheduler {
    lead: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshScheduler {
    pub fn new(lead: Duration) -> Self {
        Self {
            lead,
            timer: Mutex::new(None),
        }
    }

    pub fn arm(&self, session: Weak<Session>, expires_at: DateTime<Utc>) {
        let delay = fire_delay(expires_at, Utc::now(), self.lead);
        debug!(delay_secs = delay.as_secs(), "arming refresh timer");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(session) = session.upgrade() else {
                return;
            };
            debug!("refresh timer fired");
            if let Err(e) = session.refresh().await {
                warn!(error = %e, "scheduled token refresh failed");
            }
        });

        let mut slot = self.timer.lock().expect("refresh timer lock poisoned");
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    pub fn disarm(&self) {
        let mut slot = self.timer.lock().expect("refresh timer lock poisoned");
        if let Some(handle) = slot.take() {
            debug!("disarming refresh timer");
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.timer
            .lock()
            .expect("refresh timer lock poisoned")
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}

/// Fire `lead` before expiry; immediately when that point is already past.
fn fire_delay(expires_at: DateTime<Utc>, now: DateTime<Utc>, lead: Duration) -> Duration {
    (expires_at - now)
        .to_std()
        .ok()
        .and_then(|until_expiry| until_expiry.checked_sub(lead))
        .unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::super::{Settings, token_storage::TokenStore};
    use super::*;
    use chrono::TimeDelta;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn rearming_leaves_one_pending_timer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/refresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "a2", "expires_in": 3600,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("session.json"));
        store.set(TokenStore::ACCESS_TOKEN, "a1").unwrap();
        store.set(TokenStore::REFRESH_TOKEN, "r1").unwrap();
        let settings = Settings {
            api_base_url: format!("{}/api", server.uri()),
            auth_base_url: server.uri(),
            refresh_lead_secs: 60,
            request_timeout_secs: 5,
        };
        let session = Session::new(settings, store);
        session.load_tokens();

        // Arming twice must cancel the first timer, so only one refresh
        // call ever reaches the backend.
        let scheduler = RefreshScheduler::new(Duration::ZERO);
        let expires_at = Utc::now() + TimeDelta::milliseconds(200);
        scheduler.arm(Arc::downgrade(&session), expires_at);
        scheduler.arm(Arc::downgrade(&session), expires_at);
        assert!(scheduler.is_armed());

        tokio::time::sleep(Duration::from_millis(900)).await;
    }

    #[test]
    fn fires_lead_before_expiry() {
        let now = Utc::now();
        let expires_at = now + TimeDelta::seconds(3600);
        let delay = fire_delay(expires_at, now, Duration::from_secs(60));
        assert_eq!(delay, Duration::from_secs(3540));
    }

    #[test]
    fn fires_immediately_when_expiry_is_past() {
        let now = Utc::now();
        let expires_at = now - TimeDelta::seconds(10);
        assert_eq!(fire_delay(expires_at, now, Duration::from_secs(60)), Duration::ZERO);
    }

    #[test]
    fn fires_immediately_inside_the_lead_window() {
        let now = Utc::now();
        let expires_at = now + TimeDelta::seconds(30);
        assert_eq!(fire_delay(expires_at, now, Duration::from_secs(60)), Duration::ZERO);
    }
}
