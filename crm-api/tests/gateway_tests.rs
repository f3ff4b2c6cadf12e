use chrono::{TimeDelta, Utc};
use crm_api::endpoints::PageQuery;
use crm_api::endpoints::contacts::{Contact, ListContacts};
use crm_api::{ApiError, Client};
use crm_auth::{Session, Settings, TokenStore};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    _dir: tempfile::TempDir,
    session: Arc<Session>,
    client: Client,
    store_path: std::path::PathBuf,
}

fn harness(server_uri: &str) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("session.json");
    let settings = Settings {
        api_base_url: format!("{}/api", server_uri),
        auth_base_url: server_uri.to_string(),
        refresh_lead_secs: 60,
        request_timeout_secs: 5,
    };
    let session = Session::new(settings, TokenStore::at(&store_path));
    let client = Client::new(session.clone());
    Harness {
        _dir: dir,
        session,
        client,
        store_path,
    }
}

fn seed(store_path: &std::path::Path, access: &str, refresh: &str) {
    let store = TokenStore::at(store_path);
    store.set(TokenStore::ACCESS_TOKEN, access).unwrap();
    store.set(TokenStore::REFRESH_TOKEN, refresh).unwrap();
    let expiry = Utc::now() + TimeDelta::seconds(3600);
    store
        .set(
            TokenStore::TOKEN_EXPIRY,
            &expiry.timestamp_millis().to_string(),
        )
        .unwrap();
}

fn contacts_body() -> serde_json::Value {
    serde_json::json!([
        { "id": 1, "name": "Ada Lovelace", "email": "ada@example.com" },
    ])
}

async fn mount_refresh(server: &MockServer, old: &str, new: &str) {
    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .and(body_json(serde_json::json!({ "refresh_token": old })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": new,
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn authorized_request_carries_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contacts_body()))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let contacts: Vec<Contact> = h.client.send(ListContacts::new()).await.unwrap();
    assert_eq!(contacts[0].email, "ada@example.com");
}

#[tokio::test]
async fn retries_once_with_fresh_token_after_401() {
    let server = MockServer::start().await;
    // First attempt with the stale token fails.
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "r1", "a2").await;
    // The replay carries the refreshed token and succeeds.
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(header("authorization", "Bearer a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contacts_body()))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let contacts: Vec<Contact> = h.client.send(ListContacts::new()).await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(h.session.access_token().as_deref(), Some("a2"));
}

#[tokio::test]
async fn second_401_is_not_retried_again() {
    let server = MockServer::start().await;
    // Both the original and the replay come back 401.
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(&server, "r1", "a2").await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let err = h
        .client
        .send::<ListContacts>(ListContacts::new())
        .await
        .unwrap_err();
    match err {
        ApiError::Http { status, .. } => assert_eq!(status.as_u16(), 401),
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(100))
                .set_body_json(serde_json::json!({
                    "access_token": "a2",
                    "expires_in": 3600,
                })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(header("authorization", "Bearer a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contacts_body()))
        .expect(2)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let (a, b) = tokio::join!(
        h.client.send(ListContacts::new()),
        h.client.send(ListContacts::new()),
    );
    assert!(a.is_ok() && b.is_ok(), "{a:?} {b:?}");
}

#[tokio::test]
async fn rejected_refresh_logs_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let err = h
        .client
        .send::<ListContacts>(ListContacts::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AuthExpired), "{err:?}");
    assert!(!h.session.is_authenticated());
    assert!(TokenStore::at(&h.store_path).is_empty());
}

#[tokio::test]
async fn network_failure_is_reported_without_logout() {
    // Nothing is listening on this port.
    let h = harness("http://127.0.0.1:9");
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let err = h
        .client
        .send::<ListContacts>(ListContacts::new())
        .await
        .unwrap_err();
    assert!(err.is_network(), "{err:?}");
    assert_eq!(h.session.access_token().as_deref(), Some("a1"));
}

#[tokio::test]
async fn unauthenticated_paths_carry_no_authorization_header() {
    let server = MockServer::start().await;
    // A login request carrying credentials would hit this mock instead.
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let _: serde_json::Value = h
        .client
        .post("/login", &serde_json::json!({ "email": "ada@example.com" }))
        .await
        .unwrap();
}

#[tokio::test]
async fn expired_token_is_refreshed_before_sending() {
    let server = MockServer::start().await;
    mount_refresh(&server, "r1", "a2").await;
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(header("authorization", "Bearer a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contacts_body()))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    let store = TokenStore::at(&h.store_path);
    store.set(TokenStore::ACCESS_TOKEN, "a1").unwrap();
    store.set(TokenStore::REFRESH_TOKEN, "r1").unwrap();
    let past = Utc::now() - TimeDelta::seconds(60);
    store
        .set(
            TokenStore::TOKEN_EXPIRY,
            &past.timestamp_millis().to_string(),
        )
        .unwrap();
    h.session.load_tokens();

    let contacts: Vec<Contact> = h.client.send(ListContacts::new()).await.unwrap();
    assert_eq!(contacts.len(), 1);
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contacts/7"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "contact not found",
        })))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let err = h
        .client
        .send(crm_api::endpoints::contacts::GetContact::new(7))
        .await
        .unwrap_err();
    match err {
        ApiError::Http { status, message, .. } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "contact not found");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn project_contacts_are_listed_and_managed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/7/contacts"))
        .and(query_param("page_id", "1"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contacts_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/projects/7/contacts"))
        .and(body_json(serde_json::json!({ "contact_id": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1, "name": "Ada Lovelace", "email": "ada@example.com",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/projects/7/contacts/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let projects = crm_api::Request::projects();
    let listed = h.client.send(projects.contacts(7)).await.unwrap();
    assert_eq!(listed[0].name, "Ada Lovelace");
    let added = h.client.send(projects.add_contact(7, 1)).await.unwrap();
    assert_eq!(added.id, 1);
    h.client.send(projects.remove_contact(7, 1)).await.unwrap();
}

#[tokio::test]
async fn company_contacts_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/companies/3/contacts"))
        .and(query_param("page_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contacts_body()))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let companies = crm_api::Request::companies().with_page(PageQuery::new(2, 10));
    let listed = h.client.send(companies.contacts(3)).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_email_sends_the_backend_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/agents/test-email"))
        .and(body_json(serde_json::json!({
            "agent_id": 4,
            "from_email": "ada@example.com",
            "subject": "Hello",
            "email_body": "Quick question about pricing",
            "simulate_now": true,
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let request =
        crm_api::Request::agents().test_email(4, "ada@example.com", "Hello", "Quick question about pricing");
    h.client.send(request).await.unwrap();
}

#[tokio::test]
async fn agent_settings_list_is_paginated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/agent-settings"))
        .and(query_param("page_id", "1"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let settings = h.client.send(crm_api::Request::agents().list()).await.unwrap();
    assert!(settings.is_empty());
}

#[tokio::test]
async fn agent_action_feed_carries_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/agent-actions"))
        .and(query_param("agent_id", "4"))
        .and(query_param("status", "completed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 11, "agent_id": 4, "type": "email_reply", "status": "completed",
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    seed(&h.store_path, "a1", "r1");
    h.session.load_tokens();

    let actions = h
        .client
        .send(crm_api::Request::agents().actions().agent_id(4).status("completed"))
        .await
        .unwrap();
    assert_eq!(actions[0].action_type, "email_reply");
}
