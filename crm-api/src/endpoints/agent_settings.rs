use super::PageQuery;
use crate::macros::setter;
use crate::request::{EmptyResponse, Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

/// Tunable personality sliders for an automated agent, each 0-100.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentPersonality {
    pub formality: Option<u8>,
    pub assertiveness: Option<u8>,
    pub creativity: Option<u8>,
    pub humor: Option<u8>,
    pub responsiveness: Option<u8>,
    pub tone_preference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSetting {
    pub id: i64,
    pub agent_type: String,
    pub name: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub personality: Option<AgentPersonality>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One action taken (or attempted) by an automated agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentAction {
    pub id: i64,
    pub agent_id: Option<i64>,
    #[serde(rename = "type")]
    pub action_type: String,
    pub status: Option<String>,
    pub conversation_id: Option<i64>,
    pub details: Option<serde_json::Value>,
    pub error_detail: Option<String>,
    pub executed_at: Option<DateTime<Utc>>,
}

// Requests

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListAgentSettings {
    page: PageQuery,
}

impl ListAgentSettings {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(page: PageQuery);

    pub fn page_id(mut self, page_id: u32) -> Self {
        self.page.page_id = page_id;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page.page_size = page_size;
        self
    }
}

impl Request for ListAgentSettings {
    type Data = PageQuery;
    type Response = Vec<AgentSetting>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/agent-settings".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.page)
    }
}

#[derive(Debug, Clone)]
pub struct GetAgentSetting {
    id: i64,
}

impl GetAgentSetting {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for GetAgentSetting {
    type Data = ();
    type Response = AgentSetting;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/agent-settings/{}", self.id).into()
    }
}

#[derive(Debug, Clone)]
pub struct GetAgentSettingByType {
    agent_type: String,
}

impl GetAgentSettingByType {
    pub fn new(agent_type: impl Into<String>) -> Self {
        Self {
            agent_type: agent_type.into(),
        }
    }
}

impl Request for GetAgentSettingByType {
    type Data = ();
    type Response = AgentSetting;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/agent-settings/type/{}", self.agent_type).into()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAgentSetting {
    agent_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    personality: Option<AgentPersonality>,
}

impl CreateAgentSetting {
    pub fn new(agent_type: impl Into<String>) -> Self {
        Self {
            agent_type: agent_type.into(),
            ..Self::default()
        }
    }

    setter!(opt name: String);
    setter!(opt personality: AgentPersonality);
}

impl Request for CreateAgentSetting {
    type Data = Self;
    type Response = AgentSetting;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/agent-settings".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

/// Updates are keyed by agent type, not id; the backend upserts.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAgentSettingByType {
    #[serde(skip)]
    agent_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    personality: Option<AgentPersonality>,
}

impl UpdateAgentSettingByType {
    pub fn new(agent_type: impl Into<String>) -> Self {
        Self {
            agent_type: agent_type.into(),
            name: None,
            personality: None,
        }
    }

    setter!(opt name: String);
    setter!(opt personality: AgentPersonality);
}

impl Request for UpdateAgentSettingByType {
    type Data = Self;
    type Response = AgentSetting;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/agent-settings/type/{}", self.agent_type).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteAgentSetting {
    id: i64,
}

impl DeleteAgentSetting {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for DeleteAgentSetting {
    type Data = ();
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/agent-settings/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleAgent {
    agent_id: i64,
    is_active: bool,
}

impl ToggleAgent {
    pub fn new(agent_id: i64, is_active: bool) -> Self {
        Self {
            agent_id,
            is_active,
        }
    }
}

impl Request for ToggleAgent {
    type Data = Self;
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/agents/toggle".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

/// Sends a one-off test mail through the configured email agent. The
/// message text travels as `email_body`; `simulate_now` asks the backend to
/// run the agent immediately instead of queueing.
#[derive(Debug, Clone, Serialize)]
pub struct TestAgentEmail {
    agent_id: i64,
    from_email: String,
    subject: String,
    email_body: String,
    simulate_now: bool,
}

impl TestAgentEmail {
    pub fn new(
        agent_id: i64,
        from_email: impl Into<String>,
        subject: impl Into<String>,
        email_body: impl Into<String>,
    ) -> Self {
        Self {
            agent_id,
            from_email: from_email.into(),
            subject: subject.into(),
            email_body: email_body.into(),
            simulate_now: true,
        }
    }

    pub fn simulate_now(mut self, simulate_now: bool) -> Self {
        self.simulate_now = simulate_now;
        self
    }
}

impl Request for TestAgentEmail {
    type Data = Self;
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/agents/test-email".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

// Action feed

/// Paginated action feed across all agents, with optional filters.
#[derive(Debug, Clone, Serialize)]
pub struct ListAgentActions {
    page_id: u32,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    agent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

impl Default for ListAgentActions {
    fn default() -> Self {
        let page = PageQuery::default();
        Self {
            page_id: page.page_id,
            page_size: page.page_size,
            agent_id: None,
            conversation_id: None,
            action_type: None,
            status: None,
        }
    }
}

impl ListAgentActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: PageQuery) -> Self {
        self.page_id = page.page_id;
        self.page_size = page.page_size;
        self
    }

    setter!(opt agent_id: i64);
    setter!(opt conversation_id: i64);
    setter!(opt action_type: String);
    setter!(opt status: String);
}

impl Request for ListAgentActions {
    type Data = Self;
    type Response = Vec<AgentAction>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/agent-actions".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(self)
    }
}

/// Most recent actions for one agent. Served under the `/api` prefix,
/// unlike the rest of the agent routes.
#[derive(Debug, Clone, Serialize)]
pub struct GetRecentAgentActions {
    #[serde(skip)]
    agent_id: i64,
    limit: u32,
}

impl GetRecentAgentActions {
    pub fn new(agent_id: i64) -> Self {
        Self {
            agent_id,
            limit: 10,
        }
    }

    setter!(limit: u32);
}

impl Request for GetRecentAgentActions {
    type Data = Self;
    type Response = Vec<AgentAction>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/api/agents/{}/recent-actions", self.agent_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(self)
    }
}
