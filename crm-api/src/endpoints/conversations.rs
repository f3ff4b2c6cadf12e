use super::PageQuery;
use crate::macros::setter;
use crate::request::{EmptyResponse, Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub contact_id: Option<i64>,
    pub contact_name: Option<String>,
    pub unread_count: Option<u32>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// List query: pagination plus an optional filter down to one contact.
/// Pagination is inlined rather than flattened; the query serializer only
/// handles flat structs.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationQuery {
    page_id: u32,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_id: Option<i64>,
}

impl Default for ConversationQuery {
    fn default() -> Self {
        let page = PageQuery::default();
        Self {
            page_id: page.page_id,
            page_size: page.page_size,
            contact_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListConversations {
    query: ConversationQuery,
}

impl ListConversations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: PageQuery) -> Self {
        self.query.page_id = page.page_id;
        self.query.page_size = page.page_size;
        self
    }

    pub fn contact_id(mut self, contact_id: i64) -> Self {
        self.query.contact_id = Some(contact_id);
        self
    }
}

impl Request for ListConversations {
    type Data = ConversationQuery;
    type Response = Vec<Conversation>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/conversations".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct GetConversation {
    id: i64,
}

impl GetConversation {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for GetConversation {
    type Data = ();
    type Response = Conversation;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/conversations/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateConversation {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_id: Option<i64>,
}

impl CreateConversation {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt title: String);
    setter!(opt subject: String);
    setter!(opt contact_id: i64);
}

impl Request for CreateConversation {
    type Data = Self;
    type Response = Conversation;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/conversations".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateConversation {
    #[serde(skip)]
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
}

impl UpdateConversation {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            subject: None,
        }
    }

    setter!(opt title: String);
    setter!(opt subject: String);
}

impl Request for UpdateConversation {
    type Data = Self;
    type Response = Conversation;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/conversations/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteConversation {
    id: i64,
}

impl DeleteConversation {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for DeleteConversation {
    type Data = ();
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/conversations/{}", self.id).into()
    }
}
