use super::PageQuery;
use crate::macros::setter;
use crate::request::{EmptyResponse, Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub transcript: Option<String>,
    pub conversation_id: Option<i64>,
    pub contact_id: Option<i64>,
    pub held_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// List query: pagination plus an optional filter to one conversation.
/// Pagination is inlined rather than flattened; the query serializer only
/// handles flat structs.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingQuery {
    page_id: u32,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<i64>,
}

impl Default for MeetingQuery {
    fn default() -> Self {
        let page = PageQuery::default();
        Self {
            page_id: page.page_id,
            page_size: page.page_size,
            conversation_id: None,
        }
    }
}

// Requests

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListMeetings {
    query: MeetingQuery,
}

impl ListMeetings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: PageQuery) -> Self {
        self.query.page_id = page.page_id;
        self.query.page_size = page.page_size;
        self
    }

    pub fn conversation_id(mut self, conversation_id: i64) -> Self {
        self.query.conversation_id = Some(conversation_id);
        self
    }
}

impl Request for ListMeetings {
    type Data = MeetingQuery;
    type Response = Vec<MeetingRecord>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/meeting-records".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct GetMeeting {
    id: i64,
}

impl GetMeeting {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for GetMeeting {
    type Data = ();
    type Response = MeetingRecord;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/meeting-records/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateMeeting {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    held_at: Option<DateTime<Utc>>,
}

impl CreateMeeting {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    setter!(opt summary: String);
    setter!(opt transcript: String);
    setter!(opt conversation_id: i64);
    setter!(opt held_at: DateTime<Utc>);
}

impl Request for CreateMeeting {
    type Data = Self;
    type Response = MeetingRecord;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/meeting-records".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateMeeting {
    #[serde(skip)]
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transcript: Option<String>,
}

impl UpdateMeeting {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            summary: None,
            transcript: None,
        }
    }

    setter!(opt title: String);
    setter!(opt summary: String);
    setter!(opt transcript: String);
}

impl Request for UpdateMeeting {
    type Data = Self;
    type Response = MeetingRecord;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/meeting-records/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteMeeting {
    id: i64,
}

impl DeleteMeeting {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for DeleteMeeting {
    type Data = ();
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/meeting-records/{}", self.id).into()
    }
}

/// Kick off server-side processing (summarisation) of a recorded meeting.
#[derive(Debug, Clone)]
pub struct ProcessMeeting {
    id: i64,
}

impl ProcessMeeting {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for ProcessMeeting {
    type Data = ();
    type Response = MeetingRecord;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/meeting-records/{}/process", self.id).into()
    }
}
