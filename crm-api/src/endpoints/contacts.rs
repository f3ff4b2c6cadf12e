use super::PageQuery;
use crate::macros::setter;
use crate::request::{EmptyResponse, Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// Requests

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListContacts {
    page: PageQuery,
}

impl ListContacts {
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

impl Request for ListContacts {
    type Data = PageQuery;
    type Response = Vec<Contact>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/contacts".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.page)
    }
}

#[derive(Debug, Clone)]
pub struct GetContact {
    id: i64,
}

impl GetContact {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for GetContact {
    type Data = ();
    type Response = Contact;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/contacts/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateContact {
    name: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl CreateContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    setter!(opt phone: String);
    setter!(opt company_name: String);
    setter!(opt address: String);
}

impl Request for CreateContact {
    type Data = Self;
    type Response = Contact;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/contacts".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateContact {
    #[serde(skip)]
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl UpdateContact {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            email: None,
            phone: None,
            company_name: None,
            address: None,
        }
    }

    setter!(opt name: String);
    setter!(opt email: String);
    setter!(opt phone: String);
    setter!(opt company_name: String);
    setter!(opt address: String);
}

impl Request for UpdateContact {
    type Data = Self;
    type Response = Contact;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/contacts/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteContact {
    id: i64,
}

impl DeleteContact {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for DeleteContact {
    type Data = ();
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/contacts/{}", self.id).into()
    }
}
