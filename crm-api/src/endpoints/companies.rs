use super::PageQuery;
use super::contacts::Contact;
use crate::macros::setter;
use crate::request::{EmptyResponse, Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListCompanies {
    page: PageQuery,
}

impl ListCompanies {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(page: PageQuery);
}

impl Request for ListCompanies {
    type Data = PageQuery;
    type Response = Vec<Company>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/companies".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.page)
    }
}

#[derive(Debug, Clone)]
pub struct GetCompany {
    id: i64,
}

impl GetCompany {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for GetCompany {
    type Data = ();
    type Response = Company;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/companies/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCompany {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl CreateCompany {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    setter!(opt industry: String);
    setter!(opt website: String);
    setter!(opt address: String);
}

impl Request for CreateCompany {
    type Data = Self;
    type Response = Company;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/companies".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCompany {
    #[serde(skip)]
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl UpdateCompany {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            industry: None,
            website: None,
            address: None,
        }
    }

    setter!(opt name: String);
    setter!(opt industry: String);
    setter!(opt website: String);
    setter!(opt address: String);
}

impl Request for UpdateCompany {
    type Data = Self;
    type Response = Company;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/companies/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteCompany {
    id: i64,
}

impl DeleteCompany {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for DeleteCompany {
    type Data = ();
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/companies/{}", self.id).into()
    }
}

// Contacts attached to a company

#[derive(Debug, Clone, Serialize)]
pub struct ListCompanyContacts {
    #[serde(skip)]
    company_id: i64,
    page: PageQuery,
}

impl ListCompanyContacts {
    pub fn new(company_id: i64) -> Self {
        Self {
            company_id,
            page: PageQuery::default(),
        }
    }

    setter!(page: PageQuery);
}

impl Request for ListCompanyContacts {
    type Data = PageQuery;
    type Response = Vec<Contact>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/companies/{}/contacts", self.company_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.page)
    }
}
