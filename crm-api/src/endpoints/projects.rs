use super::PageQuery;
use super::contacts::Contact;
use super::sales_flows::ProjectFlow;
use crate::macros::setter;
use crate::request::{EmptyResponse, Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub company_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListProjects {
    page: PageQuery,
}

impl ListProjects {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(page: PageQuery);
}

impl Request for ListProjects {
    type Data = PageQuery;
    type Response = Vec<Project>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/projects".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.page)
    }
}

#[derive(Debug, Clone)]
pub struct GetProject {
    id: i64,
}

impl GetProject {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for GetProject {
    type Data = ();
    type Response = Project;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/projects/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateProject {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_id: Option<i64>,
}

impl CreateProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    setter!(opt description: String);
    setter!(opt company_id: i64);
}

impl Request for CreateProject {
    type Data = Self;
    type Response = Project;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/projects".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProject {
    #[serde(skip)]
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

impl UpdateProject {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            description: None,
            status: None,
        }
    }

    setter!(opt name: String);
    setter!(opt description: String);
    setter!(opt status: String);
}

impl Request for UpdateProject {
    type Data = Self;
    type Response = Project;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/projects/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteProject {
    id: i64,
}

impl DeleteProject {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for DeleteProject {
    type Data = ();
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/projects/{}", self.id).into()
    }
}

/// Sales flows attached to a project.
#[derive(Debug, Clone, Serialize)]
pub struct ListProjectFlows {
    #[serde(skip)]
    project_id: i64,
    page: PageQuery,
}

impl ListProjectFlows {
    pub fn new(project_id: i64) -> Self {
        Self {
            project_id,
            page: PageQuery::default(),
        }
    }

    setter!(page: PageQuery);
}

impl Request for ListProjectFlows {
    type Data = PageQuery;
    type Response = Vec<ProjectFlow>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/projects/{}/flows", self.project_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.page)
    }
}

// Contacts attached to a project

#[derive(Debug, Clone, Serialize)]
pub struct ListProjectContacts {
    #[serde(skip)]
    project_id: i64,
    page: PageQuery,
}

impl ListProjectContacts {
    pub fn new(project_id: i64) -> Self {
        Self {
            project_id,
            page: PageQuery::default(),
        }
    }

    setter!(page: PageQuery);
}

impl Request for ListProjectContacts {
    type Data = PageQuery;
    type Response = Vec<Contact>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/projects/{}/contacts", self.project_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.page)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddProjectContact {
    #[serde(skip)]
    project_id: i64,
    contact_id: i64,
}

impl AddProjectContact {
    pub fn new(project_id: i64, contact_id: i64) -> Self {
        Self {
            project_id,
            contact_id,
        }
    }
}

impl Request for AddProjectContact {
    type Data = Self;
    type Response = Contact;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/projects/{}/contacts", self.project_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct RemoveProjectContact {
    project_id: i64,
    contact_id: i64,
}

impl RemoveProjectContact {
    pub fn new(project_id: i64, contact_id: i64) -> Self {
        Self {
            project_id,
            contact_id,
        }
    }
}

impl Request for RemoveProjectContact {
    type Data = ();
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/projects/{}/contacts/{}", self.project_id, self.contact_id).into()
    }
}
