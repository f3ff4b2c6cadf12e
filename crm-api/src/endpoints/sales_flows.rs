use super::PageQuery;
use crate::macros::setter;
use crate::request::{EmptyResponse, Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesFlow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub stages: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A sales flow as assigned to one project, with its per-project status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFlow {
    pub id: i64,
    pub flow_id: i64,
    pub project_id: i64,
    pub name: Option<String>,
    pub status: Option<String>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// Requests

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListSalesFlows {
    page: PageQuery,
}

impl ListSalesFlows {
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

impl Request for ListSalesFlows {
    type Data = PageQuery;
    type Response = Vec<SalesFlow>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/sales-flows".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.page)
    }
}

#[derive(Debug, Clone)]
pub struct GetSalesFlow {
    id: i64,
}

impl GetSalesFlow {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for GetSalesFlow {
    type Data = ();
    type Response = SalesFlow;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/sales-flows/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSalesFlow {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stages: Option<Vec<String>>,
}

impl CreateSalesFlow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    setter!(opt description: String);
    setter!(opt stages: Vec<String>);
}

impl Request for CreateSalesFlow {
    type Data = Self;
    type Response = SalesFlow;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/sales-flows".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateSalesFlow {
    #[serde(skip)]
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
}

impl UpdateSalesFlow {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            description: None,
            stages: None,
            is_active: None,
        }
    }

    setter!(opt name: String);
    setter!(opt description: String);
    setter!(opt stages: Vec<String>);
    setter!(opt is_active: bool);
}

impl Request for UpdateSalesFlow {
    type Data = Self;
    type Response = SalesFlow;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/sales-flows/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteSalesFlow {
    id: i64,
}

impl DeleteSalesFlow {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for DeleteSalesFlow {
    type Data = ();
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/sales-flows/{}", self.id).into()
    }
}

// Project assignments

#[derive(Debug, Clone, Serialize)]
pub struct AssignFlowToProject {
    #[serde(skip)]
    project_id: i64,
    flow_id: i64,
}

impl AssignFlowToProject {
    pub fn new(project_id: i64, flow_id: i64) -> Self {
        Self {
            project_id,
            flow_id,
        }
    }
}

impl Request for AssignFlowToProject {
    type Data = Self;
    type Response = ProjectFlow;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/projects/{}/flows", self.project_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProjectFlowStatus {
    #[serde(skip)]
    project_id: i64,
    #[serde(skip)]
    flow_id: i64,
    status: String,
}

impl UpdateProjectFlowStatus {
    pub fn new(project_id: i64, flow_id: i64, status: impl Into<String>) -> Self {
        Self {
            project_id,
            flow_id,
            status: status.into(),
        }
    }
}

impl Request for UpdateProjectFlowStatus {
    type Data = Self;
    type Response = ProjectFlow;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/projects/{}/flows/{}", self.project_id, self.flow_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct RemoveFlowFromProject {
    project_id: i64,
    flow_id: i64,
}

impl RemoveFlowFromProject {
    pub fn new(project_id: i64, flow_id: i64) -> Self {
        Self {
            project_id,
            flow_id,
        }
    }
}

impl Request for RemoveFlowFromProject {
    type Data = ();
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/projects/{}/flows/{}", self.project_id, self.flow_id).into()
    }
}
