use super::PageQuery;
use crate::macros::setter;
use crate::request::{EmptyResponse, Method, MultipartForm, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDocument {
    pub id: i64,
    pub product_id: i64,
    pub file_name: Option<String>,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSection {
    pub id: i64,
    pub document_id: i64,
    pub heading: Option<String>,
    pub content: String,
    pub position: Option<u32>,
}

// Requests

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListProducts {
    page: PageQuery,
}

impl ListProducts {
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

impl Request for ListProducts {
    type Data = PageQuery;
    type Response = Vec<Product>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/products".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.page)
    }
}

#[derive(Debug, Clone)]
pub struct GetProduct {
    id: i64,
}

impl GetProduct {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for GetProduct {
    type Data = ();
    type Response = Product;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/products/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateProduct {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
}

impl CreateProduct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    setter!(opt description: String);
    setter!(opt category: String);
    setter!(opt price: f64);
    setter!(opt currency: String);
}

impl Request for CreateProduct {
    type Data = Self;
    type Response = Product;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/products".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProduct {
    #[serde(skip)]
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
}

impl UpdateProduct {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            description: None,
            category: None,
            price: None,
            currency: None,
            is_active: None,
        }
    }

    setter!(opt name: String);
    setter!(opt description: String);
    setter!(opt category: String);
    setter!(opt price: f64);
    setter!(opt currency: String);
    setter!(opt is_active: bool);
}

impl Request for UpdateProduct {
    type Data = Self;
    type Response = Product;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/products/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteProduct {
    id: i64,
}

impl DeleteProduct {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for DeleteProduct {
    type Data = ();
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/products/{}", self.id).into()
    }
}

// Documents

#[derive(Debug, Clone, Serialize)]
pub struct ListProductDocuments {
    #[serde(skip)]
    product_id: i64,
    page_id: u32,
    page_size: u32,
}

impl ListProductDocuments {
    pub fn new(product_id: i64) -> Self {
        let page = PageQuery::default();
        Self {
            product_id,
            page_id: page.page_id,
            page_size: page.page_size,
        }
    }

    pub fn page(mut self, page: PageQuery) -> Self {
        self.page_id = page.page_id;
        self.page_size = page.page_size;
        self
    }
}

impl Request for ListProductDocuments {
    type Data = Self;
    type Response = Vec<ProductDocument>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/products/{}/documents", self.product_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(self)
    }
}

/// Multipart upload of a document attached to a product. The file travels as
/// the `file` part, `product_id` and `description` as plain text fields.
#[derive(Debug, Clone)]
pub struct UploadDocument {
    product_id: i64,
    file_name: String,
    mime: String,
    bytes: Vec<u8>,
    description: Option<String>,
}

impl UploadDocument {
    pub fn new(product_id: i64, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            product_id,
            file_name: file_name.into(),
            mime: "application/octet-stream".to_owned(),
            bytes,
            description: None,
        }
    }

    setter!(mime: String);
    setter!(opt description: String);
}

impl Request for UploadDocument {
    type Data = ();
    type Response = ProductDocument;

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/products/documents".into()
    }

    fn multipart(&self) -> Option<MultipartForm> {
        let mut fields = vec![("product_id", self.product_id.to_string())];
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        Some(MultipartForm {
            file_field: "file",
            file_name: self.file_name.clone(),
            mime: self.mime.clone(),
            bytes: self.bytes.clone(),
            fields,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GetDocumentDetail {
    id: i64,
}

impl GetDocumentDetail {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for GetDocumentDetail {
    type Data = ();
    type Response = ProductDocument;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/products/documents/details/{}", self.id).into()
    }
}

#[derive(Debug, Clone)]
pub struct DeleteDocument {
    id: i64,
}

impl DeleteDocument {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Request for DeleteDocument {
    type Data = ();
    type Response = EmptyResponse;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/products/documents/details/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetDocumentSections {
    #[serde(skip)]
    document_id: i64,
    page_id: u32,
    page_size: u32,
}

impl GetDocumentSections {
    pub fn new(document_id: i64) -> Self {
        Self {
            document_id,
            // Sections are small, fetch a chapter's worth at a time.
            page_id: 1,
            page_size: 100,
        }
    }

    pub fn page(mut self, page: PageQuery) -> Self {
        self.page_id = page.page_id;
        self.page_size = page.page_size;
        self
    }
}

impl Request for GetDocumentSections {
    type Data = Self;
    type Response = Vec<DocumentSection>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/documents/{}/sections", self.document_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchDocuments {
    #[serde(skip)]
    product_id: i64,
    query: String,
}

impl SearchDocuments {
    pub fn new(product_id: i64, query: impl Into<String>) -> Self {
        Self {
            product_id,
            query: query.into(),
        }
    }
}

impl Request for SearchDocuments {
    type Data = Self;
    type Response = Vec<DocumentSection>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/products/{}/documents/search", self.product_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(self)
    }
}
