pub mod endpoints;
mod error;
mod macros;
mod middleware;
pub mod repositories;
pub mod request;

pub use crate::error::ApiError;
pub use crate::middleware::{BearerAuth, Middleware, RequestContext, RetryOn401, Verdict};
pub use crate::request::{EmptyResponse, Method, MultipartForm, RequestData};

use crate::error::ErrorBody;
use crate::request::Request as ApiRequest;
use crm_auth::Session;
use repositories::*;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Gateway for every resource call: attaches credentials, retries once
/// after a 401 via the session's shared refresh, and turns non-2xx
/// responses into typed errors. Views never talk to the backend except
/// through this client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl Client {
    pub fn new(session: Arc<Session>) -> Self {
        let settings = session.settings();
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .expect("Failed to create HTTP client");
        let base_url = settings.api_base_url.clone();

        let middleware: Vec<Arc<dyn Middleware>> = vec![
            Arc::new(BearerAuth::new(session.clone())),
            Arc::new(RetryOn401::new(session)),
        ];

        Self {
            http,
            base_url,
            middleware,
        }
    }

    /// Append a hook after the default chain.
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        let mut ctx = RequestContext {
            path: request.endpoint().into_owned(),
            retried: false,
        };

        loop {
            let mut headers = HeaderMap::new();
            for mw in &self.middleware {
                mw.before_send(&ctx, &mut headers).await?;
            }

            let url = format!("{}{}", self.base_url, ctx.path);
            let mut builder = self.http.request(request.method(), &url).headers(headers);
            builder = match request.data() {
                RequestData::Empty => builder,
                RequestData::Query(query) => builder.query(query),
                RequestData::Json(body) => builder.json(body),
            };
            if let Some(form) = request.multipart() {
                let file = reqwest::multipart::Part::bytes(form.bytes)
                    .file_name(form.file_name)
                    .mime_str(&form.mime)
                    .map_err(ApiError::Network)?;
                let mut multipart = reqwest::multipart::Form::new().part(form.file_field, file);
                for (name, value) in form.fields {
                    multipart = multipart.text(name, value);
                }
                builder = builder.multipart(multipart);
            }

            let response = builder.send().await.map_err(ApiError::Network)?;
            let status = response.status();

            if status.is_success() {
                let bytes = response.bytes().await.map_err(ApiError::Network)?;
                let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
                return serde_json::from_slice(payload).map_err(ApiError::Decode);
            }

            let body: ErrorBody = response.json().await.unwrap_or_default();

            let mut verdict = Verdict::Continue;
            for mw in &self.middleware {
                if matches!(mw.on_response(&ctx, status).await?, Verdict::Retry) {
                    verdict = Verdict::Retry;
                }
            }
            if matches!(verdict, Verdict::Retry) && !ctx.retried {
                ctx.retried = true;
                debug!(path = %ctx.path, "replaying request");
                continue;
            }

            return Err(ApiError::Http {
                status,
                message: body.message(),
                details: body.details.unwrap_or(serde_json::Value::Null),
            });
        }
    }

    // Plain-verb escape hatches for endpoints without a typed request.

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Verb::<T>::new(Method::GET, path)).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        self.send(Verb::<T>::new(Method::GET, path).query(serde_json::to_value(query)?))
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        self.send(Verb::<T>::new(Method::POST, path).body(serde_json::to_value(body)?))
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        self.send(Verb::<T>::new(Method::PUT, path).body(serde_json::to_value(body)?))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Verb::<T>::new(Method::DELETE, path)).await
    }
}

/// Untyped verb request used by the plain-verb methods.
struct Verb<T> {
    method: Method,
    path: String,
    query: Option<serde_json::Value>,
    body: Option<serde_json::Value>,
    _response: PhantomData<fn() -> T>,
}

impl<T> Verb<T> {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: None,
            body: None,
            _response: PhantomData,
        }
    }

    fn query(mut self, query: serde_json::Value) -> Self {
        self.query = Some(query);
        self
    }

    fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl<T: DeserializeOwned> ApiRequest for Verb<T> {
    type Data = serde_json::Value;
    type Response = T;

    fn method(&self) -> Method {
        self.method.clone()
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::from(&self.path)
    }

    fn data(&self) -> RequestData<&Self::Data> {
        if let Some(body) = &self.body {
            RequestData::Json(body)
        } else if let Some(query) = &self.query {
            RequestData::Query(query)
        } else {
            RequestData::Empty
        }
    }
}

/// Entry point for building typed requests, one repository per resource.
pub struct Request;

impl Request {
    pub fn users() -> UserRepository {
        UserRepository::new()
    }

    pub fn contacts() -> ContactRepository {
        ContactRepository::new()
    }

    pub fn companies() -> CompanyRepository {
        CompanyRepository::new()
    }

    pub fn projects() -> ProjectRepository {
        ProjectRepository::new()
    }

    pub fn conversations() -> ConversationRepository {
        ConversationRepository::new()
    }

    pub fn meetings() -> MeetingRepository {
        MeetingRepository::new()
    }

    pub fn sales_flows() -> SalesFlowRepository {
        SalesFlowRepository::new()
    }

    pub fn products() -> ProductRepository {
        ProductRepository::new()
    }

    pub fn agents() -> AgentRepository {
        AgentRepository::new()
    }
}
