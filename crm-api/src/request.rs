pub use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// Payload of an outbound request.
pub enum RequestData<T> {
    Empty,
    /// Serialized into the query string.
    Query(T),
    /// Serialized as a JSON body.
    Json(T),
}

/// A single file part plus accompanying text fields for multipart uploads.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    pub file_field: &'static str,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    pub fields: Vec<(&'static str, String)>,
}

/// A typed API request: endpoint, verb, payload, and the response shape it
/// deserializes into. Sent through [`crate::Client::send`].
pub trait Request: Send + Sync {
    type Data: Serialize + Sync;
    type Response: DeserializeOwned;

    fn method(&self) -> Method {
        Method::GET
    }

    fn endpoint(&self) -> Cow<'_, str>;

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }

    fn multipart(&self) -> Option<MultipartForm> {
        None
    }
}

/// Response for endpoints whose body carries nothing the caller needs
/// (deletes, toggles). Accepts any JSON, including none at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyResponse;

impl<'de> Deserialize<'de> for EmptyResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(EmptyResponse)
    }
}
