use crate::macros::setter;
use crate::request::{Method, Request, RequestData};
use crm_auth::UserProfile;
use serde::Serialize;
use std::borrow::Cow;

/// Who the current access token belongs to.
#[derive(Debug, Clone, Default)]
pub struct GetCurrentUser;

impl GetCurrentUser {
    pub fn new() -> Self {
        Self
    }
}

impl Request for GetCurrentUser {
    type Data = ();
    type Response = UserProfile;

    fn endpoint(&self) -> Cow<'_, str> {
        "/users/me".into()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCurrentUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl UpdateCurrentUser {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt name: String);
    setter!(opt email: String);
}

impl Request for UpdateCurrentUser {
    type Data = Self;
    type Response = UserProfile;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn endpoint(&self) -> Cow<'_, str> {
        "/users/me".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}
