use crate::request::Request;
use serde::Deserialize;
use std::borrow::Cow;

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct GetHealth;

impl GetHealth {
    pub fn new() -> Self {
        Self
    }
}

impl Request for GetHealth {
    type Data = ();
    type Response = HealthStatus;

    fn endpoint(&self) -> Cow<'_, str> {
        "/health".into()
    }
}
