mod models;

pub use models::{CallbackTokens, RefreshRequest, RefreshResponse, UserProfile};
