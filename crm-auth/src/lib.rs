// Session side of the CRM client: durable token storage, session state,
// proactive refresh and login-callback handling.
pub mod common;

mod client;
mod error;

pub use client::{extract_tokens, open_login, restore, AuthState, Session, Settings, TokenStore};
pub use common::{CallbackTokens, UserProfile};
pub use error::AuthError;
