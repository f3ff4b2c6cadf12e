mod callback;
mod id_token;
mod scheduler;
mod session;
mod settings;
mod token_storage;

pub use callback::extract_tokens;
pub use session::{AuthState, Session};
pub use settings::Settings;
pub use token_storage::TokenStore;

use crate::error::AuthError;
use std::sync::Arc;

/// Load configuration, restore any persisted session and try to resolve the
/// current user. Always returns a session; check `is_authenticated()` on the
/// result to find out whether a login is still needed.
pub async fn restore() -> Result<Arc<Session>, AuthError> {
    let settings = Settings::new()?;
    settings.validate().map_err(AuthError::Configuration)?;

    let store = TokenStore::new()?;
    let session = Session::new(settings, store);
    session.bootstrap().await;

    Ok(session)
}

/// Open the identity provider's login page in the system browser. The flow
/// completes when the provider redirects back and the caller hands the
/// redirect URL to [`Session::handle_callback`].
pub fn open_login(settings: &Settings) -> Result<(), AuthError> {
    open::that(settings.login_url()).map_err(AuthError::Io)
}
