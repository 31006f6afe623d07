//! Session commands.

use bluepenguin_admin::{ConsoleState, Route};
use secrecy::ExposeSecret;
use tracing::info;

use super::{CliError, emit, require};

/// Log in and persist the session.
pub async fn login(state: &ConsoleState, username: &str, password: &str) -> Result<(), CliError> {
    let response = state.services().auth.login(username, password).await?;

    state.session().set_auth(
        response.token.expose_secret(),
        response.user_id.clone(),
        response.expires_at,
    )?;

    emit(format_args!(
        "Logged in as {} until {}",
        response.user_id,
        response.expires_at.to_rfc3339()
    ));
    Ok(())
}

/// Clear the stored session.
pub fn logout(state: &ConsoleState) -> Result<(), CliError> {
    state.session().clear_auth()?;
    info!("Logged out");
    emit("Logged out");
    Ok(())
}

/// Print the stored session.
pub fn status(state: &ConsoleState) {
    let session = state.session();
    emit(format_args!("Backend:       {}", state.api().base_url()));

    if !session.is_authenticated() {
        let reason = if session.bearer_token().is_some() {
            "session expired"
        } else {
            "not logged in"
        };
        emit(format_args!("Authenticated: no ({reason})"));
        return;
    }

    emit("Authenticated: yes");
    if let Some(user_id) = session.user_id() {
        emit(format_args!("User:          {user_id}"));
    }
    if let Some(expires_at) = session.expires_at() {
        emit(format_args!("Expires:       {}", expires_at.to_rfc3339()));
    }
}

/// Hash a key with the backend.
pub async fn hash(state: &ConsoleState, key: &str) -> Result<(), CliError> {
    require(state, &Route::Dashboard)?;
    emit(state.services().auth.hash(key).await?);
    Ok(())
}
