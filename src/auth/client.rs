//! Endpoint wrappers for the auth API. Everything goes through the shared
//! [`Transport`]; login and logout touch the session store directly, the
//! identity check rides the refresh protocol like any other protected call.

use crate::auth::types::{IdentityResult, RouteKind};
use crate::error::AuthError;
use crate::transport::refresh::server_message;
use crate::transport::Transport;
use reqwest::Method;
use secrecy::SecretString;
use serde_json::{json, Value};
use tracing::debug;

const LOGIN_PATH: &str = "/auth/login";
const IS_LOGGED_IN_PATH: &str = "/auth/is-logged-in";

/// Log in and store the returned access token in the session.
///
/// The refresh-token cookie set by the server lands in the transport's
/// cookie store as a side effect of the response.
///
/// # Errors
/// Returns an error if the request fails, the server rejects the
/// credentials, or the response carries no `accessToken`.
pub async fn login(transport: &Transport, email: &str, password: &str) -> Result<(), AuthError> {
    let payload = json!({
        "email": email,
        "password": password
    });

    let response = transport
        .request_json(Method::POST, LOGIN_PATH, Some(&payload))
        .await?;

    if !response.status.is_success() {
        return Err(AuthError::Api {
            status: response.status.as_u16(),
            message: server_message(&response.body).to_string(),
        });
    }

    let token = response
        .body
        .get("data")
        .and_then(|v| v.get("accessToken"))
        .and_then(Value::as_str)
        .ok_or(AuthError::MissingField("accessToken"))?;

    transport
        .session()
        .set_token(SecretString::from(token.to_string()));
    debug!("login succeeded for {email}");

    Ok(())
}

/// Check the current identity through the refresh protocol.
///
/// # Errors
/// Returns an error if the request fails, the refresh protocol escalates,
/// or the response cannot be decoded.
pub async fn is_logged_in(
    transport: &Transport,
    route: RouteKind,
) -> Result<IdentityResult, AuthError> {
    let response = transport
        .execute(Method::GET, IS_LOGGED_IN_PATH, None, route)
        .await?;

    Ok(serde_json::from_value(response.body)?)
}

/// Log out: best-effort server call, then clear the session.
pub async fn logout(transport: &Transport) {
    transport.force_logout().await;
}
