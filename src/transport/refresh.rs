//! Auth refresh protocol: classify API failures by the server-reported
//! message and attempt exactly one silent token refresh before giving up.
//!
//! The backend overloads 401 for several distinct conditions (missing token,
//! expired token, invalid refresh token), so classification keys on the exact
//! message strings the server emits. The string table lives here as named
//! constants behind a single [`classify`] function; a unit test pins the
//! literals so backend copy drift fails loudly instead of silently changing
//! recovery behavior.

use crate::auth::types::{RouteKind, LOGIN_ROUTE};
use crate::error::AuthError;
use crate::transport::{ApiResponse, Transport};
use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde_json::Value;
use tracing::{debug, warn};

pub const MSG_NO_TOKEN: &str = "Access denied. No token provided.";
pub const MSG_INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";
pub const MSG_TOKEN_NOT_VALID: &str = "Token is not valid.";

const REFRESH_PATH: &str = "/auth/refresh-token";
const LOGOUT_PATH: &str = "/auth/logout";

/// How a failed response should be recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// No token, or the refresh token itself was rejected. Forced logout,
    /// no retry.
    Unrecoverable,
    /// Expired access token. One refresh plus one retry.
    Expired,
    /// Anything else. Propagated to the caller untouched.
    Other,
}

#[must_use]
pub fn classify(status: StatusCode, message: &str) -> FailureClass {
    if message == MSG_NO_TOKEN || message == MSG_INVALID_REFRESH_TOKEN {
        FailureClass::Unrecoverable
    } else if status == StatusCode::UNAUTHORIZED && message == MSG_TOKEN_NOT_VALID {
        FailureClass::Expired
    } else {
        FailureClass::Other
    }
}

/// Server-reported message from a failure body of shape `{ message }`.
#[must_use]
pub fn server_message(body: &Value) -> &str {
    body.get("message").and_then(Value::as_str).unwrap_or("")
}

impl Transport {
    /// Issue a request through the refresh protocol.
    ///
    /// On success the response passes through unchanged. On failure the
    /// server message is classified: unrecoverable credentials force a
    /// logout (suppressed on login and signup routes), an expired token gets
    /// one silent refresh and one retry, and everything else surfaces to the
    /// caller as-is. The retried request's failure is surfaced directly and
    /// never re-enters the protocol.
    ///
    /// # Errors
    /// Returns an error for network failures and every non-success response.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        route: RouteKind,
    ) -> Result<ApiResponse, AuthError> {
        // Snapshot before the send so a concurrent refresh that lands while
        // this request is in flight is detectable below.
        let generation = self.session().generation();

        let response = self.request_json(method.clone(), path, body).await?;
        if response.status.is_success() {
            return Ok(response);
        }

        let message = server_message(&response.body).to_string();
        match classify(response.status, &message) {
            FailureClass::Unrecoverable => match route {
                // Signup flows tolerate anonymous 401s; on the login page a
                // forced logout would just loop the redirect.
                RouteKind::Signup | RouteKind::Login => {
                    Err(AuthError::SessionExpired {
                        message,
                        redirect: None,
                    })
                }
                RouteKind::Other => {
                    warn!("unrecoverable credential: {message}");
                    self.force_logout().await;
                    Err(AuthError::SessionExpired {
                        message,
                        redirect: Some(LOGIN_ROUTE.to_string()),
                    })
                }
            },
            FailureClass::Expired => {
                {
                    let _gate = self.inner.refresh_gate.lock().await;
                    if self.session().generation() == generation {
                        match self.refresh_access_token().await {
                            Ok(token) => self.session().set_token(token),
                            Err(err) => {
                                let message = err.to_string();
                                warn!("token refresh failed: {message}");
                                if route == RouteKind::Login {
                                    return Err(AuthError::RefreshFailed {
                                        message,
                                        redirect: None,
                                    });
                                }
                                self.force_logout().await;
                                return Err(AuthError::RefreshFailed {
                                    message,
                                    redirect: Some(LOGIN_ROUTE.to_string()),
                                });
                            }
                        }
                    } else {
                        debug!("token already refreshed by a concurrent request");
                    }
                }

                let retried = self.request_json(method, path, body).await?;
                if retried.status.is_success() {
                    Ok(retried)
                } else {
                    // Retried at most once: the second failure is final.
                    let message = server_message(&retried.body).to_string();
                    Err(AuthError::Api {
                        status: retried.status.as_u16(),
                        message,
                    })
                }
            }
            FailureClass::Other => Err(AuthError::Api {
                status: response.status.as_u16(),
                message,
            }),
        }
    }

    /// Mint a new access token from the refresh-token cookie.
    ///
    /// # Errors
    /// Returns an error if the request fails, the server rejects it, or the
    /// response carries no `accessToken`.
    pub(crate) async fn refresh_access_token(&self) -> Result<SecretString, AuthError> {
        let response = self.request_json(Method::POST, REFRESH_PATH, None).await?;

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

        debug!("access token refreshed");
        Ok(SecretString::from(token.to_string()))
    }

    /// Clear the session after telling the server, best effort.
    ///
    /// The server-side call is fire-and-forget: client state must be cleared
    /// whether or not the server acknowledges.
    pub async fn force_logout(&self) {
        if let Err(err) = self.request_json(Method::POST, LOGOUT_PATH, None).await {
            debug!("logout call failed: {err}");
        }
        self.session().clear_token();
    }
}
