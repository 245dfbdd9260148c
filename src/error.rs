use thiserror::Error;

/// Error taxonomy for the session pipeline.
///
/// Recovery (refresh + retry) is contained inside the transport; everything
/// that escapes carries the server message verbatim so callers can surface it
/// unchanged. Variants that force a logout carry the navigation intent as
/// data instead of touching the environment.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unclassified API failure, propagated to the caller untouched.
    #[error("{status} - {message}")]
    Api { status: u16, message: String },

    /// Unrecoverable credential: no token, or the refresh token itself was
    /// rejected. The session has been cleared when `redirect` is set.
    #[error("session expired: {message}")]
    SessionExpired {
        message: String,
        redirect: Option<String>,
    },

    /// The silent refresh call failed; carries the refresh failure, not the
    /// original request's error.
    #[error("token refresh failed: {message}")]
    RefreshFailed {
        message: String,
        redirect: Option<String>,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Error parsing URL: {0}")]
    Url(String),

    #[error("Error parsing JSON response: no {0} found")]
    MissingField(&'static str),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AuthError {
    /// Navigation intent attached to this error, if any. The hosting shell
    /// decides how to act on it; the library never mutates location state.
    #[must_use]
    pub fn redirect(&self) -> Option<&str> {
        match self {
            Self::SessionExpired { redirect, .. } | Self::RefreshFailed { redirect, .. } => {
                redirect.as_deref()
            }
            _ => None,
        }
    }

    /// Server-reported message for user-facing display, when one exists.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. }
            | Self::SessionExpired { message, .. }
            | Self::RefreshFailed { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<url::ParseError> for AuthError {
    fn from(err: url::ParseError) -> Self {
        Self::Url(err.to_string())
    }
}
