//! Shared HTTP transport for the EarlyJobs API.
//!
//! One `Transport` exists per API base URL and every endpoint wrapper routes
//! through it; the refresh protocol in [`refresh`] only observes failures on
//! this instance, so nothing may issue a raw request around it. The cookie
//! store stands in for the browser's `withCredentials` behavior: the
//! refresh-token cookie set at login flows with every request automatically.

pub mod refresh;

use crate::error::AuthError;
use crate::session::SessionStore;
use crate::APP_USER_AGENT;
use reqwest::{header, Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response wrapper for API requests. The body is kept as loose JSON so the
/// refresh protocol can inspect the server message before callers decode it.
#[derive(Debug)]
pub struct ApiResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: Value,
}

struct TransportInner {
    client: reqwest::Client,
    base_url: String,
    session: SessionStore,
    /// Serializes token refreshes so concurrently failing requests share one
    /// refresh instead of issuing a thundering herd of them.
    refresh_gate: Mutex<()>,
}

/// Credentialed HTTP client with the session's bearer header attached at
/// dispatch time. Cloning is cheap and all clones share the cookie store,
/// session, and refresh gate.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<TransportInner>,
}

impl Transport {
    /// Build a transport for the given API base URL with an injected session.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be constructed.
    pub fn new(base_url: &str, session: SessionStore) -> Result<Self, AuthError> {
        // Validate the base eagerly so a bad URL fails at startup, not on
        // the first request.
        endpoint_url(base_url, "/")?;

        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_store(true)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(TransportInner {
                client,
                base_url: base_url.to_string(),
                session,
                refresh_gate: Mutex::new(()),
            }),
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Build the full URL for an API path.
    ///
    /// # Errors
    /// Returns an error if the path does not start with `/` or the base URL
    /// cannot be parsed.
    pub fn endpoint_url(&self, path: &str) -> Result<String, AuthError> {
        if !path.starts_with('/') {
            return Err(AuthError::Url(format!("path must start with /: {path}")));
        }
        endpoint_url(&self.inner.base_url, path)
    }

    /// Issue one credentialed JSON request with the current bearer header.
    ///
    /// No interpretation happens here: non-success statuses come back as an
    /// [`ApiResponse`] for the caller (usually the refresh protocol) to
    /// classify. Only network-level failures are errors.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the request cannot be sent.
    pub async fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, AuthError> {
        let url = self.endpoint_url(path)?;
        debug!("api request: {} {}", method, url);

        let mut request = self
            .inner
            .client
            .request(method, &url)
            .header(header::ACCEPT, "application/json");
        // The header is read from the session at send time, so a token swap
        // between retries is picked up without rebuilding the client.
        if let Some(bearer) = self.inner.session.bearer() {
            request = request.header(header::AUTHORIZATION, bearer);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::Null)
        };

        Ok(ApiResponse { url, status, body })
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.inner.base_url)
            .field("session", &self.inner.session)
            .finish()
    }
}

/// Join a base URL and path, defaulting the port from the scheme.
///
/// # Errors
/// Returns an error if `base` cannot be parsed, has no host, or uses an
/// unsupported scheme.
pub fn endpoint_url(base: &str, path: &str) -> Result<String, AuthError> {
    let url = Url::parse(base)?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| AuthError::Url("no host specified".to_string()))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => return Err(AuthError::Url(format!("unsupported scheme {scheme}"))),
        },
    };

    Ok(format!("{scheme}://{host}:{port}{path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_defaults_http_port() -> Result<(), AuthError> {
        let url = endpoint_url("http://api.earlyjobs.in", "/auth/login")?;
        assert_eq!(url, "http://api.earlyjobs.in:80/auth/login");
        Ok(())
    }

    #[test]
    fn endpoint_url_defaults_https_port() -> Result<(), AuthError> {
        let url = endpoint_url("https://api.earlyjobs.in", "/auth/login")?;
        assert_eq!(url, "https://api.earlyjobs.in:443/auth/login");
        Ok(())
    }

    #[test]
    fn endpoint_url_keeps_explicit_port() -> Result<(), AuthError> {
        let url = endpoint_url("http://localhost:5000", "/auth/login")?;
        assert_eq!(url, "http://localhost:5000/auth/login");
        Ok(())
    }

    #[test]
    fn endpoint_url_rejects_unsupported_scheme() {
        let err = endpoint_url("ftp://api.earlyjobs.in", "/auth/login")
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.contains("unsupported scheme"));
    }

    #[test]
    fn transport_rejects_relative_path() -> Result<(), AuthError> {
        let transport = Transport::new("http://localhost:5000", SessionStore::new())?;
        assert!(transport.endpoint_url("auth/login").is_err());
        Ok(())
    }

    #[test]
    fn transport_rejects_bad_base_url() {
        assert!(Transport::new("not a url", SessionStore::new()).is_err());
    }
}
