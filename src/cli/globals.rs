use crate::session::SessionStore;
use crate::transport::Transport;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub token_file: Option<PathBuf>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            token_file: None,
        }
    }

    /// Session backed by the configured token file, or in-memory only.
    #[must_use]
    pub fn session(&self) -> SessionStore {
        match &self.token_file {
            Some(path) => SessionStore::with_token_file(path),
            None => SessionStore::new(),
        }
    }

    /// Transport over the configured API base URL.
    ///
    /// # Errors
    /// Returns an error if the API URL is invalid.
    pub fn transport(&self) -> Result<Transport> {
        Ok(Transport::new(&self.api_url, self.session())?)
    }
}
