//! Session state shared by the transport and the guards.
//!
//! The store is the single source of truth for the Authorization header.
//! An optional token file mirrors the in-memory token across process
//! restarts, so the first request after a reload is already authenticated.

use secrecy::{ExposeSecret, SecretString};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

struct Inner {
    token: Option<SecretString>,
    /// Bumped on every mutation; lets a waiter on the refresh gate detect
    /// that another request already swapped the token.
    generation: u64,
}

/// Process-wide session holder. Cloning is cheap and all clones share state.
///
/// The store is injected into the [`crate::Transport`] constructor rather
/// than living as a module-level singleton, so tests get isolated sessions.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Inner>>,
    token_file: Option<PathBuf>,
}

impl SessionStore {
    /// In-memory only store, no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                token: None,
                generation: 0,
            })),
            token_file: None,
        }
    }

    /// Store backed by a token file. An existing file is read on
    /// construction, warming the header before any request is issued.
    #[must_use]
    pub fn with_token_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    debug!("loaded persisted token from {}", path.display());
                    Some(SecretString::from(trimmed.to_string()))
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!("could not read token file {}: {err}", path.display());
                None
            }
        };

        Self {
            inner: Arc::new(RwLock::new(Inner {
                token,
                generation: 0,
            })),
            token_file: Some(path),
        }
    }

    /// Set the session token and persist the on-disk mirror when configured.
    pub fn set_token(&self, token: SecretString) {
        {
            let mut inner = self.write();
            inner.token = Some(token.clone());
            inner.generation += 1;
        }
        if let Some(path) = &self.token_file {
            persist(path, &token);
        }
    }

    /// Clear the session token and remove the on-disk mirror.
    pub fn clear_token(&self) {
        {
            let mut inner = self.write();
            inner.token = None;
            inner.generation += 1;
        }
        if let Some(path) = &self.token_file {
            match fs::remove_file(path) {
                Ok(()) => debug!("removed token file {}", path.display()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => warn!("could not remove token file {}: {err}", path.display()),
            }
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.read().token.clone()
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.read().token.is_some()
    }

    /// Authorization header value for the current token, if any.
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.read()
            .token
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_token", &self.has_token())
            .field("generation", &self.generation())
            .field("token_file", &self.token_file)
            .finish()
    }
}

/// Best-effort write of the token mirror; in-memory state stays
/// authoritative if the write fails.
fn persist(path: &Path, token: &SecretString) {
    if let Err(err) = fs::write(path, token.expose_secret()) {
        warn!("could not persist token to {}: {err}", path.display());
        return;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(err) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
            warn!(
                "could not restrict permissions on {}: {err}",
                path.display()
            );
        }
    }

    debug!("persisted token to {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_formats_header_value() {
        let store = SessionStore::new();
        assert_eq!(store.bearer(), None);

        store.set_token(SecretString::from("abc".to_string()));
        assert_eq!(store.bearer().as_deref(), Some("Bearer abc"));

        store.clear_token();
        assert_eq!(store.bearer(), None);
    }

    #[test]
    fn generation_bumps_on_every_mutation() {
        let store = SessionStore::new();
        assert_eq!(store.generation(), 0);

        store.set_token(SecretString::from("t1".to_string()));
        assert_eq!(store.generation(), 1);

        store.set_token(SecretString::from("t2".to_string()));
        assert_eq!(store.generation(), 2);

        store.clear_token();
        assert_eq!(store.generation(), 3);
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::new();
        let clone = store.clone();

        store.set_token(SecretString::from("shared".to_string()));
        assert_eq!(clone.bearer().as_deref(), Some("Bearer shared"));
    }

    #[test]
    fn token_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("access-token");

        let store = SessionStore::with_token_file(&path);
        assert!(!store.has_token());

        store.set_token(SecretString::from("persisted".to_string()));
        assert!(path.exists());

        // A fresh store over the same file simulates a reload.
        let reloaded = SessionStore::with_token_file(&path);
        assert_eq!(reloaded.bearer().as_deref(), Some("Bearer persisted"));

        reloaded.clear_token();
        assert!(!path.exists());
    }

    #[test]
    fn missing_token_file_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::with_token_file(dir.path().join("never-written"));
        assert!(!store.has_token());
    }
}
