//! Route guards: gate rendering of a protected route tree on one identity
//! check per mount.
//!
//! A guard is constructed per navigation and resolves at most once; the
//! hosting shell re-creates it when the user navigates to a fresh protected
//! tree. Denied outcomes carry a redirect with the attempted location so the
//! shell can bounce back after login. Guard failures are deliberately silent
//! (no toast, no forced logout): this path fires on every cold load of a
//! protected route.

use crate::auth::client;
use crate::auth::state::AuthContext;
use crate::auth::types::{Role, RouteKind, User, HOME_ROUTE, LOGIN_ROUTE};
use crate::transport::Transport;
use tracing::debug;

/// Which role set a guard accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// Everyone except the admin roles.
    Candidate,
    /// Only `super_admin` and `franchise_admin`.
    Admin,
}

impl GuardKind {
    #[must_use]
    pub fn allows(self, role: Role) -> bool {
        match self {
            Self::Candidate => !role.is_admin(),
            Self::Admin => role.is_admin(),
        }
    }

    /// Where a denied visitor is sent.
    #[must_use]
    pub fn fallback(self) -> &'static str {
        match self {
            Self::Candidate => LOGIN_ROUTE,
            Self::Admin => HOME_ROUTE,
        }
    }
}

/// Navigation intent for a denied guard, carrying the attempted location
/// for an optional post-login redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    pub from: String,
}

/// Tri-state guard resolution. Terminal once resolved for the current
/// navigation.
#[derive(Debug, Clone)]
pub enum GuardState {
    Pending,
    Authorized(User),
    Denied(Redirect),
}

/// One guard instance per navigation into a protected route tree.
pub struct RouteGuard {
    kind: GuardKind,
    attempted: String,
    state: GuardState,
}

impl RouteGuard {
    #[must_use]
    pub fn new(kind: GuardKind, attempted: impl Into<String>) -> Self {
        Self {
            kind,
            attempted: attempted.into(),
            state: GuardState::Pending,
        }
    }

    /// Candidate-facing guard for the given attempted location.
    #[must_use]
    pub fn candidate(attempted: impl Into<String>) -> Self {
        Self::new(GuardKind::Candidate, attempted)
    }

    /// Admin-facing guard for the given attempted location.
    #[must_use]
    pub fn admin(attempted: impl Into<String>) -> Self {
        Self::new(GuardKind::Admin, attempted)
    }

    #[must_use]
    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Resolve the guard, issuing the identity check at most once.
    ///
    /// Subsequent calls return the cached state; a fresh navigation is
    /// modeled by constructing a fresh guard. On success the identity is
    /// stored into the shared context before the state flips to
    /// `Authorized`.
    pub async fn resolve(&mut self, transport: &Transport, context: &AuthContext) -> &GuardState {
        if !matches!(self.state, GuardState::Pending) {
            return &self.state;
        }

        let route = RouteKind::from_path(&self.attempted);
        self.state = match client::is_logged_in(transport, route).await {
            Ok(identity) if identity.success => match identity.user {
                Some(user) if self.kind.allows(user.role) => {
                    context.set_identity(user.clone());
                    GuardState::Authorized(user)
                }
                Some(user) => {
                    debug!("role {:?} rejected by {:?} guard", user.role, self.kind);
                    self.denied()
                }
                None => self.denied(),
            },
            Ok(identity) => {
                debug!(
                    "identity check unsuccessful: {}",
                    identity.message.as_deref().unwrap_or("")
                );
                self.denied()
            }
            Err(err) => {
                // Silent redirect; the caller never sees this error.
                debug!("identity check failed: {err}");
                self.denied()
            }
        };

        &self.state
    }

    fn denied(&self) -> GuardState {
        GuardState::Denied(Redirect {
            to: self.kind.fallback().to_string(),
            from: self.attempted.clone(),
        })
    }
}
