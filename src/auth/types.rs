//! Wire types for the auth endpoints and route classification.

use serde::{Deserialize, Serialize};

/// Fallback route for denied candidate access and forced logouts.
pub const LOGIN_ROUTE: &str = "/login";
/// Fallback route for denied admin access.
pub const HOME_ROUTE: &str = "/";

/// Identity roles as reported by `/auth/is-logged-in`.
///
/// Unknown roles deserialize to [`Role::Other`] rather than failing, since
/// the guards only care whether a role is one of the two admin roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    FranchiseAdmin,
    Candidate,
    Recruiter,
    #[serde(other)]
    Other,
}

impl Role {
    /// True for the roles the admin guard accepts; the candidate guard
    /// accepts exactly the complement.
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::FranchiseAdmin)
    }
}

/// Identity returned by `/auth/is-logged-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Outcome of an identity check. Not persisted; recomputed on every guard
/// evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityResult {
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Coarse classification of the caller's current location, used by the
/// refresh protocol to decide whether a forced logout is appropriate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Login,
    Signup,
    Other,
}

impl RouteKind {
    /// Classify a path the way the browser shell did: by substring, so
    /// nested routes like `/franchise/signup` still count.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.contains("signup") {
            Self::Signup
        } else if path.contains("login") {
            Self::Login
        } else {
            Self::Other
        }
    }
}
