pub mod client;
pub mod guards;
pub mod state;
pub mod types;

pub use guards::{GuardKind, GuardState, Redirect, RouteGuard};
pub use state::AuthContext;
pub use types::{IdentityResult, Role, RouteKind, User};
