use crate::auth::{AuthContext, GuardState, RouteGuard};
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, bail, Result};

/// Handle the whoami action: resolve a route guard for the attempted path
/// and report the outcome. The guard's navigation intent is printed, not
/// acted on; redirecting is the shell's business and here the shell is a
/// terminal.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Whoami { path, admin } = action else {
        return Err(anyhow!("unexpected action"));
    };

    let transport = globals.transport()?;
    let context = AuthContext::new();
    let mut guard = if admin {
        RouteGuard::admin(&path)
    } else {
        RouteGuard::candidate(&path)
    };

    match guard.resolve(&transport, &context).await {
        GuardState::Authorized(user) => {
            println!(
                "{} ({:?}) {}",
                user.name.as_deref().unwrap_or(&user.id),
                user.role,
                user.email.as_deref().unwrap_or("")
            );
            Ok(())
        }
        GuardState::Denied(redirect) => {
            bail!("access denied for {} - redirect to {}", redirect.from, redirect.to)
        }
        GuardState::Pending => Err(anyhow!("guard did not resolve")),
    }
}
