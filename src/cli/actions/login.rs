use crate::auth::client;
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};

/// Handle the login action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Login { email, password } = action else {
        return Err(anyhow!("unexpected action"));
    };

    let transport = globals.transport()?;
    client::login(&transport, &email, &password).await?;

    println!("Logged in as {email}");

    Ok(())
}
