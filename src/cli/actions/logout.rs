use crate::auth::client;
use crate::cli::globals::GlobalArgs;
use anyhow::Result;

/// Handle the logout action
pub async fn handle(globals: &GlobalArgs) -> Result<()> {
    let transport = globals.transport()?;
    client::logout(&transport).await;

    println!("Logged out");

    Ok(())
}
