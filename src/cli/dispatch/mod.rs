use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{Context, Result};

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    // Closure to return subcommand matches
    let sub_m = |subcommand| -> Result<&clap::ArgMatches> {
        matches
            .subcommand_matches(subcommand)
            .context("arguments not found")
    };

    let mut globals = GlobalArgs::new(
        matches
            .get_one("api-url")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --api-url"))?,
    );
    globals.token_file = matches.get_one::<std::path::PathBuf>("token-file").cloned();

    let action = match matches.subcommand_name() {
        Some("login") => {
            let matches = sub_m("login")?;
            Action::Login {
                email: matches
                    .get_one("email")
                    .map(|s: &String| s.to_string())
                    .ok_or_else(|| anyhow::anyhow!("missing required argument: --email"))?,
                password: matches
                    .get_one("password")
                    .map(|s: &String| s.to_string())
                    .ok_or_else(|| anyhow::anyhow!("missing required argument: --password"))?,
            }
        }
        Some("whoami") => {
            let matches = sub_m("whoami")?;
            Action::Whoami {
                path: matches
                    .get_one("path")
                    .map_or_else(|| "/dashboard".to_string(), |s: &String| s.to_string()),
                admin: matches.get_flag("admin"),
            }
        }
        Some("logout") => Action::Logout,
        _ => return Err(anyhow::anyhow!("no command provided")),
    };

    Ok((action, globals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn handler_builds_login_action() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "earlyjobs-auth",
            "--api-url",
            "http://localhost:5000",
            "--token-file",
            "/tmp/token",
            "login",
            "--email",
            "asha@example.com",
            "--password",
            "secret",
        ]);

        let (action, globals) = handler(&matches)?;
        assert_eq!(globals.api_url, "http://localhost:5000");
        assert_eq!(
            globals.token_file.as_ref().map(|p| p.display().to_string()),
            Some("/tmp/token".to_string())
        );
        match action {
            Action::Login { email, password } => {
                assert_eq!(email, "asha@example.com");
                assert_eq!(password, "secret");
            }
            other => panic!("unexpected action: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn handler_builds_whoami_action() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "earlyjobs-auth",
            "--api-url",
            "http://localhost:5000",
            "whoami",
            "--path",
            "/admin/dashboard",
            "--admin",
        ]);

        let (action, _) = handler(&matches)?;
        match action {
            Action::Whoami { path, admin } => {
                assert_eq!(path, "/admin/dashboard");
                assert!(admin);
            }
            other => panic!("unexpected action: {other:?}"),
        }
        Ok(())
    }
}
