//! Login and the config file.

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use nubras_client::BackOfficeConfig;
use serde_json::json;
use tracing::info;

use super::operator_error;
use crate::cli::{ConfigCommands, LoginArgs};
use crate::context::Context;
use crate::output::print_json;

const REDACTED: &str = "<redacted>";

pub async fn login(mut ctx: Context, args: LoginArgs) -> Result<()> {
    let outcome = ctx
        .client
        .login(&args.email, &args.password)
        .await
        .map_err(operator_error)?;

    let saved = match (args.save, outcome.session_cookie.clone()) {
        (true, Some(cookie)) => {
            ctx.config.api.session_cookie = Some(cookie);
            let path = ctx
                .config
                .save(ctx.config_path.clone())
                .context("Failed to save session to config")?;
            info!(path = %path.display(), "Session cookie saved");
            Some(path)
        }
        (true, None) => bail!("Logged in, but the server sent no session cookie to save"),
        (false, _) => None,
    };

    if ctx.json {
        return print_json(&json!({
            "user": outcome.user,
            "savedTo": saved,
        }));
    }

    println!("Logged in as {}", args.email);
    if let Some(path) = saved {
        println!("Session saved to {}", path.display());
    }
    Ok(())
}

/// Copy of the config safe to print.
fn redacted(config: &BackOfficeConfig) -> BackOfficeConfig {
    let mut shown = config.clone();
    if shown.api.session_cookie.is_some() {
        shown.api.session_cookie = Some(REDACTED.to_string());
    }
    shown
}

pub fn config(command: ConfigCommands, config_path: Option<PathBuf>, json: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = BackOfficeConfig::load(config_path.clone())
                .context("Failed to load back-office configuration")?;
            let shown = redacted(&config);

            if json {
                return print_json(&shown);
            }
            match config_path.or_else(BackOfficeConfig::default_config_path) {
                Some(path) => println!("# {}", path.display()),
                None => println!("# (no config path available)"),
            }
            print!("{}", toml::to_string_pretty(&shown)?);
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = config_path
                .or_else(BackOfficeConfig::default_config_path)
                .context("No config path available; pass --config")?;
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let written = BackOfficeConfig::default().save(Some(path))?;
            println!("Wrote default config to {}", written.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_hides_cookie() {
        let mut config = BackOfficeConfig::default();
        config.api.session_cookie = Some("sid=secret".into());
        assert_eq!(redacted(&config).api.session_cookie.as_deref(), Some(REDACTED));
        assert!(redacted(&BackOfficeConfig::default()).api.session_cookie.is_none());
    }

    #[test]
    fn test_init_writes_loadable_file_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backoffice.toml");

        config(ConfigCommands::Init { force: false }, Some(path.clone()), false).unwrap();
        let loaded = BackOfficeConfig::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.business.currency, "AED");

        assert!(config(ConfigCommands::Init { force: false }, Some(path.clone()), false).is_err());
        config(ConfigCommands::Init { force: true }, Some(path), false).unwrap();
    }
}
