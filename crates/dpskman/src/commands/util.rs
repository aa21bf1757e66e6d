//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};

use dpskman_core::Controller;

use crate::cli::GlobalOpts;
use crate::config::{self, Config};
use crate::error::CliError;

/// Resolve the controller settings and log in.
pub async fn connect(cfg: &Config, global: &GlobalOpts) -> Result<Controller, CliError> {
    let controller_config = config::resolve_controller_config(global, cfg)?;
    Ok(Controller::connect(&controller_config).await?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, `--yes` is required.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(io::Error::other(e)))?;
    Ok(confirmed)
}
