//! Command dispatch: bridges CLI args -> core workflows -> output formatting.

pub mod backup;
pub mod config_cmd;
pub mod dpsk;
pub mod flags;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
///
/// Handlers validate their arguments before connecting, so usage errors
/// never touch the network.
pub async fn dispatch(cmd: Command, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Dpsk(args) => dpsk::handle(args, cfg, global).await,
        Command::Backup(args) => backup::handle(args, cfg, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
