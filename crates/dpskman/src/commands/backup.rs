//! Backup command handler.

use crate::cli::{BackupArgs, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

use super::util;

pub async fn handle(args: BackupArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let controller = util::connect(cfg, global).await?;
    let bytes = controller.backup(&args.path).await?;
    if !global.quiet {
        eprintln!("✓ Saved {bytes} bytes to {}", args.path.display());
    }
    Ok(())
}
