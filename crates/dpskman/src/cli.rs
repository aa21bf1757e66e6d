//! Clap derive structures for the `dpskman` CLI.
//!
//! The per-field filter and update flags of `dpsk list` / `dpsk modify` are
//! generated at run time from the record schema; here they are captured as
//! raw arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Console URL used when neither a flag nor a profile names one.
pub const DEFAULT_CONTROLLER: &str = "https://unleashed.ruckuswireless.com";

// ── Top-Level CLI ────────────────────────────────────────────────────

/// dpskman -- manage Dynamic PSK credentials on Ruckus controllers
#[derive(Debug, Parser)]
#[command(
    name = "dpskman",
    version,
    about = "Manage Dynamic PSK credentials on Ruckus Unleashed controllers",
    long_about = "List, provision, and bulk-edit Dynamic Pre-Shared Key (DPSK) \
        credentials through the controller's admin console, and download \
        configuration backups.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "DPSKMAN_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL (overrides profile) [default: https://unleashed.ruckuswireless.com]
    #[arg(long, short = 'c', env = "DPSKMAN_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Admin username (overrides profile)
    #[arg(long, short = 'u', env = "DPSKMAN_USERNAME", global = true)]
    pub username: Option<String>,

    /// Admin password (prefer the keyring or DPSKMAN_PASSWORD)
    #[arg(
        long,
        env = "DPSKMAN_PASSWORD",
        global = true,
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Custom CA certificate (PEM) for the controller
    #[arg(long, env = "DPSKMAN_CA_CERT", global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "DPSKMAN_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "DPSKMAN_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format [default: json]
    #[arg(long, short = 'o', env = "DPSKMAN_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', env = "DPSKMAN_QUIET", global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', env = "DPSKMAN_YES", global = true)]
    pub yes: bool,
}

impl GlobalOpts {
    /// Selected output format, `json` when unset.
    pub fn format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Json)
    }
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Pretty table
    Table,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage Dynamic PSK records
    Dpsk(DpskArgs),

    /// Download the controller configuration backup
    Backup(BackupArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DPSK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DpskArgs {
    #[command(subcommand)]
    pub command: DpskCommand,
}

#[derive(Debug, Subcommand)]
pub enum DpskCommand {
    /// List DPSK records matching the given field filters
    #[command(alias = "ls", disable_help_flag = true)]
    List(FieldFlags),

    /// Return the DPSK for a user on a WLAN, creating it if missing
    Create(CreateArgs),

    /// Update every DPSK matching the filters: <FILTERS> set <VALUES>
    #[command(disable_help_flag = true)]
    Modify(FieldFlags),
}

/// Raw `--<field>` / `--regexp-<field>` flags, parsed against the record
/// schema by the handler. Run with `--help` for the full listing.
#[derive(Debug, Args)]
pub struct FieldFlags {
    /// Field flags, e.g. `--user alice --regexp-mac '^aa:'`
    #[arg(
        value_name = "FLAGS",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub flags: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// WLAN service id the DPSK belongs to
    #[arg(long)]
    pub wlansvc_id: i64,

    /// Username the DPSK is issued to
    #[arg(long)]
    pub user: String,

    /// Generated passphrase length (8-62) [default: 12]
    #[arg(long)]
    pub length: Option<u32>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BACKUP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BackupArgs {
    /// Where to write the backup archive
    #[arg(default_value = "file.bak")]
    pub path: PathBuf,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's password in the system keyring
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
