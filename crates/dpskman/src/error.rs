//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`, `FilterError`, and `ConfigError` into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use dpskman_config::ConfigError;
use dpskman_core::{CoreError, FilterError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const PARTIAL: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(dpskman::usage))]
    Usage {
        message: String,
        #[help]
        usage: Option<String>,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(dpskman::validation))]
    Validation { field: String, reason: String },

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(dpskman::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Self-signed certificate? Retry with --insecure (-k) or --ca-cert."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(dpskman::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(dpskman::auth_failed),
        help(
            "Verify the username and password.\n\
             Store a password with: dpskman config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(dpskman::no_credentials),
        help(
            "Pass --password, set DPSKMAN_PASSWORD, or run: dpskman config init"
        )
    )]
    NoCredentials { profile: String },

    // ── Records ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(dpskman::not_found),
        help("The controller accepted the request; run `dpskman dpsk list` to check.")
    )]
    NotFound { message: String },

    #[error("Modify stopped at DPSK {failed_id}: {reason}")]
    #[diagnostic(
        code(dpskman::partial_failure),
        help("Already updated (not rolled back): {updated}")
    )]
    PartialFailure {
        failed_id: i64,
        reason: String,
        updated: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Controller error: {message}")]
    #[diagnostic(code(dpskman::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(dpskman::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: dpskman config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(dpskman::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(dpskman::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(dpskman::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } | Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => {
                exit_code::USAGE
            }
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::PartialFailure { .. } => exit_code::PARTIAL,
            Self::ApiError { .. }
            | Self::ProfileNotFound { .. }
            | Self::Config { .. }
            | Self::Io(_)
            | Self::Render(_) => exit_code::GENERAL,
        }
    }

    /// A filter/update flag error, reported with the ordered flag listing.
    pub fn usage(err: &FilterError, listing: &str) -> Self {
        Self::Usage {
            message: err.to_string(),
            usage: Some(format!("Available flags:\n{listing}")),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Filter(e) => CliError::Usage {
                message: e.to_string(),
                usage: None,
            },

            CoreError::InvalidArgument { field, reason } => CliError::Validation {
                field: field.into(),
                reason,
            },

            e @ CoreError::CreatedRecordMissing { .. } => CliError::NotFound {
                message: e.to_string(),
            },

            CoreError::BatchAborted {
                failed_id,
                updated,
                source,
            } => CliError::PartialFailure {
                failed_id,
                reason: source.to_string(),
                updated: if updated.is_empty() {
                    "(none)".into()
                } else {
                    updated
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                },
            },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            e @ (CoreError::DuplicateRecordId(_) | CoreError::MalformedRecord { .. }) => {
                CliError::ApiError {
                    message: e.to_string(),
                    status: None,
                }
            }

            CoreError::Io(message) => CliError::Io(std::io::Error::other(message)),

            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile(name) => CliError::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
