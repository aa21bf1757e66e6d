//! CLI configuration -- thin wrapper around `dpskman_config`.
//!
//! Layers `GlobalOpts` flag overrides (--controller, --password, ...) over
//! the active profile and translates the result into a `ControllerConfig`.

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use dpskman_core::{ControllerConfig, TlsVerification};

use crate::cli::{DEFAULT_CONTROLLER, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use dpskman_config::{Config, Profile, config_path, load_config_or_default, save_config};

/// Username used when neither a flag nor a profile names one.
const DEFAULT_USERNAME: &str = "dpsk";

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Output format: flag > `[defaults] output` > json.
pub fn resolve_output(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.output.clone().unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Json)
    })
}

/// Translate the active profile + global flags into a `ControllerConfig`.
///
/// CLI flag overrides take priority over profile values. Without any
/// profile, flags and `DPSKMAN_*` variables alone are enough.
pub fn resolve_controller_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ControllerConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = config.profiles.get(&profile_name);

    // An explicitly requested profile must exist
    if profile.is_none() && global.profile.is_some() {
        return Err(profile_not_found(profile_name, config));
    }

    // 1. Controller URL (flag > profile > built-in default)
    let url_str = global
        .controller
        .as_deref()
        .or_else(|| profile.map(|p| p.controller.as_str()).filter(|c| !c.is_empty()))
        .unwrap_or(DEFAULT_CONTROLLER);
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. Credentials
    let username = global
        .username
        .clone()
        .or_else(|| profile.and_then(|p| p.username.clone()))
        .unwrap_or_else(|| DEFAULT_USERNAME.into());
    let password = resolve_password(global, profile, &profile_name)?;

    // 3. TLS verification
    let insecure = global.insecure
        || profile.and_then(|p| p.insecure).unwrap_or(false)
        || config.defaults.insecure;
    let ca_cert = global
        .ca_cert
        .clone()
        .or_else(|| profile.and_then(|p| p.ca_cert.clone()));
    let tls = if insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ca_path) = ca_cert {
        TlsVerification::CustomCa(ca_path)
    } else {
        TlsVerification::SystemDefaults
    };

    // 4. Timeout (flag > profile > defaults)
    let timeout_secs = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(config.defaults.timeout);

    Ok(ControllerConfig {
        url,
        username,
        password,
        tls,
        timeout: Duration::from_secs(timeout_secs),
    })
}

/// Password: flag / `DPSKMAN_PASSWORD`, then the profile's chain.
fn resolve_password(
    global: &GlobalOpts,
    profile: Option<&Profile>,
    profile_name: &str,
) -> Result<SecretString, CliError> {
    if let Some(ref pw) = global.password {
        return Ok(SecretString::from(pw.clone()));
    }
    match profile {
        Some(p) => Ok(dpskman_config::resolve_password(p, profile_name)?),
        None => Err(CliError::NoCredentials {
            profile: profile_name.into(),
        }),
    }
}

pub fn profile_not_found(name: String, config: &Config) -> CliError {
    let available: Vec<_> = config.profiles.keys().cloned().collect();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}
