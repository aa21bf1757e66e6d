use thiserror::Error;

/// Top-level error type for the `dpskman-api` crate.
///
/// Covers every failure mode of the admin console transport:
/// login, HTTP, response decoding, and local file output for backups.
/// `dpskman-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected (no CSRF token handed back).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The controller redirected an AJAX call back to the login page.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status for a console operation.
    #[error("{operation} failed with HTTP status {status}")]
    Status { operation: &'static str, status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// XML deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Local file error while writing a download.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
