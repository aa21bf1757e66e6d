// ── Core error types ──
//
// User-facing errors from dpskman-core. Consumers never see raw transport
// or XML parse errors: the `From<dpskman_api::Error>` impl translates them
// into domain-appropriate variants, keeping any HTTP status in the message.

use thiserror::Error;

use crate::schema::Field;

/// Errors raised while turning raw flag values into predicates or updates.
///
/// All of these are detected before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("failed to compile regex pattern {pattern:?} for {field}: {detail}")]
    InvalidPattern {
        field: Field,
        pattern: String,
        detail: String,
    },

    #[error(
        "invalid timestamp '{0}', valid formats: Unix timestamp, RFC3339 or YYYY-MM-DD HH:MM:SS"
    )]
    InvalidTimestamp(String),

    #[error("invalid MAC address '{0}', valid formats: AA:BB:CC:DD:EE:FF or aa-bb-cc-dd-ee-ff")]
    InvalidMac(String),

    #[error("duplicate property filter: {0}")]
    DuplicateFilter(Field),

    #[error("no filters specified")]
    NoFiltersSpecified,

    #[error("no properties specified")]
    NoPropertiesSpecified,

    #[error("field '{0}' cannot be modified")]
    ReadOnlyField(Field),
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out")]
    Timeout,

    // ── Input errors ─────────────────────────────────────────────────
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Record id {0} appears more than once in the DPSK list")]
    DuplicateRecordId(i64),

    #[error("Malformed {field} attribute in DPSK list: {value:?}")]
    MalformedRecord { field: Field, value: String },

    #[error("DPSK for user '{user}' on WLAN {wlansvc_id} was created but is missing from the list")]
    CreatedRecordMissing { wlansvc_id: i64, user: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Modify aborted at DPSK {failed_id} after updating {} record(s)", updated.len())]
    BatchAborted {
        failed_id: i64,
        /// Ids already updated before the failure. These are not rolled back.
        updated: Vec<i64>,
        #[source]
        source: Box<CoreError>,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Controller error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Local I/O error: {0}")]
    Io(String),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<dpskman_api::Error> for CoreError {
    fn from(err: dpskman_api::Error) -> Self {
        use dpskman_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => Self::AuthenticationFailed { message },
            ApiError::SessionExpired => Self::AuthenticationFailed {
                message: "session expired -- the controller redirected to its login page".into(),
            },
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else if e.is_connect() {
                    Self::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    Self::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ApiError::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Tls(msg) => Self::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ApiError::Status { operation, status } => Self::Api {
                message: format!("{operation} failed with HTTP status {status}"),
                status: Some(status),
            },
            ApiError::Deserialization { message, body: _ } => Self::Api {
                message: format!("unexpected controller response: {message}"),
                status: None,
            },
            ApiError::Io(e) => Self::Io(e.to_string()),
        }
    }
}
