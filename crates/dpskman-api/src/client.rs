// Admin console HTTP client
//
// Wraps `reqwest::Client` with console URL construction, session headers,
// and status handling. Endpoint groups (login, dpsk, backup) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use chrono::{DateTime, Utc};
use reqwest::header::{CONTENT_TYPE, COOKIE};
use tracing::{debug, trace};
use url::Url;

use crate::auth::Session;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Ruckus admin console.
///
/// Holds no session state: every authenticated call takes the [`Session`]
/// returned by [`login`](Self::login) explicitly.
pub struct RuckusClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RuckusClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the controller root, e.g. `https://unleashed.ruckuswireless.com`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// The client must not follow redirects, or login detection breaks.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/admin/{path}`, keeping any path prefix on the base URL.
    pub(crate) fn admin_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/admin/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// POST an `ajax-request` document and return the response body.
    ///
    /// A redirect means the console bounced us to its login page.
    pub(crate) async fn post_ajax(
        &self,
        session: &Session,
        path: &str,
        body: String,
        operation: &'static str,
    ) -> Result<String, Error> {
        let url = self.admin_url(path)?;
        debug!(%url, operation, "POST");
        trace!(body = %body, "ajax request");

        let resp = self
            .http
            .post(url)
            .header("X-CSRF-Token", session.csrf_token())
            .header(COOKIE, session.cookie())
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_redirection() {
            return Err(Error::SessionExpired);
        }
        if !status.is_success() {
            return Err(Error::Status {
                operation,
                status: status.as_u16(),
            });
        }

        let text = resp.text().await?;
        trace!(body = %text, "ajax response");
        Ok(text)
    }
}

/// The `updater` attribute the console's JavaScript stamps on requests:
/// epoch milliseconds, a dot, then the sub-millisecond microseconds
/// zero-padded to four digits.
pub(crate) fn updater_stamp(now: DateTime<Utc>) -> String {
    let micros = now.timestamp_micros();
    let millis = micros.div_euclid(1000);
    let fraction = micros.rem_euclid(1000);
    format!("{millis}.{fraction:04}")
}
