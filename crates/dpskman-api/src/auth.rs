// Admin console authentication
//
// The console logs in through an HTML form. A successful login answers
// with an `HTTP_X_CSRF_TOKEN` header and a session cookie; both must be
// replayed on every AJAX call.

use std::fmt;

use reqwest::header::SET_COOKIE;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::RuckusClient;
use crate::error::Error;

const CSRF_HEADER: &str = "HTTP_X_CSRF_TOKEN";

/// An authenticated console session.
///
/// Produced by [`RuckusClient::login`] and passed into every subsequent
/// call. Cloning is cheap; nothing about it is mutated after login.
#[derive(Clone)]
pub struct Session {
    csrf_token: SecretString,
    cookie: SecretString,
}

impl Session {
    pub fn new(csrf_token: impl Into<String>, cookie: impl Into<String>) -> Self {
        Self {
            csrf_token: SecretString::from(csrf_token.into()),
            cookie: SecretString::from(cookie.into()),
        }
    }

    pub(crate) fn csrf_token(&self) -> &str {
        self.csrf_token.expose_secret()
    }

    pub(crate) fn cookie(&self) -> &str {
        self.cookie.expose_secret()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("csrf_token", &"[REDACTED]")
            .field("cookie", &"[REDACTED]")
            .finish()
    }
}

impl RuckusClient {
    /// Log in with the admin console form.
    ///
    /// `POST /admin/login.jsp` with `username`, `password`, `ok=Log In`.
    /// The console signals success only through the CSRF header; the
    /// status code is a redirect either way.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Session, Error> {
        let url = self.admin_url("login.jsp")?;
        debug!(%url, username, "logging in");

        let resp = self
            .http()
            .post(url)
            .form(&[
                ("username", username),
                ("password", password.expose_secret()),
                ("ok", "Log In"),
            ])
            .send()
            .await?;

        let status = resp.status();
        let Some(csrf_token) = resp
            .headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(String::from)
        else {
            return Err(Error::Authentication {
                message: format!("check user and password (HTTP {status})"),
            });
        };

        let cookie = resp
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|c| c.split(';').next())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("; ");

        debug!("login successful");
        Ok(Session::new(csrf_token, cookie))
    }
}
