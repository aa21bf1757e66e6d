// dpskman-api: Async client for the Ruckus admin console's AJAX endpoints
//
// The controller has no published API. Everything here mirrors what the
// web UI's JavaScript sends: a form login, then XML `ajax-request`
// documents posted to `_cmdstat.jsp` / `_conf.jsp`.

pub mod auth;
pub mod backup;
pub mod client;
pub mod dpsk;
pub mod error;
pub mod models;
pub mod transport;

pub use auth::Session;
pub use client::RuckusClient;
pub use error::Error;
pub use models::RawDpsk;
pub use transport::{TlsMode, TransportConfig};
