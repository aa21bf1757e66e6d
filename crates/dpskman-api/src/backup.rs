// Configuration backup download
//
// The console serves the backup archive from a JSP page. The archive is
// opaque to us; it is written to disk byte for byte.

use std::path::Path;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, COOKIE};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::auth::Session;
use crate::client::RuckusClient;
use crate::error::Error;

impl RuckusClient {
    /// Download the controller configuration backup into `dest`.
    ///
    /// `GET /admin/webPage/system/admin/_savebackup.jsp`. Only `200 OK`
    /// counts as success. Returns the number of bytes written.
    pub async fn download_backup(&self, session: &Session, dest: &Path) -> Result<u64, Error> {
        let url = self.admin_url("webPage/system/admin/_savebackup.jsp")?;
        debug!(%url, dest = %dest.display(), "downloading backup");

        let mut resp = self
            .http()
            .get(url)
            .header(ACCEPT, "application/octet-stream")
            .header(COOKIE, session.cookie())
            .send()
            .await?;

        let status = resp.status();
        if status.is_redirection() {
            return Err(Error::SessionExpired);
        }
        if status != StatusCode::OK {
            return Err(Error::Status {
                operation: "save backup",
                status: status.as_u16(),
            });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = resp.chunk().await? {
            file.write_all(&chunk).await?;
            written += u64::try_from(chunk.len()).unwrap_or(u64::MAX);
        }
        file.flush().await?;

        debug!(bytes = written, "backup saved");
        Ok(written)
    }
}
