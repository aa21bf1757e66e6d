// ── Controller ──
//
// One authenticated console session. `connect` logs in once; every call
// after that replays the same `Session`. There is no background work and
// no reconnection: the CLI runs one command per process.

use std::path::Path;

use dpskman_api::{RuckusClient, Session, TlsMode, TransportConfig};
use tracing::{debug, info};

use crate::config::{ControllerConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{DpskRecord, RecordCollection};
use crate::query::UpdateSet;
use crate::source::RecordSource;

pub struct Controller {
    client: RuckusClient,
    session: Session,
}

impl Controller {
    /// Build the HTTP client and log in.
    pub async fn connect(config: &ControllerConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let client = RuckusClient::new(config.url.clone(), &transport)?;

        debug!(url = %config.url, username = %config.username, "logging in");
        let session = client.login(&config.username, &config.password).await?;
        info!(url = %config.url, "connected to controller");

        Ok(Self { client, session })
    }

    /// Stream the controller's configuration backup to `dest`.
    pub async fn backup(&self, dest: &Path) -> Result<u64, CoreError> {
        let bytes = self.client.download_backup(&self.session, dest).await?;
        info!(bytes, path = %dest.display(), "backup saved");
        Ok(bytes)
    }
}

impl RecordSource for Controller {
    async fn fetch_all(&self) -> Result<RecordCollection, CoreError> {
        let raw = self.client.list_dpsk(&self.session).await?;
        let records = raw
            .into_iter()
            .map(DpskRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = records.len(), "fetched DPSK list");
        RecordCollection::new(records)
    }

    async fn create_record(&self, wlansvc_id: i64, user: &str, length: u8) -> Result<(), CoreError> {
        self.client
            .create_dpsk(&self.session, wlansvc_id, user, length)
            .await?;
        Ok(())
    }

    async fn update_record(&self, id: i64, updates: &UpdateSet) -> Result<(), CoreError> {
        self.client
            .update_dpsk(&self.session, id, &updates.to_attributes())
            .await?;
        Ok(())
    }
}

fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
