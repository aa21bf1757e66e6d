// DPSK endpoints
//
// List, generate, and partially update dynamic pre-shared keys. Request
// bodies are the same `ajax-request` documents the console UI builds.

use std::collections::BTreeMap;

use chrono::Utc;
use quick_xml::escape::escape;
use tracing::debug;

use crate::auth::Session;
use crate::client::{RuckusClient, updater_stamp};
use crate::error::Error;
use crate::models::{RawDpsk, parse_dpsk_list};

const CMDSTAT: &str = "_cmdstat.jsp";
const CONF: &str = "_conf.jsp";

impl RuckusClient {
    /// Fetch every DPSK entry.
    ///
    /// `POST /admin/_cmdstat.jsp` with a `getstat` / `stamgr` request.
    pub async fn list_dpsk(&self, session: &Session) -> Result<Vec<RawDpsk>, Error> {
        let body = list_request(&updater_stamp(Utc::now()));
        let reply = self.post_ajax(session, CMDSTAT, body, "list DPSK").await?;
        let entries = parse_dpsk_list(&reply)?;
        debug!(count = entries.len(), "fetched DPSK list");
        Ok(entries)
    }

    /// Generate one DPSK for `user` on WLAN service `wlansvc_id`.
    ///
    /// The controller picks the passphrase; re-list to read it back.
    pub async fn create_dpsk(
        &self,
        session: &Session,
        wlansvc_id: i64,
        user: &str,
        length: u8,
    ) -> Result<(), Error> {
        let body = create_request(&updater_stamp(Utc::now()), wlansvc_id, user, length);
        debug!(wlansvc_id, user, length, "creating DPSK");
        self.post_ajax(session, CMDSTAT, body, "create DPSK")
            .await
            .map(drop)
    }

    /// Partially update DPSK `id` with the given attribute values.
    ///
    /// `POST /admin/_conf.jsp` with an `updobj` request flagged `IS_PARTIAL`.
    pub async fn update_dpsk(
        &self,
        session: &Session,
        id: i64,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), Error> {
        let body = update_request(&updater_stamp(Utc::now()), id, fields);
        debug!(id, fields = fields.len(), "updating DPSK");
        self.post_ajax(session, CONF, body, "modify DPSK")
            .await
            .map(drop)
    }
}

// ── Request bodies ───────────────────────────────────────────────────

pub(crate) fn list_request(stamp: &str) -> String {
    format!(
        r#"<ajax-request action="getstat" comp="stamgr" updater="dpsk-list.{stamp}"><dpsklist/></ajax-request>"#
    )
}

pub(crate) fn create_request(stamp: &str, wlansvc_id: i64, user: &str, length: u8) -> String {
    let user = escape(user);
    format!(
        "<ajax-request action='docmd' checkAbility='2' updater='system.{stamp}' comp='system'>\
         <xcmd cmd='batch-dpsk' type='gen' num='1' max-num='2048' batch-dpsk='' \
         wlansvc-id='{wlansvc_id}' role-id='' dpsk-len='{length}' dvlan-id='' user='{user}'/>\
         </ajax-request>"
    )
}

pub(crate) fn update_request(stamp: &str, id: i64, fields: &BTreeMap<String, String>) -> String {
    let attrs: String = fields
        .iter()
        .map(|(key, value)| format!(" {key}='{}'", escape(value.as_str())))
        .collect();
    format!(
        "<ajax-request action='updobj' updater='dpsk-list.{stamp}' comp='dpsk-list'>\
         <dpsk id='{id}' name='dpsk{id}' IS_PARTIAL='true'{attrs}/>\
         </ajax-request>"
    )
}
