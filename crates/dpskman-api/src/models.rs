// XML response models for the console's `getstat` replies
//
// Shape: `ajax-response / response / apstamgr-stat / dpsk-list / dpsk`,
// with every record field carried as an attribute. Attributes are kept
// as raw strings here; `dpskman-core` converts them into domain types.

use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Deserialize)]
struct AjaxResponse {
    #[serde(default)]
    response: Option<AjaxPayload>,
}

#[derive(Debug, Deserialize)]
struct AjaxPayload {
    #[serde(rename = "apstamgr-stat", default)]
    apstamgr_stat: Option<ApstamgrStat>,
}

#[derive(Debug, Deserialize)]
struct ApstamgrStat {
    #[serde(rename = "dpsk-list", default)]
    dpsk_list: Option<DpskList>,
}

#[derive(Debug, Deserialize)]
struct DpskList {
    #[serde(rename = "dpsk", default)]
    entries: Vec<RawDpsk>,
}

/// One `<dpsk .../>` element, attributes verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawDpsk {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@role-id", default)]
    pub role_id: String,
    #[serde(rename = "@mac", default)]
    pub mac: String,
    #[serde(rename = "@wlansvc-id", default)]
    pub wlansvc_id: String,
    #[serde(rename = "@dvlan-id", default)]
    pub dvlan_id: String,
    #[serde(rename = "@user", default)]
    pub user: String,
    #[serde(rename = "@last-rekey", default)]
    pub last_rekey: String,
    #[serde(rename = "@next-rekey", default)]
    pub next_rekey: String,
    #[serde(rename = "@expire", default)]
    pub expire: String,
    #[serde(rename = "@start-point", default)]
    pub start_point: String,
    #[serde(rename = "@passphrase", default)]
    pub passphrase: String,
    #[serde(rename = "@ip-addr", default)]
    pub ip_addr: String,
    #[serde(rename = "@cur-shared-num", default)]
    pub cur_shared_num: String,
    #[serde(rename = "@usage", default)]
    pub usage: String,
}

/// Decode a `getstat` reply into its DPSK entries.
///
/// A reply without a `dpsk-list` element is an empty list, not an error.
pub fn parse_dpsk_list(body: &str) -> Result<Vec<RawDpsk>, Error> {
    let reply: AjaxResponse = quick_xml::de::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })?;

    Ok(reply
        .response
        .and_then(|r| r.apstamgr_stat)
        .and_then(|s| s.dpsk_list)
        .map(|l| l.entries)
        .unwrap_or_default())
}
