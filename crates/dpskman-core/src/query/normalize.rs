// ── Exact-value normalization ──
//
// Raw flag values are brought into the controller's own textual form before
// they are compared: timestamps become epoch seconds, MACs become lowercase
// colon-separated.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::error::FilterError;
use crate::model::MacAddress;
use crate::schema::FieldKind;

const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Normalize a raw exact value according to its field's type class.
pub fn normalize(kind: FieldKind, raw: &str) -> Result<String, FilterError> {
    match kind {
        FieldKind::Timestamp => parse_timestamp(raw).map(|secs| secs.to_string()),
        FieldKind::Mac => MacAddress::parse(raw).map(|mac| mac.to_string()),
        FieldKind::Text | FieldKind::Integer => Ok(raw.to_owned()),
    }
}

/// Parse a timestamp to epoch seconds.
///
/// Accepted, first match wins: a Unix epoch integer, RFC 3339, or
/// `YYYY-MM-DD HH:MM:SS` in the local time zone. An ambiguous local time
/// (DST fold) resolves to the earlier instant.
pub fn parse_timestamp(raw: &str) -> Result<i64, FilterError> {
    if let Ok(secs) = raw.parse::<i64>() {
        return Ok(secs);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp());
    }

    NaiveDateTime::parse_from_str(raw, LOCAL_DATETIME_FORMAT)
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|dt| dt.timestamp())
        .ok_or_else(|| FilterError::InvalidTimestamp(raw.to_owned()))
}
