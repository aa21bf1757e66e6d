// ── API-to-domain conversion ──
//
// Raw `getstat` attributes are text. Integer identifiers are parsed here;
// a missing attribute reads as 0 the way the console's own UI treats it.

use dpskman_api::RawDpsk;

use crate::error::CoreError;
use crate::model::DpskRecord;
use crate::schema::Field;

fn parse_int(field: Field, raw: &str) -> Result<i64, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| CoreError::MalformedRecord {
        field,
        value: raw.to_owned(),
    })
}

impl TryFrom<RawDpsk> for DpskRecord {
    type Error = CoreError;

    fn try_from(raw: RawDpsk) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_int(Field::Id, &raw.id)?,
            wlansvc_id: parse_int(Field::WlansvcId, &raw.wlansvc_id)?,
            dvlan_id: parse_int(Field::DvlanId, &raw.dvlan_id)?,
            role_id: raw.role_id,
            mac: raw.mac,
            user: raw.user,
            last_rekey: raw.last_rekey,
            next_rekey: raw.next_rekey,
            expire: raw.expire,
            start_point: raw.start_point,
            passphrase: raw.passphrase,
            ip_addr: raw.ip_addr,
            cur_shared_num: raw.cur_shared_num,
            usage: raw.usage,
        })
    }
}
