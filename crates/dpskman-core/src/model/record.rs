use std::collections::HashSet;

use serde::Serialize;

use crate::error::CoreError;

/// One DPSK credential as held by the controller.
///
/// Identifier-like numbers are integers; everything else is kept as the
/// controller's text, including the epoch-second rekey stamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DpskRecord {
    pub id: i64,
    pub role_id: String,
    pub mac: String,
    pub wlansvc_id: i64,
    pub dvlan_id: i64,
    pub user: String,
    pub last_rekey: String,
    pub next_rekey: String,
    pub expire: String,
    pub start_point: String,
    pub passphrase: String,
    pub ip_addr: String,
    pub cur_shared_num: String,
    pub usage: String,
}

/// The records returned by one list call, in controller order.
///
/// Ids are unique within a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordCollection(Vec<DpskRecord>);

impl RecordCollection {
    pub fn new(records: Vec<DpskRecord>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
            return Err(CoreError::DuplicateRecordId(dup.id));
        }
        Ok(Self(records))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DpskRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&DpskRecord> {
        self.0.iter().find(|r| r.id == id)
    }

}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a DpskRecord;
    type IntoIter = std::slice::Iter<'a, DpskRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for RecordCollection {
    type Item = DpskRecord;
    type IntoIter = std::vec::IntoIter<DpskRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
