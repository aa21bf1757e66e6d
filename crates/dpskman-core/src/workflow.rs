// ── DPSK workflows ──
//
// The three user-facing operations, written against `RecordSource` so they
// run the same over a live controller or an in-memory source. Remote calls
// are strictly sequential.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::DpskRecord;
use crate::query::{self, FilterSet, UpdateSet};
use crate::source::RecordSource;

pub const DEFAULT_PASSPHRASE_LENGTH: u8 = 12;
pub const MIN_PASSPHRASE_LENGTH: u8 = 8;
pub const MAX_PASSPHRASE_LENGTH: u8 = 62;

// ── List ─────────────────────────────────────────────────────────────

/// Fetch the list and return the records matching `filters`.
pub async fn list_matching<S: RecordSource>(
    source: &S,
    filters: &FilterSet,
) -> Result<Vec<DpskRecord>, CoreError> {
    let collection = source.fetch_all().await?;
    let matches = query::apply(&collection, filters);
    debug!(
        total = collection.len(),
        matched = matches.len(),
        "applied filters"
    );
    Ok(matches)
}

// ── Create ───────────────────────────────────────────────────────────

/// Validated arguments for an idempotent create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    wlansvc_id: i64,
    user: String,
    length: u8,
}

impl CreateRequest {
    /// Validate create arguments. `length` defaults to
    /// [`DEFAULT_PASSPHRASE_LENGTH`].
    pub fn new(wlansvc_id: i64, user: &str, length: Option<u32>) -> Result<Self, CoreError> {
        if wlansvc_id < 0 {
            return Err(CoreError::InvalidArgument {
                field: "wlansvc-id",
                reason: format!("must be zero or greater, got {wlansvc_id}"),
            });
        }
        if user.is_empty() {
            return Err(CoreError::InvalidArgument {
                field: "user",
                reason: "must not be empty".into(),
            });
        }

        let length = match length {
            None => DEFAULT_PASSPHRASE_LENGTH,
            Some(n) => u8::try_from(n)
                .ok()
                .filter(|n| (MIN_PASSPHRASE_LENGTH..=MAX_PASSPHRASE_LENGTH).contains(n))
                .ok_or_else(|| CoreError::InvalidArgument {
                    field: "length",
                    reason: format!(
                        "must be between {MIN_PASSPHRASE_LENGTH} and {MAX_PASSPHRASE_LENGTH}, got {n}"
                    ),
                })?,
        };

        Ok(Self {
            wlansvc_id,
            user: user.to_owned(),
            length,
        })
    }

    pub fn wlansvc_id(&self) -> i64 {
        self.wlansvc_id
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    fn find<'a>(&self, records: impl IntoIterator<Item = &'a DpskRecord>) -> Option<DpskRecord> {
        records
            .into_iter()
            .find(|r| r.wlansvc_id == self.wlansvc_id && r.user == self.user)
            .cloned()
    }
}

/// Outcome of [`ensure_record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provisioned {
    pub record: DpskRecord,
    /// `false` when an existing record was returned unchanged.
    pub created: bool,
}

/// Return the DPSK for the request's user and WLAN, creating it first if it
/// does not exist yet.
pub async fn ensure_record<S: RecordSource>(
    source: &S,
    request: &CreateRequest,
) -> Result<Provisioned, CoreError> {
    let existing = source.fetch_all().await?;
    if let Some(record) = request.find(&existing) {
        info!(id = record.id, user = %request.user, "DPSK already exists");
        return Ok(Provisioned {
            record,
            created: false,
        });
    }

    source
        .create_record(request.wlansvc_id, &request.user, request.length)
        .await?;

    let refreshed = source.fetch_all().await?;
    let record = request
        .find(&refreshed)
        .ok_or_else(|| CoreError::CreatedRecordMissing {
            wlansvc_id: request.wlansvc_id,
            user: request.user.clone(),
        })?;
    info!(id = record.id, user = %request.user, "DPSK created");

    Ok(Provisioned {
        record,
        created: true,
    })
}

// ── Modify ───────────────────────────────────────────────────────────

/// Ids updated by a completed modify batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModifyReport {
    pub updated: Vec<i64>,
}

/// Apply `updates` to each record in order, stopping at the first failure.
///
/// Not transactional: on failure the returned [`CoreError::BatchAborted`]
/// lists the ids already updated, which stay updated.
pub async fn apply_updates<S: RecordSource>(
    source: &S,
    targets: &[DpskRecord],
    updates: &UpdateSet,
) -> Result<ModifyReport, CoreError> {
    let mut updated = Vec::with_capacity(targets.len());
    for record in targets {
        if let Err(err) = source.update_record(record.id, updates).await {
            warn!(id = record.id, done = updated.len(), error = %err, "modify batch aborted");
            return Err(CoreError::BatchAborted {
                failed_id: record.id,
                updated,
                source: Box::new(err),
            });
        }
        debug!(id = record.id, "DPSK updated");
        updated.push(record.id);
    }
    Ok(ModifyReport { updated })
}

/// Fetch, filter, and update every match. Zero matches issues no update calls.
pub async fn modify_matching<S: RecordSource>(
    source: &S,
    filters: &FilterSet,
    updates: &UpdateSet,
) -> Result<ModifyReport, CoreError> {
    let targets = list_matching(source, filters).await?;
    apply_updates(source, &targets, updates).await
}
