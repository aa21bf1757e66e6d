use std::future::Future;

use crate::error::CoreError;
use crate::model::RecordCollection;
use crate::query::UpdateSet;

/// The remote operations the workflows depend on.
///
/// [`Controller`](crate::Controller) implements this over an authenticated
/// console session; tests substitute an in-memory source.
pub trait RecordSource {
    /// Fetch the full DPSK list.
    fn fetch_all(&self) -> impl Future<Output = Result<RecordCollection, CoreError>>;

    /// Ask the controller to generate one DPSK for `user` on a WLAN.
    fn create_record(
        &self,
        wlansvc_id: i64,
        user: &str,
        length: u8,
    ) -> impl Future<Output = Result<(), CoreError>>;

    /// Apply a partial update to one record.
    fn update_record(
        &self,
        id: i64,
        updates: &UpdateSet,
    ) -> impl Future<Output = Result<(), CoreError>>;
}
