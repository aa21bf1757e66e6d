// ── Query engine ──
//
// Raw flag values -> validated predicates -> filtered collection.
// Everything here is pure and synchronous; it runs before any network call
// and again over the fetched list.

pub mod filter_set;
pub mod normalize;
pub mod predicate;
pub mod update_set;

pub use filter_set::FilterSet;
pub use normalize::{normalize, parse_timestamp};
pub use predicate::{Matcher, Predicate};
pub use update_set::UpdateSet;

use crate::model::{DpskRecord, RecordCollection};

/// Records from `collection` matching every predicate in `filters`, in their
/// original order.
pub fn apply(collection: &RecordCollection, filters: &FilterSet) -> Vec<DpskRecord> {
    collection
        .iter()
        .filter(|r| filters.matches(r))
        .cloned()
        .collect()
}
