// ── Domain model ──
//
// The canonical DPSK record as the rest of the workspace sees it, plus the
// fetched collection and the strict MAC address type used for matching.

pub mod mac;
pub mod record;

pub use mac::MacAddress;
pub use record::{DpskRecord, RecordCollection};
