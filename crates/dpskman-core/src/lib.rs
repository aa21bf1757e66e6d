//! Domain model and query engine for DPSK credential records.
//!
//! This crate owns everything between the transport (`dpskman-api`) and
//! the CLI:
//!
//! - **Schema** ([`Field`], [`FieldKind`]) — the static table mapping each
//!   stable field identifier (`"mac"`, `"wlansvc-id"`, ...) to its type class
//!   and record accessor. Filter flags, update flags, and lookups are all
//!   generated from it.
//!
//! - **Query layer** ([`Predicate`], [`FilterSet`], [`UpdateSet`]) — raw
//!   flag values become validated exact / regexp predicates, composed into a
//!   conjunctive filter that is applied to a fetched [`RecordCollection`].
//!
//! - **[`RecordSource`]** — the three remote operations the workflows need.
//!   [`Controller`] implements it over an authenticated console session.
//!
//! - **Workflows** ([`workflow`]) — list, idempotent create, and batch modify.

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod query;
pub mod schema;
pub mod source;
pub mod workflow;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ControllerConfig, TlsVerification};
pub use controller::Controller;
pub use error::{CoreError, FilterError};
pub use model::{DpskRecord, MacAddress, RecordCollection};
pub use query::{FilterSet, Matcher, Predicate, UpdateSet};
pub use schema::{Field, FieldKind, FieldValue, FilterKind, FlagSpec};
pub use source::RecordSource;
pub use workflow::{CreateRequest, ModifyReport, Provisioned};
