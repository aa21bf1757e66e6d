//! Static record schema.
//!
//! [`Field`] is the closed set of DPSK attributes, keyed by the stable
//! kebab-case identifiers the controller uses. Filter flags, update flags,
//! and value lookups are all derived from this one table.

use std::fmt;

use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::FilterError;
use crate::model::DpskRecord;

/// Flag prefix for the regexp variant of a field filter.
pub const REGEXP_PREFIX: &str = "regexp-";

/// One DPSK record attribute.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Field {
    Id,
    RoleId,
    Mac,
    WlansvcId,
    DvlanId,
    User,
    LastRekey,
    NextRekey,
    Expire,
    StartPoint,
    Passphrase,
    IpAddr,
    CurSharedNum,
    Usage,
}

/// Type class of a field; drives normalization of exact values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Mac,
    Timestamp,
}

/// Borrowed view of a record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl Field {
    /// The stable external identifier, e.g. `"wlansvc-id"`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Id | Self::WlansvcId | Self::DvlanId => FieldKind::Integer,
            Self::Mac => FieldKind::Mac,
            Self::LastRekey | Self::NextRekey => FieldKind::Timestamp,
            Self::RoleId
            | Self::User
            | Self::Expire
            | Self::StartPoint
            | Self::Passphrase
            | Self::IpAddr
            | Self::CurSharedNum
            | Self::Usage => FieldKind::Text,
        }
    }

    /// Whether the field may appear in an update. The id addresses the
    /// update call itself.
    pub fn settable(self) -> bool {
        self != Self::Id
    }

    /// Look up an identifier, failing with [`FilterError::UnknownField`].
    pub fn parse(identifier: &str) -> Result<Self, FilterError> {
        identifier
            .parse()
            .map_err(|_| FilterError::UnknownField(identifier.to_owned()))
    }

    /// Read this attribute from a record.
    pub fn value_of(self, record: &DpskRecord) -> FieldValue<'_> {
        match self {
            Self::Id => FieldValue::Integer(record.id),
            Self::RoleId => FieldValue::Text(&record.role_id),
            Self::Mac => FieldValue::Text(&record.mac),
            Self::WlansvcId => FieldValue::Integer(record.wlansvc_id),
            Self::DvlanId => FieldValue::Integer(record.dvlan_id),
            Self::User => FieldValue::Text(&record.user),
            Self::LastRekey => FieldValue::Text(&record.last_rekey),
            Self::NextRekey => FieldValue::Text(&record.next_rekey),
            Self::Expire => FieldValue::Text(&record.expire),
            Self::StartPoint => FieldValue::Text(&record.start_point),
            Self::Passphrase => FieldValue::Text(&record.passphrase),
            Self::IpAddr => FieldValue::Text(&record.ip_addr),
            Self::CurSharedNum => FieldValue::Text(&record.cur_shared_num),
            Self::Usage => FieldValue::Text(&record.usage),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve an identifier to its type class.
pub fn resolve(identifier: &str) -> Result<FieldKind, FilterError> {
    Field::parse(identifier).map(Field::kind)
}

// ── Flag descriptors ────────────────────────────────────────────────

/// Which predicate a flag feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Exact,
    Regexp,
}

/// A generated command-line flag bound to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub field: Field,
    pub kind: FilterKind,
    /// Long flag name without leading dashes.
    pub name: String,
    pub help: String,
}

impl FlagSpec {
    fn exact(field: Field, verb: &str) -> Self {
        let help = match field.kind() {
            FieldKind::Timestamp => format!(
                "{verb} {field}, valid formats: Unix timestamp, RFC3339 or YYYY-MM-DD HH:MM:SS"
            ),
            FieldKind::Mac => format!(
                "{verb} {field}, valid formats: case insensitive AA:BB:CC:DD:EE:FF or aa-bb-cc-dd-ee-ff"
            ),
            FieldKind::Text | FieldKind::Integer => format!("{verb} {field}"),
        };
        Self {
            field,
            kind: FilterKind::Exact,
            name: field.as_str().to_owned(),
            help,
        }
    }

    fn regexp(field: Field) -> Self {
        let help = match field.kind() {
            FieldKind::Timestamp => format!("filter by {field}, format: unix timestamp"),
            FieldKind::Mac => format!("filter by {field}, format: a6:b5:c4:d2:e2:f1 (lowercase)"),
            FieldKind::Text | FieldKind::Integer => format!("filter by {field}"),
        };
        Self {
            field,
            kind: FilterKind::Regexp,
            name: format!("{REGEXP_PREFIX}{field}"),
            help,
        }
    }
}

/// Filter flags for every field: all exact flags, then all regexp flags.
pub fn filter_flags() -> Vec<FlagSpec> {
    Field::iter()
        .map(|f| FlagSpec::exact(f, "filter by"))
        .chain(Field::iter().map(FlagSpec::regexp))
        .collect()
}

/// Value flags accepted after `set` in a modify command.
pub fn update_flags() -> Vec<FlagSpec> {
    Field::iter()
        .filter(|f| f.settable())
        .map(|f| FlagSpec::exact(f, "set"))
        .collect()
}

/// Render a flag listing with plain flags ahead of `regexp-` flags.
pub fn render_usage(flags: &[FlagSpec]) -> String {
    let (regexp, plain): (Vec<&FlagSpec>, Vec<&FlagSpec>) = flags
        .iter()
        .partition(|f| f.name.starts_with(REGEXP_PREFIX));

    plain
        .into_iter()
        .chain(regexp)
        .map(|f| format!("  --{}: {}\n", f.name, f.help))
        .collect()
}
