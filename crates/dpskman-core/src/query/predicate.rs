use std::fmt;

use regex::Regex;

use crate::error::FilterError;
use crate::model::DpskRecord;
use crate::query::normalize::normalize;
use crate::schema::{Field, FieldValue};

/// How a predicate tests a field's text.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Case-sensitive equality with an already-normalized value.
    Exact(String),
    /// Unanchored search.
    Regexp(Regex),
}

impl Matcher {
    pub fn test(&self, candidate: &str) -> bool {
        match self {
            Self::Exact(target) => candidate == target,
            Self::Regexp(re) => re.is_match(candidate),
        }
    }
}

/// A single-field test.
#[derive(Debug, Clone)]
pub struct Predicate {
    pub field: Field,
    pub matcher: Matcher,
}

impl Predicate {
    /// Build an exact predicate. An empty raw value is inactive (`None`).
    pub fn exact(field: Field, raw: &str) -> Result<Option<Self>, FilterError> {
        if raw.is_empty() {
            return Ok(None);
        }
        let normalized = normalize(field.kind(), raw)?;
        Ok(Some(Self {
            field,
            matcher: Matcher::Exact(normalized),
        }))
    }

    /// Build a regexp predicate. An empty pattern is inactive (`None`).
    pub fn regexp(field: Field, pattern: &str) -> Result<Option<Self>, FilterError> {
        if pattern.is_empty() {
            return Ok(None);
        }
        let re = Regex::new(pattern).map_err(|e| FilterError::InvalidPattern {
            field,
            pattern: pattern.to_owned(),
            detail: e.to_string(),
        })?;
        Ok(Some(Self {
            field,
            matcher: Matcher::Regexp(re),
        }))
    }

    /// Test a field's string form directly.
    pub fn test(&self, candidate: &str) -> bool {
        self.matcher.test(candidate)
    }

    /// Test against the predicate's field on a record. Integer fields are
    /// compared as base-10 text.
    pub fn matches(&self, record: &DpskRecord) -> bool {
        let value = self.field.value_of(record);
        match value {
            FieldValue::Text(text) => self.test(text),
            FieldValue::Integer(_) => self.test(&value.to_string()),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.matcher {
            Matcher::Exact(v) => write!(f, "{}: {v}", self.field),
            Matcher::Regexp(re) => write!(f, "{}: regexp: {}", self.field, re.as_str()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_inactive() {
        assert!(Predicate::exact(Field::User, "").unwrap().is_none());
        assert!(Predicate::regexp(Field::User, "").unwrap().is_none());
    }

    #[test]
    fn regexp_is_unanchored_search() {
        let p = Predicate::regexp(Field::User, "^guest-").unwrap().unwrap();
        assert!(p.test("guest-42"));
        assert!(!p.test("admin-1"));

        let inner = Predicate::regexp(Field::User, "est").unwrap().unwrap();
        assert!(inner.test("guest-42"));
    }

    #[test]
    fn bad_pattern_reports_field_and_pattern() {
        let err = Predicate::regexp(Field::Mac, "(unclosed").unwrap_err();
        match err {
            FilterError::InvalidPattern { field, pattern, .. } => {
                assert_eq!(field, Field::Mac);
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn exact_is_case_sensitive_for_text() {
        let p = Predicate::exact(Field::User, "Alice").unwrap().unwrap();
        assert!(p.test("Alice"));
        assert!(!p.test("alice"));
    }

    #[test]
    fn exact_mac_matches_stored_canonical_form() {
        let p = Predicate::exact(Field::Mac, "AA-BB-CC-DD-EE-FF")
            .unwrap()
            .unwrap();
        let record = DpskRecord {
            mac: "aa:bb:cc:dd:ee:ff".into(),
            ..DpskRecord::default()
        };
        assert!(p.matches(&record));
    }

    #[test]
    fn integer_fields_compare_as_decimal_text() {
        let record = DpskRecord {
            wlansvc_id: 3,
            ..DpskRecord::default()
        };
        assert!(Predicate::exact(Field::WlansvcId, "3").unwrap().unwrap().matches(&record));
        assert!(!Predicate::exact(Field::WlansvcId, "03").unwrap().unwrap().matches(&record));
        assert!(Predicate::regexp(Field::WlansvcId, "^[0-9]$").unwrap().unwrap().matches(&record));
    }

    #[test]
    fn display_names_field_and_mode() {
        let p = Predicate::regexp(Field::User, "^a").unwrap().unwrap();
        assert_eq!(p.to_string(), "user: regexp: ^a");
    }
}
