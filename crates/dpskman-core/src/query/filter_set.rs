use std::collections::BTreeMap;

use crate::error::FilterError;
use crate::model::DpskRecord;
use crate::query::predicate::Predicate;
use crate::schema::Field;

/// Conjunction of active predicates, at most one per field.
#[derive(Debug, Clone)]
pub struct FilterSet {
    predicates: BTreeMap<Field, Predicate>,
}

impl FilterSet {
    /// Build from raw `(identifier, value)` pairs of the exact and regexp
    /// flag namespaces.
    ///
    /// Exact values are resolved and normalized first, then regexp patterns
    /// are resolved and compiled. A field active in both namespaces is a
    /// [`FilterError::DuplicateFilter`]; nothing active at all is
    /// [`FilterError::NoFiltersSpecified`].
    pub fn build<'a, E, R>(exact: E, regexp: R) -> Result<Self, FilterError>
    where
        E: IntoIterator<Item = (&'a str, &'a str)>,
        R: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut exact_preds = BTreeMap::new();
        for (identifier, raw) in exact {
            let field = Field::parse(identifier)?;
            if let Some(pred) = Predicate::exact(field, raw)? {
                exact_preds.insert(field, pred);
            }
        }

        let mut regexp_preds = BTreeMap::new();
        for (identifier, pattern) in regexp {
            let field = Field::parse(identifier)?;
            if let Some(pred) = Predicate::regexp(field, pattern)? {
                regexp_preds.insert(field, pred);
            }
        }

        let mut predicates = exact_preds;
        for (field, pred) in regexp_preds {
            if predicates.contains_key(&field) {
                return Err(FilterError::DuplicateFilter(field));
            }
            predicates.insert(field, pred);
        }

        if predicates.is_empty() {
            return Err(FilterError::NoFiltersSpecified);
        }

        Ok(Self { predicates })
    }

    /// `true` iff every predicate holds for the record.
    pub fn matches(&self, record: &DpskRecord) -> bool {
        self.predicates.values().all(|p| p.matches(record))
    }

    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.values()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}
