use std::collections::BTreeMap;

use crate::error::FilterError;
use crate::query::normalize::normalize;
use crate::schema::Field;

/// Validated field/value pairs for one modify batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSet {
    values: BTreeMap<Field, String>,
}

impl UpdateSet {
    /// Build from raw `(identifier, value)` pairs. Values get the same
    /// normalization as exact filters; empty values are skipped.
    pub fn build<'a, I>(raw: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut values = BTreeMap::new();
        for (identifier, value) in raw {
            let field = Field::parse(identifier)?;
            if value.is_empty() {
                continue;
            }
            if !field.settable() {
                return Err(FilterError::ReadOnlyField(field));
            }
            values.insert(field, normalize(field.kind(), value)?);
        }

        if values.is_empty() {
            return Err(FilterError::NoPropertiesSpecified);
        }

        Ok(Self { values })
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Attribute map keyed by field identifier, as the update call sends it.
    pub fn to_attributes(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(f, v)| (f.as_str().to_owned(), v.clone()))
            .collect()
    }
}
