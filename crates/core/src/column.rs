//! Column selectors
//!
//! Legacy callers name columns with strings of the form `"fam"`, `"fam:"`
//! or `"fam:col"`. A selector names either a whole column family or a
//! single (family, qualifier) pair.

use crate::error::{CompatError, CompatResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between family and qualifier in legacy column names
pub const COLUMN_SEPARATOR: char = ':';

/// A column family, or a single column within a family
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnSelector {
    /// Every column in the family
    Family(String),
    /// One qualifier within a family
    Column {
        /// Column family name
        family: String,
        /// Column qualifier bytes
        qualifier: Vec<u8>,
    },
}

impl ColumnSelector {
    /// Select a whole column family
    pub fn family(family: impl Into<String>) -> Self {
        ColumnSelector::Family(family.into())
    }

    /// Select a single column
    pub fn column(family: impl Into<String>, qualifier: impl Into<Vec<u8>>) -> Self {
        ColumnSelector::Column {
            family: family.into(),
            qualifier: qualifier.into(),
        }
    }

    /// Parse a legacy column name.
    ///
    /// The name is split on the first `:`. An empty or missing qualifier
    /// selects the whole family, so `"fam"` and `"fam:"` are equivalent.
    /// Qualifiers may themselves contain `:`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the family part is empty.
    pub fn parse(name: &str) -> CompatResult<Self> {
        let (family, qualifier) = match name.split_once(COLUMN_SEPARATOR) {
            Some((family, qualifier)) => (family, qualifier),
            None => (name, ""),
        };

        if family.is_empty() {
            return Err(CompatError::invalid_argument(format!(
                "column '{}' has an empty family name",
                name
            )));
        }

        if qualifier.is_empty() {
            Ok(ColumnSelector::family(family))
        } else {
            Ok(ColumnSelector::column(family, qualifier.as_bytes()))
        }
    }

    /// Parse a legacy column name that must carry a qualifier.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the name is malformed or names only a
    /// family.
    pub fn parse_qualified(name: &str) -> CompatResult<Self> {
        let selector = Self::parse(name)?;
        if selector.qualifier().is_none() {
            return Err(CompatError::invalid_argument(format!(
                "column '{}' must be of the form 'fam:col'",
                name
            )));
        }
        Ok(selector)
    }

    /// Parse every name in order, stopping at the first malformed one
    pub fn parse_all<I, S>(names: I) -> CompatResult<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| Self::parse(name.as_ref()))
            .collect()
    }

    /// Family name
    pub fn family_name(&self) -> &str {
        match self {
            ColumnSelector::Family(family) => family,
            ColumnSelector::Column { family, .. } => family,
        }
    }

    /// Qualifier, if this selects a single column
    pub fn qualifier(&self) -> Option<&[u8]> {
        match self {
            ColumnSelector::Family(_) => None,
            ColumnSelector::Column { qualifier, .. } => Some(qualifier),
        }
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelector::Family(family) => write!(f, "{}", family),
            ColumnSelector::Column { family, qualifier } => write!(
                f,
                "{}{}{}",
                family,
                COLUMN_SEPARATOR,
                String::from_utf8_lossy(qualifier)
            ),
        }
    }
}
