//! # SQL
//!
//! Translation of [`crate::filter::Filter`] into SQL `WHERE` clauses.

use std::collections::BTreeMap;

pub use filter::SqlFilterBuilder;

mod filter;
mod utility;

pub use utility::{escape_like, get_identifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    Postgres,
}

/// Maps filter field names to SQL expressions.
///
/// Mapped expressions are emitted verbatim; unmapped fields are emitted as quoted
/// identifiers.
#[derive(Debug, Clone, Default)]
pub struct SqlRenameMap {
    pub members: BTreeMap<String, String>,
}

impl SqlRenameMap {
    pub fn new(members: BTreeMap<String, String>) -> Self {
        Self { members }
    }

    pub fn rename_member(&self, name: &str) -> Option<&str> {
        self.members.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SqlRenameMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(name, expression)| (name.into(), expression.into()))
                .collect(),
        )
    }
}
