//! # Filter
//!
//! Conjunctive field filters.
//!
//! A [`Filter`] is an ordered list of `(field, predicate)` terms that must all hold.
//! The same filter is evaluated in memory through [`SchemaMapped`] and translated to SQL
//! through [`crate::sql::SqlFilterBuilder`], so both paths must agree on semantics:
//!
//! - [`Predicate::Contains`] is a substring match against the field's string value.
//! - [`Predicate::AtLeast`] is an inclusive lower bound.
//! - [`Predicate::Equals`] is plain equality.
//! - A [`Value::Null`] field never satisfies any predicate.

use std::fmt::{self, Display, Formatter};

use crate::{schema::SchemaMapped, value::Value};

pub mod error;

/// Match condition for a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field contains the given substring.
    Contains(String),
    /// Field is greater than or equal to the given value.
    AtLeast(Value),
    /// Field is equal to the given value.
    Equals(Value),
}

/// A single `(field, predicate)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTerm {
    pub field: String,
    pub predicate: Predicate,
}

/// Conjunction of field predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    terms: Vec<FilterTerm>,
    case_insensitive: bool,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes substring terms ignore letter case.
    #[must_use]
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    #[must_use]
    pub fn contains<F: Into<String>, S: Into<String>>(self, field: F, substring: S) -> Self {
        self.with(field, Predicate::Contains(substring.into()))
    }

    #[must_use]
    pub fn at_least<F: Into<String>, V: Into<Value>>(self, field: F, value: V) -> Self {
        self.with(field, Predicate::AtLeast(value.into()))
    }

    #[must_use]
    pub fn equals<F: Into<String>, V: Into<Value>>(self, field: F, value: V) -> Self {
        self.with(field, Predicate::Equals(value.into()))
    }

    #[must_use]
    pub fn with<F: Into<String>>(mut self, field: F, predicate: Predicate) -> Self {
        self.terms.push(FilterTerm {
            field: field.into(),
            predicate,
        });
        self
    }

    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub const fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Checks whether every term holds for the given item.
    pub fn evaluate<T: SchemaMapped>(&self, item: &T) -> bool {
        self.terms
            .iter()
            .all(|term| self.evaluate_term(&item.get_field(&term.field), &term.predicate))
    }

    fn evaluate_term(&self, value: &Value, predicate: &Predicate) -> bool {
        match (value, predicate) {
            (Value::Null, _) => false,
            (Value::String(value), Predicate::Contains(substring)) => {
                if self.case_insensitive {
                    value.to_lowercase().contains(&substring.to_lowercase())
                } else {
                    value.contains(substring.as_str())
                }
            }
            (_, Predicate::Contains(_)) => false,
            (value, Predicate::AtLeast(bound)) => {
                matches!(value.partial_cmp(bound), Some(ordering) if ordering.is_ge())
            }
            (value, Predicate::Equals(expected)) => value == expected,
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            match &term.predicate {
                Predicate::Contains(substring) => write!(f, "{}:{:?}", term.field, substring)?,
                Predicate::AtLeast(value) => write!(f, "{} >= {}", term.field, value)?,
                Predicate::Equals(value) => write!(f, "{} = {}", term.field, value)?,
            }
        }
        Ok(())
    }
}
