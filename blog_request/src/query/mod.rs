//! # Query
//!
//! Page-number based pagination.

pub mod page;
