//! User lookup module.
//!
//! Users are owned elsewhere; the blog service only reads their names to render
//! authors.

/// User identifiers and the requesting identity.
pub mod model;

/// User lookups shared by blog commands and queries.
pub mod query_manager;

/// User repository abstraction and implementations.
pub mod repository;
