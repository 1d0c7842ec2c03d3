//! Blog management module.
//!
//! Provides CRUD and search operations for blogs including:
//! - Command handlers for create, update, and delete operations
//! - Query manager for single reads, listing and search
//! - Repository abstraction for data persistence, joined with authors
//! - The [`service::BlogService`] facade tying them together

/// Blog creation command handler.
pub mod create_blog_command;

/// Blog deletion command handler.
pub mod delete_blog_command;

/// Identifiers and response shapes.
pub mod model;

/// Hooks for soft failures and empty results.
pub mod observer;

/// Blog query manager for data retrieval.
pub mod query_manager;

/// Blog repository abstraction and implementations.
pub mod repository;

/// Search criteria and their translation into filters.
pub mod search_query;

/// Service facade.
pub mod service;

/// Blog update command handler.
pub mod update_blog_command;
