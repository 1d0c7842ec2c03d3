//! Blog Service
//!
//! CRUD and search over blog posts, each enriched with its author's name.
//!
//! ## Features
//!
//! - Create, read, update and delete blogs on behalf of a requesting user
//! - Paginated listing and conjunctive substring/date search
//! - In-memory and `PostgreSQL` stores behind the same repository traits
//! - Layered configuration and structured tracing

pub mod blog;
pub mod config;
pub mod database;
pub mod error;
pub mod tracing;
pub mod user;
