//! Identifiers and timestamps shared by the blog service crates.

pub mod date_time;
pub mod id;
