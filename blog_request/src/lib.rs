pub mod filter;
pub mod query;
pub mod schema;
pub mod sql;
pub mod value;
