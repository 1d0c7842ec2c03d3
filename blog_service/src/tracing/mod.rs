//! Tracing and observability module.
//!
//! Provides distributed tracing capabilities for the blog service.

/// Tracer configuration and initialization.
pub mod tracer;
