use std::{fmt::Debug, sync::Arc};

use tracing::warn;

use crate::blog::{model::BlogId, search_query::BlogSearchQuery};

/// Hooks for noteworthy but non-fatal situations while serving blogs.
pub trait BlogObserver: Debug {
    /// A single blog read named a blog that does not exist.
    fn on_blog_not_found(&self, id: &BlogId);

    /// A listed blog's author could not be resolved and a placeholder was shown.
    fn on_missing_author(&self, id: &BlogId);

    /// A search matched nothing on the requested page.
    fn on_empty_search(&self, query: &BlogSearchQuery);
}

pub type BlogObserverArc = Arc<dyn BlogObserver + Send + Sync>;

/// Reports observations as `tracing` warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BlogObserver for TracingObserver {
    fn on_blog_not_found(&self, id: &BlogId) {
        warn!(blog_id = %id, "blog not found");
    }

    fn on_missing_author(&self, id: &BlogId) {
        warn!(blog_id = %id, "author not found, showing placeholder");
    }

    fn on_empty_search(&self, query: &BlogSearchQuery) {
        warn!(?query, "No results found for the provided search criteria");
    }
}
