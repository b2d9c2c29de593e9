//! API server state

use std::sync::Arc;

use crate::catalog::{InMemoryItemStore, ItemStore};
use crate::dataset::Dataset;
use crate::query::{QueryLimits, TableQueryService};

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Temperature table queries
    pub query: TableQueryService,

    /// Item repository for the catalog routes
    pub items: Arc<dyn ItemStore>,
}

impl AppState {
    pub fn new(query: TableQueryService, items: Arc<dyn ItemStore>) -> Self {
        Self { query, items }
    }

    /// State over `dataset` with the seeded item store
    pub fn with_dataset(dataset: Arc<Dataset>, limits: QueryLimits) -> Self {
        Self::new(
            TableQueryService::with_limits(dataset, limits),
            Arc::new(InMemoryItemStore::seeded()),
        )
    }
}
