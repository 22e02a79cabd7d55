use std::sync::Arc;

use client::{CatalogSource, SectionOverview};

use crate::error::CatalogError;

/// Read model for the home screen's section list.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogSource>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Self { catalog }
    }

    /// Lists the available sections with any completion results.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the collaborator cannot be reached.
    pub async fn sections(&self) -> Result<Vec<SectionOverview>, CatalogError> {
        let sections = self.catalog.list_sections().await?;
        tracing::debug!(count = sections.len(), "catalog listed");
        Ok(sections)
    }
}
