//! Set queries against the catalog.

use crate::catalog::CatalogSource;
use crate::config::{MAX_PAGE_SIZE, SET_PAGE_SIZE};
use crate::error::Result;
use crate::models::{CatalogSet, ResultPage};

/// Query interface for catalog sets.
pub struct SetQuery<'a> {
    source: &'a dyn CatalogSource,
}

impl<'a> SetQuery<'a> {
    pub fn new(source: &'a dyn CatalogSource) -> Self {
        Self { source }
    }

    /// List one page of sets. `page` defaults to 1 and `page_size` to 250;
    /// larger page sizes are capped at 250.
    pub fn list(&self, page: Option<u32>, page_size: Option<u32>) -> Result<ResultPage<CatalogSet>> {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let page_size = page_size
            .filter(|s| *s >= 1)
            .unwrap_or(SET_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        self.source.get_sets(page, page_size)
    }
}
