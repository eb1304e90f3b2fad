//! Card queries against the catalog.

use crate::catalog::CatalogSource;
use crate::error::Result;
use crate::models::{CatalogCard, ResultPage};
use crate::query_builder::{CardSearch, SearchCriteria};

// ---------------------------------------------------------------------------
// CardQuery
// ---------------------------------------------------------------------------

/// Query interface for catalog cards.
pub struct CardQuery<'a> {
    source: &'a dyn CatalogSource,
}

impl<'a> CardQuery<'a> {
    /// Create a new `CardQuery` bound to the given catalog.
    pub fn new(source: &'a dyn CatalogSource) -> Self {
        Self { source }
    }

    /// Forward-match search on the card name.
    ///
    /// `page` defaults to 1 and `page_size` to 20.
    pub fn search_by_name(
        &self,
        name: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<ResultPage<CatalogCard>> {
        self.source
            .search_cards(&CardSearch::name_prefix(name, page, page_size))
    }

    /// List the cards of one set.
    ///
    /// `page` defaults to 1 and `page_size` to 250.
    pub fn by_set(
        &self,
        set_id: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<ResultPage<CatalogCard>> {
        self.source
            .search_cards(&CardSearch::by_set(set_id, page, page_size))
    }

    /// Search using any combination of name, set id, rarity, type and supertype.
    pub fn search(&self, criteria: &SearchCriteria) -> Result<ResultPage<CatalogCard>> {
        self.source.search_cards(&criteria.to_search())
    }

    /// Retrieve a single card by its catalog id.
    pub fn get(&self, id: &str) -> Result<CatalogCard> {
        self.source.get_card(id)
    }
}
