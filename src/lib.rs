//! PokeMaster SDK for Rust.
//!
//! Searches the Pokemon TCG card catalog over HTTP and records chosen cards
//! in a local DuckDB-backed collection. Catalog cards arrive in the
//! catalog's nested schema; the [`mapper`] flattens them into
//! [`CollectionRecord`](models::CollectionRecord)s before they are stored.
//!
//! # Quick start
//!
//! ```no_run
//! use pokemaster_sdk::PokemasterSdk;
//! use pokemaster_sdk::models::Condition;
//!
//! let sdk = PokemasterSdk::builder()
//!     .api_key("my-key")
//!     .build()
//!     .unwrap();
//!
//! // Forward-match search on the card name
//! let page = sdk.cards().search_by_name("Charizard", None, None).unwrap();
//!
//! // Record the first hit in the local collection
//! if let Some(card) = page.data.first() {
//!     sdk.add_from_catalog(card, Some(Condition::NearMint), Some(2)).unwrap();
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod catalog;
pub mod config;
pub mod error;
pub mod mapper;
pub mod models;
pub mod queries;
pub mod query_builder;
pub mod store;

#[cfg(feature = "async")]
pub use async_client::AsyncPokemasterSdk;
pub use catalog::{CatalogClient, CatalogSource};
pub use config::CatalogConfig;
pub use error::{PokemasterError, Result};
pub use query_builder::{CardSearch, CatalogQueryBuilder, SearchCriteria};
pub use store::{Collection, CollectionStore};

use log::{info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use models::{CatalogCard, Condition};

// ---------------------------------------------------------------------------
// PokemasterSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PokemasterSdk`] instance.
///
/// Use [`PokemasterSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PokemasterSdkBuilder::build) to create the SDK.
#[derive(Default)]
pub struct PokemasterSdkBuilder {
    data_dir: Option<PathBuf>,
    in_memory: bool,
    catalog: CatalogConfig,
}

impl PokemasterSdkBuilder {
    /// Set the directory holding the collection database.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/pokemaster` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep the collection in memory only. Defaults to `false`.
    pub fn in_memory(mut self, in_memory: bool) -> Self {
        self.in_memory = in_memory;
        self
    }

    /// Set the catalog API key. Without one the catalog serves requests at
    /// its reduced anonymous rate.
    pub fn api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.catalog.api_key = Some(key.into());
        self
    }

    /// Override the catalog base URL.
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.catalog.base_url = url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.catalog.timeout = timeout;
        self
    }

    /// Replace the whole catalog configuration.
    pub fn catalog_config(mut self, config: CatalogConfig) -> Self {
        self.catalog = config;
        self
    }

    /// Build the SDK, opening the collection database and the HTTP client.
    ///
    /// No catalog request is made here.
    pub fn build(self) -> Result<PokemasterSdk> {
        let collection = if self.in_memory {
            Collection::open_in_memory()?
        } else {
            let dir = self.data_dir.unwrap_or_else(config::default_data_dir);
            Collection::open(dir.join(config::DATABASE_FILE))?
        };
        let catalog = CatalogClient::new(self.catalog)?;
        Ok(PokemasterSdk {
            catalog: Box::new(catalog),
            collection,
        })
    }
}

// ---------------------------------------------------------------------------
// PokemasterSdk
// ---------------------------------------------------------------------------

/// The main entry point for the PokeMaster SDK.
///
/// Owns a catalog source and a [`CollectionStore`] (the DuckDB-backed
/// [`Collection`] unless another store is injected via
/// [`from_parts`](PokemasterSdk::from_parts)), and exposes domain-specific
/// query interfaces as lightweight borrowing wrappers.
pub struct PokemasterSdk<S = Collection> {
    catalog: Box<dyn CatalogSource + Send>,
    collection: S,
}

impl PokemasterSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> PokemasterSdkBuilder {
        PokemasterSdkBuilder::default()
    }
}

impl<S: CollectionStore> PokemasterSdk<S> {
    /// Assemble an SDK from an arbitrary catalog source and collection store.
    pub fn from_parts<C>(catalog: C, collection: S) -> Self
    where
        C: CatalogSource + Send + 'static,
    {
        Self {
            catalog: Box::new(catalog),
            collection,
        }
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the catalog card query interface.
    pub fn cards(&self) -> queries::CardQuery<'_> {
        queries::CardQuery::new(self.catalog.as_ref())
    }

    /// Access the catalog set query interface.
    pub fn sets(&self) -> queries::SetQuery<'_> {
        queries::SetQuery::new(self.catalog.as_ref())
    }

    /// Access the local collection.
    pub fn collection(&self) -> &S {
        &self.collection
    }

    // -- Collection workflow -----------------------------------------------

    /// Map a catalog card and store it in the collection.
    ///
    /// Also records the card's set and any price snapshots the catalog sent
    /// with it. Returns the id assigned to the new collection entry; a
    /// failure to write the set or card row is returned unchanged.
    pub fn add_from_catalog(
        &self,
        card: &CatalogCard,
        condition: Option<Condition>,
        quantity: Option<i32>,
    ) -> Result<i64> {
        let record = mapper::map_card(card, condition, quantity);
        self.collection.upsert_set(&mapper::map_set(&card.set))?;
        let id = self.collection.add_card(&record)?;

        // Card row is committed at this point; price failures are only logged.
        let prices = mapper::map_prices(card, id);
        if !prices.is_empty() {
            match self.collection.add_prices(&prices) {
                Ok(n) => info!("Stored {} price snapshots for {}", n, card.id),
                Err(e) => warn!("Failed to store prices for {}: {}", card.id, e),
            }
        }
        Ok(id)
    }

    /// Consume the SDK and release all resources.
    pub fn close(self) {
        drop(self);
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PokemasterSdk<Collection> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.collection.path() {
            Some(path) => write!(f, "PokemasterSdk(collection={})", path.display()),
            None => write!(f, "PokemasterSdk(collection=:memory:)"),
        }
    }
}
