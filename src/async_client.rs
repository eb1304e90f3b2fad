//! Async wrapper around [`PokemasterSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! Overlapping calls are not ordered relative to each other: two searches
//! issued back to back may complete in either order, so callers that display
//! results should drop responses from searches they have since superseded.
//!
//! # Example
//!
//! ```ignore
//! use pokemaster_sdk::AsyncPokemasterSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncPokemasterSdk::builder().build().await.unwrap();
//!
//!     let page = sdk.search_by_name("Pikachu", None, None).await.unwrap();
//!     println!("{} of {} cards", page.count, page.total_count);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{PokemasterError, Result};
use crate::models::{CatalogCard, CollectionRecord, Condition, ResultPage};
use crate::store::CollectionStore;
use crate::{CatalogConfig, PokemasterSdk};

// ---------------------------------------------------------------------------
// AsyncPokemasterSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncPokemasterSdk`] instance.
#[derive(Default)]
pub struct AsyncPokemasterSdkBuilder {
    data_dir: Option<PathBuf>,
    in_memory: bool,
    catalog: CatalogConfig,
}

impl AsyncPokemasterSdkBuilder {
    /// Set the directory holding the collection database.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep the collection in memory only.
    pub fn in_memory(mut self, in_memory: bool) -> Self {
        self.in_memory = in_memory;
        self
    }

    /// Set the catalog API key.
    pub fn api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.catalog.api_key = Some(key.into());
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.catalog.timeout = timeout;
        self
    }

    /// Replace the whole catalog configuration.
    pub fn catalog_config(mut self, config: CatalogConfig) -> Self {
        self.catalog = config;
        self
    }

    /// Build the async SDK.
    ///
    /// Opening the collection runs on the blocking thread pool so it won't
    /// block the async event loop.
    pub async fn build(self) -> Result<AsyncPokemasterSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = PokemasterSdk::builder()
                .in_memory(self.in_memory)
                .catalog_config(self.catalog);
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            let sdk = builder.build()?;
            Ok(AsyncPokemasterSdk::new(sdk))
        })
        .await
        .map_err(|e| PokemasterError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncPokemasterSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`PokemasterSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`PokemasterSdk`] is
/// protected by a [`Mutex`] since the DuckDB connection is not `Sync`.
pub struct AsyncPokemasterSdk {
    inner: Arc<Mutex<PokemasterSdk>>,
}

impl AsyncPokemasterSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncPokemasterSdkBuilder {
        AsyncPokemasterSdkBuilder::default()
    }

    /// Wrap an already-built SDK.
    pub fn new(sdk: PokemasterSdk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&PokemasterSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&PokemasterSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| PokemasterError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| PokemasterError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Forward-match card name search.
    pub async fn search_by_name(
        &self,
        name: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<ResultPage<CatalogCard>> {
        let name = name.to_string();
        self.run(move |s| s.cards().search_by_name(&name, page, page_size))
            .await
    }

    /// Map and store a catalog card; see [`PokemasterSdk::add_from_catalog`].
    pub async fn add_from_catalog(
        &self,
        card: CatalogCard,
        condition: Option<Condition>,
        quantity: Option<i32>,
    ) -> Result<i64> {
        self.run(move |s| s.add_from_catalog(&card, condition, quantity))
            .await
    }

    /// All cards in the local collection, newest first.
    pub async fn list_cards(&self) -> Result<Vec<CollectionRecord>> {
        self.run(|s| s.collection().list_cards()).await
    }

    /// Close the SDK, releasing the HTTP client and database on the
    /// blocking pool.
    ///
    /// The blocking HTTP client must not be dropped on an async worker
    /// thread, so prefer this over letting the last handle fall out of scope.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| PokemasterError::InvalidArgument(format!("Task join error: {e}")))
    }
}
