use std::path::PathBuf;
use std::time::Duration;

pub const API_BASE: &str = "https://api.pokemontcg.io/v2";
pub const API_KEY_HEADER: &str = "X-Api-Key";
pub const API_KEY_ENV: &str = "POKEMON_TCG_API_KEY";

/// Default page size for card searches.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Default page size for set listings and set-scoped card listings.
pub const SET_PAGE_SIZE: u32 = 250;
/// Largest page the catalog will serve.
pub const MAX_PAGE_SIZE: u32 = 250;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DATABASE_FILE: &str = "pokemaster.duckdb";

/// Connection settings for the card catalog.
///
/// Passed explicitly into [`CatalogClient::new`](crate::catalog::CatalogClient::new);
/// nothing here is read from the process environment unless the caller asks
/// for it through [`CatalogConfig::from_env`].
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CatalogConfig {
    /// Default settings with the API key taken from `POKEMON_TCG_API_KEY`.
    ///
    /// An unset or blank variable leaves the key absent, which the catalog
    /// serves at its reduced anonymous rate.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self {
            api_key,
            ..Self::default()
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("pokemaster")
    } else {
        PathBuf::from(".pokemaster")
    }
}
