//! HTTP access to the Pokemon TCG card catalog.
//!
//! [`CatalogSource`] is the seam the query layer talks to; [`CatalogClient`]
//! is its blocking reqwest implementation. Every call fetches exactly one
//! page and is never retried or cached: transport failures surface to the
//! caller unchanged.

use log::debug;
use reqwest::blocking::{Client, Request};
use reqwest::{StatusCode, Url};

use crate::config::{self, CatalogConfig};
use crate::error::{PokemasterError, Result};
use crate::models::{CatalogCard, CatalogSet, ResultPage, SingleCard};
use crate::query_builder::CardSearch;

/// Read access to a card catalog.
pub trait CatalogSource {
    /// Fetch one page of cards matching `search`.
    fn search_cards(&self, search: &CardSearch) -> Result<ResultPage<CatalogCard>>;

    /// Fetch a single card by its catalog id.
    fn get_card(&self, id: &str) -> Result<CatalogCard>;

    /// Fetch one page of set descriptors.
    fn get_sets(&self, page: u32, page_size: u32) -> Result<ResultPage<CatalogSet>>;
}

/// Blocking catalog client.
///
/// Configuration is passed in explicitly; see [`CatalogConfig::from_env`]
/// for reading the API key from the environment.
pub struct CatalogClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CatalogClient {
    /// Build a client for the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Base URL all endpoint paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build (but do not send) the `GET /cards` request for a search.
    pub fn search_request(&self, search: &CardSearch) -> Result<Request> {
        let page = search.page.to_string();
        let page_size = search.page_size.to_string();
        let req = self
            .get(&format!("{}/cards", self.base_url))
            .query(&[
                ("q", search.q.as_str()),
                ("page", page.as_str()),
                ("pageSize", page_size.as_str()),
            ])
            .build()?;
        Ok(req)
    }

    /// Build (but do not send) the `GET /cards/{id}` request.
    pub fn card_request(&self, id: &str) -> Result<Request> {
        if id.is_empty() {
            return Err(PokemasterError::InvalidArgument(
                "Card id must not be empty".into(),
            ));
        }
        let mut url = self.endpoint("cards")?;
        url.path_segments_mut()
            .map_err(|_| {
                PokemasterError::InvalidArgument(format!("Cannot append to {}", self.base_url))
            })?
            .push(id);
        let req = self.get(url.as_str()).build()?;
        Ok(req)
    }

    /// Build (but do not send) the `GET /sets` request.
    ///
    /// `page` and `page_size` are sent as given; [`SetQuery`](crate::queries::SetQuery)
    /// applies the defaults.
    pub fn sets_request(&self, page: u32, page_size: u32) -> Result<Request> {
        let page = page.to_string();
        let page_size = page_size.to_string();
        let req = self
            .get(&format!("{}/sets", self.base_url))
            .query(&[("page", page.as_str()), ("pageSize", page_size.as_str())])
            .build()?;
        Ok(req)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}/{}", self.base_url, path)).map_err(|e| {
            PokemasterError::InvalidArgument(format!("Bad catalog URL {}: {}", self.base_url, e))
        })
    }

    fn get(&self, url: &str) -> reqwest::blocking::RequestBuilder {
        let builder = self.client.get(url);
        match self.api_key {
            Some(ref key) => builder.header(config::API_KEY_HEADER, key),
            None => builder,
        }
    }

    fn send(&self, req: Request) -> Result<reqwest::blocking::Response> {
        debug!("GET {}", req.url());
        let resp = self.client.execute(req)?;
        Ok(resp)
    }
}

impl CatalogSource for CatalogClient {
    fn search_cards(&self, search: &CardSearch) -> Result<ResultPage<CatalogCard>> {
        let req = self.search_request(search)?;
        let page: ResultPage<CatalogCard> = self.send(req)?.error_for_status()?.json()?;
        debug!(
            "Card search {:?} page {} returned {} of {}",
            search.q, page.page, page.count, page.total_count
        );
        Ok(page)
    }

    fn get_card(&self, id: &str) -> Result<CatalogCard> {
        let req = self.card_request(id)?;
        let resp = self.send(req)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(PokemasterError::NotFound(format!("Card {}", id)));
        }
        let single: SingleCard = resp.error_for_status()?.json()?;
        Ok(single.data)
    }

    fn get_sets(&self, page: u32, page_size: u32) -> Result<ResultPage<CatalogSet>> {
        let req = self.sets_request(page, page_size)?;
        let page: ResultPage<CatalogSet> = self.send(req)?.error_for_status()?.json()?;
        Ok(page)
    }
}
