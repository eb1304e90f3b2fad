//! Shared test fixtures for the PokeMaster SDK integration tests.
//!
//! Provides a `FixtureCatalog` that serves a handful of sample cards and
//! sets from JSON, honouring name-prefix / set-id clauses and paging, plus
//! helpers for opening throwaway collections.

#![allow(dead_code)]

use pokemaster_sdk::models::{
    CatalogCard, CatalogSet, CollectionRecord, CollectionSet, PriceRecord, ResultPage,
};
use pokemaster_sdk::{
    CardSearch, CatalogSource, Collection, CollectionStore, PokemasterError, Result,
};
use std::sync::{Arc, Mutex};

/// The base-set Charizard used by the end-to-end scenarios.
pub fn charizard_json() -> serde_json::Value {
    serde_json::json!({
        "id": "base1-4",
        "name": "Charizard",
        "supertype": "Pokémon",
        "subtypes": ["Stage 2"],
        "types": ["Fire"],
        "number": "4",
        "rarity": "Rare Holo",
        "images": {"small": "s.png", "large": "l.png"},
        "set": {"id": "base1", "name": "Base"}
    })
}

/// A dual-typed card carrying both pricing blocks.
pub fn dragonite_json() -> serde_json::Value {
    serde_json::json!({
        "id": "fo-4",
        "name": "Dragonite",
        "supertype": "Pokémon",
        "subtypes": ["Stage 2"],
        "types": ["Colorless", "Flying"],
        "hp": "100",
        "number": "4",
        "rarity": "Rare Holo",
        "images": {
            "small": "https://images.example/fo/4.png",
            "large": "https://images.example/fo/4_hires.png"
        },
        "set": {
            "id": "base3",
            "name": "Fossil",
            "series": "Base",
            "printedTotal": 62,
            "total": 62,
            "releaseDate": "1999/10/10",
            "images": {
                "symbol": "https://images.example/base3/symbol.png",
                "logo": "https://images.example/base3/logo.png"
            }
        },
        "tcgplayer": {
            "url": "https://prices.example/tcgplayer/fo-4",
            "updatedAt": "2024/05/01",
            "prices": {
                "holofoil": {"low": 40.0, "mid": 55.5, "high": 120.0, "market": 52.25},
                "1stEditionHolofoil": {"low": 150.0, "market": 210.0, "directLow": null}
            }
        },
        "cardmarket": {
            "url": "https://prices.example/cardmarket/fo-4",
            "updatedAt": "2024/05/02",
            "prices": {"averageSellPrice": 48.1, "lowPrice": 30.0, "trendPrice": 45.9}
        }
    })
}

/// A trainer with no types, no subtypes and a non-numeric hp.
pub fn odd_trainer_json() -> serde_json::Value {
    serde_json::json!({
        "id": "base1-91",
        "name": "Bill",
        "supertype": "Trainer",
        "subtypes": [],
        "hp": "???",
        "number": "91",
        "images": {},
        "set": {"id": "base1", "name": "Base"}
    })
}

pub fn card(value: serde_json::Value) -> CatalogCard {
    serde_json::from_value(value).unwrap()
}

pub fn sample_cards() -> Vec<CatalogCard> {
    vec![
        card(charizard_json()),
        card(serde_json::json!({
            "id": "base1-46",
            "name": "Charmander",
            "supertype": "Pokémon",
            "subtypes": ["Basic"],
            "types": ["Fire"],
            "hp": "50",
            "number": "46",
            "rarity": "Common",
            "images": {"small": "cm-s.png", "large": "cm-l.png"},
            "set": {"id": "base1", "name": "Base"}
        })),
        card(serde_json::json!({
            "id": "base1-24",
            "name": "Charmeleon",
            "supertype": "Pokémon",
            "subtypes": ["Stage 1"],
            "types": ["Fire"],
            "hp": "80",
            "number": "24",
            "rarity": "Uncommon",
            "images": {"small": "cl-s.png", "large": "cl-l.png"},
            "set": {"id": "base1", "name": "Base"}
        })),
        card(dragonite_json()),
        card(odd_trainer_json()),
    ]
}

pub fn sample_sets() -> Vec<CatalogSet> {
    vec![
        serde_json::from_value(serde_json::json!({
            "id": "base1",
            "name": "Base",
            "series": "Base",
            "printedTotal": 102,
            "total": 102,
            "releaseDate": "1999/01/09"
        }))
        .unwrap(),
        serde_json::from_value(serde_json::json!({
            "id": "base3",
            "name": "Fossil",
            "series": "Base",
            "printedTotal": 62,
            "total": 62,
            "releaseDate": "1999/10/10"
        }))
        .unwrap(),
    ]
}

/// In-memory stand-in for the HTTP catalog.
///
/// Understands the `name:"..."*` and `set.id:"..."` clauses the SDK emits,
/// ignores any other clause, and records every search it receives.
pub struct FixtureCatalog {
    pub cards: Vec<CatalogCard>,
    pub sets: Vec<CatalogSet>,
    pub searches: Arc<Mutex<Vec<CardSearch>>>,
}

impl FixtureCatalog {
    pub fn new() -> Self {
        Self {
            cards: sample_cards(),
            sets: sample_sets(),
            searches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded searches that survives moving the catalog.
    pub fn search_log(&self) -> Arc<Mutex<Vec<CardSearch>>> {
        self.searches.clone()
    }
}

impl CatalogSource for FixtureCatalog {
    fn search_cards(&self, search: &CardSearch) -> Result<ResultPage<CatalogCard>> {
        self.searches.lock().unwrap().push(search.clone());

        let name_prefix = clause_value(&search.q, "name:\"", "\"*");
        let set_id = clause_value(&search.q, "set.id:\"", "\"");

        let matched: Vec<CatalogCard> = self
            .cards
            .iter()
            .filter(|c| name_prefix.map_or(true, |p| c.name.starts_with(p)))
            .filter(|c| set_id.map_or(true, |s| c.set.id == s))
            .cloned()
            .collect();

        Ok(paginate(matched, search.page, search.page_size))
    }

    fn get_card(&self, id: &str) -> Result<CatalogCard> {
        self.cards
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| PokemasterError::NotFound(format!("Card {}", id)))
    }

    fn get_sets(&self, page: u32, page_size: u32) -> Result<ResultPage<CatalogSet>> {
        Ok(paginate(self.sets.clone(), page, page_size))
    }
}

/// A catalog whose every call fails, as an unreachable service would.
pub struct UnreachableCatalog;

impl CatalogSource for UnreachableCatalog {
    fn search_cards(&self, _search: &CardSearch) -> Result<ResultPage<CatalogCard>> {
        Err(unreachable_error())
    }

    fn get_card(&self, _id: &str) -> Result<CatalogCard> {
        Err(unreachable_error())
    }

    fn get_sets(&self, _page: u32, _page_size: u32) -> Result<ResultPage<CatalogSet>> {
        Err(unreachable_error())
    }
}

fn unreachable_error() -> PokemasterError {
    PokemasterError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "catalog unreachable",
    ))
}

fn clause_value<'q>(q: &'q str, open: &str, close: &str) -> Option<&'q str> {
    let start = q.find(open)? + open.len();
    let rest = &q[start..];
    let end = rest.find(close)?;
    Some(&rest[..end])
}

fn paginate<T>(items: Vec<T>, page: u32, page_size: u32) -> ResultPage<T> {
    let total = items.len();
    let skip = ((page.max(1) - 1) * page_size) as usize;
    let data: Vec<T> = items.into_iter().skip(skip).take(page_size as usize).collect();
    ResultPage {
        count: data.len() as u32,
        data,
        page,
        page_size,
        total_count: total as u64,
    }
}

/// Which writes a `FlakyStore` refuses.
#[derive(Clone, Copy, PartialEq)]
pub enum FailOn {
    Cards,
    Prices,
}

/// A `CollectionStore` kept in plain vectors whose card or price writes
/// always fail.
pub struct FlakyStore {
    fail_on: FailOn,
    cards: Mutex<Vec<CollectionRecord>>,
    sets: Mutex<Vec<CollectionSet>>,
    prices: Mutex<Vec<PriceRecord>>,
}

impl FlakyStore {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            fail_on,
            cards: Mutex::new(Vec::new()),
            sets: Mutex::new(Vec::new()),
            prices: Mutex::new(Vec::new()),
        }
    }

    pub fn set_count(&self) -> usize {
        self.sets.lock().unwrap().len()
    }

    pub fn price_count(&self) -> usize {
        self.prices.lock().unwrap().len()
    }
}

impl CollectionStore for FlakyStore {
    fn list_cards(&self) -> Result<Vec<CollectionRecord>> {
        Ok(self.cards.lock().unwrap().iter().rev().cloned().collect())
    }

    fn add_card(&self, record: &CollectionRecord) -> Result<i64> {
        if self.fail_on == FailOn::Cards {
            return Err(disk_full_error());
        }
        let mut cards = self.cards.lock().unwrap();
        let id = cards.len() as i64 + 1;
        cards.push(CollectionRecord {
            id: Some(id),
            ..record.clone()
        });
        Ok(id)
    }

    fn upsert_set(&self, set: &CollectionSet) -> Result<()> {
        let mut sets = self.sets.lock().unwrap();
        sets.retain(|s| s.id != set.id);
        sets.push(set.clone());
        Ok(())
    }

    fn add_prices(&self, prices: &[PriceRecord]) -> Result<usize> {
        if self.fail_on == FailOn::Prices {
            return Err(disk_full_error());
        }
        self.prices.lock().unwrap().extend_from_slice(prices);
        Ok(prices.len())
    }
}

fn disk_full_error() -> PokemasterError {
    PokemasterError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
}

/// Open an empty in-memory collection.
pub fn memory_collection() -> Collection {
    Collection::open_in_memory().unwrap()
}
