use serde::{Deserialize, Serialize};

use super::price::{CardmarketBlock, TcgPlayerBlock};
use super::set::CatalogSet;
use super::sub::CardImages;

// ---------------------------------------------------------------------------
// CatalogCard — One card as served by the catalog's /cards endpoints
// ---------------------------------------------------------------------------

/// A card record in the catalog's own (nested, camelCase) schema.
///
/// Only the fields the collection cares about are modelled; anything else
/// the catalog sends (attacks, weaknesses, legalities, ...) is ignored on
/// deserialization. Every field the catalog may omit is an `Option` or
/// defaults to empty, so a partially populated record still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCard {
    pub id: String,
    pub name: String,
    pub supertype: String,
    #[serde(default)]
    pub subtypes: Vec<String>,
    pub types: Option<Vec<String>>,
    /// Hit points, served as a numeric string (e.g. `"120"`).
    pub hp: Option<String>,
    pub number: String,
    pub rarity: Option<String>,
    #[serde(default)]
    pub images: CardImages,
    pub set: CatalogSet,
    pub tcgplayer: Option<TcgPlayerBlock>,
    pub cardmarket: Option<CardmarketBlock>,
}

impl CatalogCard {
    /// First entry of the energy type list, if any.
    pub fn primary_type(&self) -> Option<&str> {
        self.types
            .as_ref()
            .and_then(|t| t.first())
            .map(String::as_str)
    }

    /// First entry of the subtype list, if any.
    pub fn primary_subtype(&self) -> Option<&str> {
        self.subtypes.first().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// SingleCard — Envelope for GET /cards/{id}
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleCard {
    pub data: CatalogCard,
}
