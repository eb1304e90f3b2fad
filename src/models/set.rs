use serde::{Deserialize, Serialize};

use super::sub::SetImages;

// ---------------------------------------------------------------------------
// CatalogSet — Set descriptor (nested in cards, and served by /sets)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSet {
    pub id: String,
    pub name: String,
    pub series: Option<String>,
    pub printed_total: Option<i32>,
    pub total: Option<i32>,
    pub release_date: Option<String>,
    pub images: Option<SetImages>,
}

// ---------------------------------------------------------------------------
// CollectionSet — Flattened set row kept alongside the collection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSet {
    pub id: String,
    pub name: String,
    pub series: Option<String>,
    pub printed_total: Option<i32>,
    pub total: Option<i32>,
    pub release_date: Option<String>,
    pub symbol_url: Option<String>,
    pub logo_url: Option<String>,
}
