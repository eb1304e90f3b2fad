use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// TcgPlayerBlock — TCGplayer pricing attached to a catalog card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TcgPlayerBlock {
    pub url: Option<String>,
    pub updated_at: Option<String>,
    /// Keyed by variant name (`normal`, `holofoil`, `1stEditionNormal`, ...).
    #[serde(default)]
    pub prices: BTreeMap<String, TcgPlayerPrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TcgPlayerPrice {
    pub low: Option<f64>,
    pub mid: Option<f64>,
    pub high: Option<f64>,
    pub market: Option<f64>,
    pub direct_low: Option<f64>,
}

// ---------------------------------------------------------------------------
// CardmarketBlock — Cardmarket pricing attached to a catalog card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardmarketBlock {
    pub url: Option<String>,
    pub updated_at: Option<String>,
    pub prices: Option<CardmarketPrices>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardmarketPrices {
    pub average_sell_price: Option<f64>,
    pub low_price: Option<f64>,
    pub trend_price: Option<f64>,
    pub german_pro_low: Option<f64>,
    pub suggested_price: Option<f64>,
    pub reverse_holo_sell: Option<f64>,
    pub reverse_holo_low: Option<f64>,
    pub reverse_holo_trend: Option<f64>,
    pub low_price_ex_plus: Option<f64>,
    pub avg1: Option<f64>,
    pub avg7: Option<f64>,
    pub avg30: Option<f64>,
    pub reverse_holo_avg1: Option<f64>,
    pub reverse_holo_avg7: Option<f64>,
    pub reverse_holo_avg30: Option<f64>,
}

// ---------------------------------------------------------------------------
// PriceRecord — One stored price snapshot for a collection card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub id: Option<i64>,
    pub card_id: i64,
    pub source: String,
    /// Printing variant the prices apply to (`holofoil`, `normal`, ...).
    pub finish: Option<String>,
    pub low_price: Option<f64>,
    pub mid_price: Option<f64>,
    pub high_price: Option<f64>,
    pub market_price: Option<f64>,
    pub direct_low_price: Option<f64>,
    pub trend_price: Option<f64>,
    pub currency: Option<String>,
    pub last_updated: Option<String>,
}
