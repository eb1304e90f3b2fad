//! Catalog → collection mapping.
//!
//! Flattens the catalog's nested card and set records into the shapes the
//! local collection stores. All functions are pure: they borrow their input,
//! never fail, and leave a field absent whenever its source is missing or
//! unusable.

use log::warn;

use crate::models::{
    CardmarketPrices, CatalogCard, CatalogSet, CollectionRecord, CollectionSet, Condition,
    PriceRecord, TcgPlayerPrice,
};

pub const TCGPLAYER_SOURCE: &str = "tcgplayer";
pub const CARDMARKET_SOURCE: &str = "cardmarket";

/// Map a catalog card plus the user's choices into a collection record.
///
/// `quantity` falls back to 1 when absent or not positive. `condition` is
/// copied as given. Store-assigned fields (`id`, dates) and user-filled
/// fields (`grade`, `notes`, `cardmarket_id`) are left absent.
pub fn map_card(
    card: &CatalogCard,
    condition: Option<Condition>,
    quantity: Option<i32>,
) -> CollectionRecord {
    CollectionRecord {
        id: None,
        name: card.name.clone(),
        set_id: card.set.id.clone(),
        set_name: card.set.name.clone(),
        number: Some(card.number.clone()),
        rarity: card.rarity.clone(),
        // Multi-typed cards keep only their first type.
        type_field: card.primary_type().map(str::to_string),
        supertype: Some(card.supertype.clone()),
        subtype: card.primary_subtype().map(str::to_string),
        hp: card.hp.as_deref().and_then(|hp| parse_hp(&card.id, hp)),
        image_url: card.images.large.clone(),
        small_image_url: card.images.small.clone(),
        large_image_url: card.images.large.clone(),
        tcgplayer_id: card.tcgplayer.as_ref().and_then(|t| t.url.clone()),
        cardmarket_id: None,
        condition,
        grade: None,
        quantity: Some(normalize_quantity(quantity)),
        notes: None,
        date_added: None,
        date_updated: None,
    }
}

/// Quantity to store for a caller-supplied value: non-positive or missing is 1.
pub fn normalize_quantity(quantity: Option<i32>) -> i32 {
    match quantity {
        Some(q) if q > 0 => q,
        _ => 1,
    }
}

/// Leading decimal digits of `hp` after surrounding whitespace, so `"60+"`
/// reads as 60. Values with no leading digit are left unset.
fn parse_hp(card_id: &str, hp: &str) -> Option<i32> {
    let trimmed = hp.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    match trimmed[..end].parse::<i32>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Card {} has non-numeric hp {:?}; leaving it unset", card_id, hp);
            None
        }
    }
}

/// Flatten a catalog set descriptor into a collection set row.
pub fn map_set(set: &CatalogSet) -> CollectionSet {
    let images = set.images.as_ref();
    CollectionSet {
        id: set.id.clone(),
        name: set.name.clone(),
        series: set.series.clone(),
        printed_total: set.printed_total,
        total: set.total,
        release_date: set.release_date.clone(),
        symbol_url: images.and_then(|i| i.symbol.clone()),
        logo_url: images.and_then(|i| i.logo.clone()),
    }
}

/// Extract price snapshots from both pricing sources of a catalog card.
///
/// Emits one TCGplayer record per variant (in variant-name order) followed
/// by at most one Cardmarket record. Variants or blocks that carry no price
/// at all are skipped. `card_id` is the id of the stored collection record.
pub fn map_prices(card: &CatalogCard, card_id: i64) -> Vec<PriceRecord> {
    let mut out = Vec::new();

    if let Some(ref tcg) = card.tcgplayer {
        for (variant, price) in &tcg.prices {
            if !has_tcgplayer_price(price) {
                continue;
            }
            out.push(PriceRecord {
                id: None,
                card_id,
                source: TCGPLAYER_SOURCE.to_string(),
                finish: Some(variant.clone()),
                low_price: price.low,
                mid_price: price.mid,
                high_price: price.high,
                market_price: price.market,
                direct_low_price: price.direct_low,
                trend_price: None,
                currency: Some("USD".to_string()),
                last_updated: tcg.updated_at.clone(),
            });
        }
    }

    if let Some(ref cm) = card.cardmarket {
        if let Some(prices) = cm.prices.as_ref().filter(|p| has_cardmarket_price(p)) {
            out.push(PriceRecord {
                id: None,
                card_id,
                source: CARDMARKET_SOURCE.to_string(),
                finish: None,
                low_price: prices.low_price,
                mid_price: None,
                high_price: None,
                market_price: prices.average_sell_price,
                direct_low_price: None,
                trend_price: prices.trend_price,
                currency: Some("EUR".to_string()),
                last_updated: cm.updated_at.clone(),
            });
        }
    }

    out
}

fn has_tcgplayer_price(p: &TcgPlayerPrice) -> bool {
    [p.low, p.mid, p.high, p.market, p.direct_low]
        .iter()
        .any(Option::is_some)
}

fn has_cardmarket_price(p: &CardmarketPrices) -> bool {
    [p.low_price, p.trend_price, p.average_sell_price]
        .iter()
        .any(Option::is_some)
}
