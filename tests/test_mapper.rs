//! Catalog → collection mapping tests.

mod common;

use pokemaster_sdk::mapper::{map_card, map_prices, map_set, normalize_quantity};
use pokemaster_sdk::models::{CollectionRecord, Condition};

// ---------------------------------------------------------------------------
// map_card
// ---------------------------------------------------------------------------

#[test]
fn charizard_maps_to_flat_record() {
    let card = common::card(common::charizard_json());
    let record = map_card(&card, Some(Condition::NearMint), Some(2));

    let expected = CollectionRecord {
        name: "Charizard".into(),
        set_id: "base1".into(),
        set_name: "Base".into(),
        number: Some("4".into()),
        rarity: Some("Rare Holo".into()),
        type_field: Some("Fire".into()),
        supertype: Some("Pokémon".into()),
        subtype: Some("Stage 2".into()),
        image_url: Some("l.png".into()),
        small_image_url: Some("s.png".into()),
        large_image_url: Some("l.png".into()),
        condition: Some(Condition::NearMint),
        quantity: Some(2),
        ..CollectionRecord::default()
    };
    assert_eq!(record, expected);
    assert!(record.tcgplayer_id.is_none());
    assert!(record.hp.is_none());
    assert!(record.cardmarket_id.is_none());
    assert!(record.id.is_none());
    assert!(record.notes.is_none());
    assert!(record.date_added.is_none());
    assert!(record.date_updated.is_none());
}

#[test]
fn multi_typed_card_keeps_first_type() {
    let mut json = common::charizard_json();
    json["types"] = serde_json::json!(["Fire", "Flying"]);
    let record = map_card(&common::card(json), None, None);
    assert_eq!(record.type_field.as_deref(), Some("Fire"));
}

#[test]
fn numeric_hp_is_parsed() {
    let mut json = common::charizard_json();
    json["hp"] = serde_json::json!("120");
    let record = map_card(&common::card(json), None, None);
    assert_eq!(record.hp, Some(120));
}

#[test]
fn hp_with_surrounding_whitespace_is_parsed() {
    let mut json = common::charizard_json();
    json["hp"] = serde_json::json!(" 90 ");
    let record = map_card(&common::card(json), None, None);
    assert_eq!(record.hp, Some(90));
}

#[test]
fn non_numeric_hp_is_left_absent() {
    let record = map_card(&common::card(common::odd_trainer_json()), None, None);
    assert_eq!(record.hp, None);
}

#[test]
fn empty_type_and_subtype_lists_are_left_absent() {
    let record = map_card(&common::card(common::odd_trainer_json()), None, None);
    assert_eq!(record.type_field, None);
    assert_eq!(record.subtype, None);
    assert_eq!(record.rarity, None);
}

#[test]
fn missing_images_are_left_absent() {
    let record = map_card(&common::card(common::odd_trainer_json()), None, None);
    assert_eq!(record.image_url, None);
    assert_eq!(record.small_image_url, None);
    assert_eq!(record.large_image_url, None);
}

#[test]
fn images_block_may_be_missing_entirely() {
    let mut json = common::odd_trainer_json();
    json.as_object_mut().unwrap().remove("images");
    let record = map_card(&common::card(json), None, None);
    assert_eq!(record.image_url, None);
}

#[test]
fn tcgplayer_url_becomes_tcgplayer_id() {
    let record = map_card(&common::card(common::dragonite_json()), None, None);
    assert_eq!(
        record.tcgplayer_id.as_deref(),
        Some("https://prices.example/tcgplayer/fo-4")
    );
    // Cardmarket data never populates the record.
    assert_eq!(record.cardmarket_id, None);
}

#[test]
fn tcgplayer_block_without_url_maps_to_absent() {
    let mut json = common::charizard_json();
    json["tcgplayer"] = serde_json::json!({"updatedAt": "2024/01/01"});
    let record = map_card(&common::card(json), None, None);
    assert_eq!(record.tcgplayer_id, None);
}

#[test]
fn quantity_defaults_to_one() {
    let card = common::card(common::charizard_json());
    assert_eq!(map_card(&card, None, None).quantity, Some(1));
    assert_eq!(map_card(&card, None, Some(0)).quantity, Some(1));
    assert_eq!(map_card(&card, None, Some(-3)).quantity, Some(1));
    assert_eq!(map_card(&card, None, Some(7)).quantity, Some(7));
}

#[test]
fn normalize_quantity_rules() {
    assert_eq!(normalize_quantity(None), 1);
    assert_eq!(normalize_quantity(Some(0)), 1);
    assert_eq!(normalize_quantity(Some(4)), 4);
}

#[test]
fn condition_is_taken_from_caller() {
    let card = common::card(common::charizard_json());
    let record = map_card(&card, Some(Condition::HeavilyPlayed), Some(1));
    assert_eq!(record.condition, Some(Condition::HeavilyPlayed));
}

#[test]
fn mapping_is_repeatable_and_leaves_input_untouched() {
    let card = common::card(common::dragonite_json());
    let before = card.clone();
    let a = map_card(&card, Some(Condition::Damaged), Some(3));
    let b = map_card(&card, Some(Condition::Damaged), Some(3));
    assert_eq!(a, b);
    assert_eq!(card, before);
}

#[test]
fn record_serializes_type_under_type_key() {
    let record = map_card(&common::card(common::charizard_json()), Some(Condition::NearMint), None);
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["type"], "Fire");
    assert_eq!(value["condition"], "Near Mint");
    assert!(value.get("type_field").is_none());
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

#[test]
fn condition_round_trips_through_text() {
    for c in Condition::ALL {
        assert_eq!(c.to_string().parse::<Condition>().unwrap(), c);
    }
    assert_eq!("Lightly Played".parse::<Condition>().unwrap(), Condition::LightlyPlayed);
}

#[test]
fn unknown_condition_is_rejected() {
    assert!("Mint".parse::<Condition>().is_err());
    assert!("near mint".parse::<Condition>().is_err());
}

// ---------------------------------------------------------------------------
// map_set
// ---------------------------------------------------------------------------

#[test]
fn set_descriptor_is_flattened() {
    let card = common::card(common::dragonite_json());
    let set = map_set(&card.set);
    assert_eq!(set.id, "base3");
    assert_eq!(set.name, "Fossil");
    assert_eq!(set.series.as_deref(), Some("Base"));
    assert_eq!(set.printed_total, Some(62));
    assert_eq!(set.release_date.as_deref(), Some("1999/10/10"));
    assert_eq!(
        set.symbol_url.as_deref(),
        Some("https://images.example/base3/symbol.png")
    );
    assert_eq!(set.logo_url.as_deref(), Some("https://images.example/base3/logo.png"));
}

#[test]
fn sparse_set_descriptor_maps_with_absent_fields() {
    let card = common::card(common::charizard_json());
    let set = map_set(&card.set);
    assert_eq!(set.id, "base1");
    assert_eq!(set.series, None);
    assert_eq!(set.total, None);
    assert_eq!(set.symbol_url, None);
}

// ---------------------------------------------------------------------------
// map_prices
// ---------------------------------------------------------------------------

#[test]
fn prices_come_from_both_sources() {
    let card = common::card(common::dragonite_json());
    let prices = map_prices(&card, 9);

    assert_eq!(prices.len(), 3);
    assert!(prices.iter().all(|p| p.card_id == 9 && p.id.is_none()));

    // Variants in name order, then Cardmarket.
    assert_eq!(prices[0].source, "tcgplayer");
    assert_eq!(prices[0].finish.as_deref(), Some("1stEditionHolofoil"));
    assert_eq!(prices[0].market_price, Some(210.0));
    assert_eq!(prices[0].direct_low_price, None);

    assert_eq!(prices[1].finish.as_deref(), Some("holofoil"));
    assert_eq!(prices[1].mid_price, Some(55.5));
    assert_eq!(prices[1].currency.as_deref(), Some("USD"));
    assert_eq!(prices[1].last_updated.as_deref(), Some("2024/05/01"));

    assert_eq!(prices[2].source, "cardmarket");
    assert_eq!(prices[2].low_price, Some(30.0));
    assert_eq!(prices[2].trend_price, Some(45.9));
    assert_eq!(prices[2].market_price, Some(48.1));
    assert_eq!(prices[2].currency.as_deref(), Some("EUR"));
}

#[test]
fn card_without_pricing_yields_no_prices() {
    let card = common::card(common::charizard_json());
    assert!(map_prices(&card, 1).is_empty());
}

#[test]
fn empty_price_variants_are_skipped() {
    let mut json = common::charizard_json();
    json["tcgplayer"] = serde_json::json!({
        "url": "https://prices.example/x",
        "prices": {"normal": {}, "reverseHolofoil": {"market": 1.5}}
    });
    json["cardmarket"] = serde_json::json!({"prices": {"avg7": 2.0}});
    let prices = map_prices(&common::card(json), 1);
    assert_eq!(prices.len(), 1);
    assert_eq!(prices[0].finish.as_deref(), Some("reverseHolofoil"));
}

#[test]
fn hp_reads_leading_digits() {
    let mut json = common::charizard_json();
    json["hp"] = serde_json::json!("60+");
    let record = map_card(&common::card(json), None, None);
    assert_eq!(record.hp, Some(60));
}
