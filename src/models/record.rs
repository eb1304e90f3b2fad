use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PokemasterError;

// ---------------------------------------------------------------------------
// Condition — Fixed grading vocabulary for owned cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Condition {
    #[default]
    #[serde(rename = "Near Mint")]
    NearMint,
    #[serde(rename = "Lightly Played")]
    LightlyPlayed,
    #[serde(rename = "Moderately Played")]
    ModeratelyPlayed,
    #[serde(rename = "Heavily Played")]
    HeavilyPlayed,
    #[serde(rename = "Damaged")]
    Damaged,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::NearMint,
        Condition::LightlyPlayed,
        Condition::ModeratelyPlayed,
        Condition::HeavilyPlayed,
        Condition::Damaged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::NearMint => "Near Mint",
            Condition::LightlyPlayed => "Lightly Played",
            Condition::ModeratelyPlayed => "Moderately Played",
            Condition::HeavilyPlayed => "Heavily Played",
            Condition::Damaged => "Damaged",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = PokemasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PokemasterError::InvalidArgument(format!("Unknown condition: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// CollectionRecord — One flattened card entry in the local collection
// ---------------------------------------------------------------------------

/// A card as kept in the user's inventory.
///
/// `id`, `date_added` and `date_updated` are assigned by the store and are
/// `None` on records that have not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CollectionRecord {
    pub id: Option<i64>,
    pub name: String,
    pub set_id: String,
    pub set_name: String,
    pub number: Option<String>,
    pub rarity: Option<String>,
    #[serde(rename = "type")]
    pub type_field: Option<String>,
    pub supertype: Option<String>,
    pub subtype: Option<String>,
    pub hp: Option<i32>,
    pub image_url: Option<String>,
    pub small_image_url: Option<String>,
    pub large_image_url: Option<String>,
    /// Marketplace product link. Holds a URL despite the name; the column
    /// name is kept for compatibility with existing collections.
    pub tcgplayer_id: Option<String>,
    pub cardmarket_id: Option<String>,
    pub condition: Option<Condition>,
    pub grade: Option<String>,
    pub quantity: Option<i32>,
    pub notes: Option<String>,
    pub date_added: Option<String>,
    pub date_updated: Option<String>,
}
