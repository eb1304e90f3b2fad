use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CardImages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CardImages {
    pub small: Option<String>,
    pub large: Option<String>,
}

// ---------------------------------------------------------------------------
// SetImages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SetImages {
    pub symbol: Option<String>,
    pub logo: Option<String>,
}
