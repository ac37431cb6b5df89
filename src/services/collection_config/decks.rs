use super::models::parse_id;
use crate::types::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Deck as stored in `col.decks`. Everything but the name and description is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

/// Deck id -> deck.
pub type DeckTable = HashMap<i64, Deck>;

/// Parse the `col.decks` JSON blob.
pub fn parse_decks(json: &str) -> Result<DeckTable, ConfigError> {
    let raw: HashMap<String, Deck> =
        serde_json::from_str(json).map_err(|source| ConfigError::Json {
            blob: "decks",
            source,
        })?;

    raw.into_iter()
        .map(|(key, deck)| Ok::<_, ConfigError>((parse_id("decks", &key)?, deck)))
        .collect()
}

#[cfg(test)]
#[path = "tests/decks_tests.rs"]
mod tests;
