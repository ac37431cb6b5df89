use crate::database::models::{Collection, Note};
use crate::services::collection_config::{parse_decks, parse_models, DeckTable, ModelTable};
use crate::types::errors::ConfigError;
use serde::Serialize;
use std::collections::HashMap;

/// One card ready for the document writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCard {
    pub stylesheet: String,
    pub front_html: String,
    pub back_html: String,
}

/// All rendered cards plus the title and description derived from their deck.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedCards {
    pub title: String,
    pub description: String,
    pub cards: Vec<RenderedCard>,
}

/// Read-only lookup tables shared by every card resolution.
#[derive(Debug, Clone, Default)]
pub struct CardTables {
    pub notes: HashMap<i64, Note>,
    pub models: ModelTable,
    pub decks: DeckTable,
}

impl CardTables {
    /// Index the notes and parse the collection's model and deck JSON.
    pub fn build(collection: &Collection, notes: Vec<Note>) -> Result<Self, ConfigError> {
        let models = parse_models(&collection.models)?;
        let decks = parse_decks(&collection.decks)?;
        let notes = notes.into_iter().map(|n| (n.id, n)).collect();
        Ok(Self {
            notes,
            models,
            decks,
        })
    }
}

/// Caller-supplied values that take precedence over the deck's own.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleOverrides<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
}
