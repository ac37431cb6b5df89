//! Parsing of the JSON configuration stored in the collection row.

pub mod decks;
pub mod models;

pub use decks::{parse_decks, Deck, DeckTable};
pub use models::{parse_models, FieldDef, Model, ModelKind, ModelTable, TemplateDef};
