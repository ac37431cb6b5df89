//! Card resolution: joins each card to its note, model, template and deck and
//! renders the front and back HTML.

pub mod resolver;
pub mod substitute;
mod types;

pub use resolver::{resolve_card, resolve_cards, resolve_cards_parallel};
pub use types::{CardTables, RenderedCard, ResolvedCards, TitleOverrides};
