use super::substitute::{expand_front_side, rewrite_sound_tags, substitute_fields};
use super::types::{CardTables, RenderedCard, ResolvedCards, TitleOverrides};
use crate::database::models::Card;
use crate::types::errors::ResolveError;
use rayon::prelude::*;

/// Render one card from the shared tables.
///
/// Steps: note -> model -> template lookup, field and `type:` substitution,
/// `{{FrontSide}}` expansion, then sound tag rewriting on both sides.
pub fn resolve_card(card: &Card, tables: &CardTables) -> Result<RenderedCard, ResolveError> {
    let note = tables
        .notes
        .get(&card.note_id)
        .ok_or(ResolveError::MissingNote {
            card_id: card.id,
            note_id: card.note_id,
        })?;
    let model = tables
        .models
        .get(&note.model_id)
        .ok_or(ResolveError::MissingModel {
            note_id: note.id,
            model_id: note.model_id,
        })?;
    let template = model
        .template(card.ord)
        .ok_or(ResolveError::MissingTemplate {
            card_id: card.id,
            model_id: note.model_id,
            ord: card.ord,
        })?;

    let values = note.field_values();
    let (question, answer) =
        substitute_fields(model, note.id, &values, &template.qfmt, &template.afmt)?;
    // FrontSide must see the fully substituted question.
    let answer = expand_front_side(&answer, &question);

    Ok(RenderedCard {
        stylesheet: model.css.clone(),
        front_html: rewrite_sound_tags(&question),
        back_html: rewrite_sound_tags(&answer),
    })
}

/// Check `card` against the previously seen deck and return its deck id.
fn track_deck(
    previous: Option<i64>,
    card: &Card,
    has_title_override: bool,
) -> Result<i64, ResolveError> {
    match previous {
        Some(prev) if prev != card.deck_id && !has_title_override => {
            Err(ResolveError::MultipleDecks {
                previous: prev,
                current: card.deck_id,
            })
        }
        _ => Ok(card.deck_id),
    }
}

/// Resolve every card in order.
///
/// Without a title override all cards must share one deck, whose name becomes
/// the title.
pub fn resolve_cards(
    cards: &[Card],
    tables: &CardTables,
    overrides: TitleOverrides<'_>,
) -> Result<ResolvedCards, ResolveError> {
    let rendered = cards.iter().map(|card| resolve_card(card, tables));
    collect_in_order(cards, rendered, tables, overrides)
}

/// Same result as [`resolve_cards`], with the per-card work spread over rayon.
///
/// Tables are only read during the parallel phase. Deck tracking and error
/// selection still run in card order, so the first error reported matches the
/// sequential path.
pub fn resolve_cards_parallel(
    cards: &[Card],
    tables: &CardTables,
    overrides: TitleOverrides<'_>,
) -> Result<ResolvedCards, ResolveError> {
    let rendered: Vec<Result<RenderedCard, ResolveError>> = cards
        .par_iter()
        .map(|card| resolve_card(card, tables))
        .collect();
    collect_in_order(cards, rendered, tables, overrides)
}

fn collect_in_order<I>(
    cards: &[Card],
    rendered: I,
    tables: &CardTables,
    overrides: TitleOverrides<'_>,
) -> Result<ResolvedCards, ResolveError>
where
    I: IntoIterator<Item = Result<RenderedCard, ResolveError>>,
{
    let has_title_override = overrides.title.is_some();
    let mut last_deck = None;
    let mut out = Vec::with_capacity(cards.len());

    for (card, result) in cards.iter().zip(rendered) {
        let rendered_card = result?;
        last_deck = Some(track_deck(last_deck, card, has_title_override)?);
        out.push(rendered_card);
    }

    let deck = last_deck.and_then(|id| tables.decks.get(&id));
    let title = match (overrides.title, last_deck) {
        (Some(title), _) => title.to_string(),
        (None, Some(id)) => deck.ok_or(ResolveError::UnknownDeck(id))?.name.clone(),
        (None, None) => String::new(),
    };
    let description = match overrides.description {
        Some(description) => description.to_string(),
        None => deck.map(|d| d.desc.clone()).unwrap_or_default(),
    };

    log::info!("Resolved {} cards for '{}'", out.len(), title);
    Ok(ResolvedCards {
        title,
        description,
        cards: out,
    })
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
