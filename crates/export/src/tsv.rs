//! Tab-separated flashcard export.

use deckforge_core::Deck;

/// One `question\tanswer` line per card, newline-joined, no trailing newline.
///
/// Tabs and line breaks inside a field would split the record, so they are
/// replaced with single spaces.
pub fn to_tsv(deck: &Deck) -> String {
    deck.cards
        .iter()
        .map(|card| format!("{}\t{}", clean(&card.question), clean(&card.answer)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn clean(field: &str) -> String {
    field
        .replace("\r\n", " ")
        .replace(['\t', '\n', '\r'], " ")
        .trim()
        .to_string()
}
