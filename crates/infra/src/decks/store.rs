//! Deck storage implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use deckforge_core::{Deck, DeckId, DomainError};

use crate::error::StoreError;
use crate::persistence::LoadOutcome;
use crate::persistence::collection::FileCollection;

/// Deck store abstraction. Decks are write-once: there is no update.
pub trait DeckStore: Send + Sync {
    /// Store a deck at the head of the collection.
    fn save_deck(&self, deck: Deck) -> Result<Deck, StoreError>;

    /// Get a deck by ID.
    fn get_deck(&self, deck_id: &DeckId) -> Result<Option<Deck>, StoreError>;

    /// All decks, newest first.
    fn list_decks(&self) -> Result<Vec<Deck>, StoreError>;

    /// Number of stored decks.
    fn len(&self) -> Result<usize, StoreError>;
}

impl<S> DeckStore for Arc<S>
where
    S: DeckStore + ?Sized,
{
    fn save_deck(&self, deck: Deck) -> Result<Deck, StoreError> {
        (**self).save_deck(deck)
    }

    fn get_deck(&self, deck_id: &DeckId) -> Result<Option<Deck>, StoreError> {
        (**self).get_deck(deck_id)
    }

    fn list_decks(&self) -> Result<Vec<Deck>, StoreError> {
        (**self).list_decks()
    }

    fn len(&self) -> Result<usize, StoreError> {
        (**self).len()
    }
}

/// Deck store backed by a JSON document on disk.
#[derive(Debug)]
pub struct FileDeckStore {
    decks: FileCollection<Deck>,
}

impl FileDeckStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let decks = FileCollection::open(path);
        info!(
            path = %decks.path().display(),
            outcome = ?decks.load_outcome(),
            count = decks.len().unwrap_or_default(),
            "deck store opened"
        );
        Self { decks }
    }

    pub fn path(&self) -> &Path {
        self.decks.path()
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.decks.load_outcome()
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(DeckStore::len(self)? == 0)
    }
}

impl DeckStore for FileDeckStore {
    fn save_deck(&self, deck: Deck) -> Result<Deck, StoreError> {
        if deck.id.is_blank() {
            return Err(DomainError::invalid_id("deck id must not be empty").into());
        }

        let deck = self.decks.insert_front(deck)?;
        info!(
            deck_id = %deck.id,
            cards = deck.cards.len(),
            mcqs = deck.mcqs.len(),
            "deck saved"
        );
        Ok(deck)
    }

    fn get_deck(&self, deck_id: &DeckId) -> Result<Option<Deck>, StoreError> {
        self.decks.get(deck_id)
    }

    fn list_decks(&self) -> Result<Vec<Deck>, StoreError> {
        self.decks.list()
    }

    fn len(&self) -> Result<usize, StoreError> {
        self.decks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckforge_core::{Card, Choice, Mcq};

    fn deck_id(s: &str) -> DeckId {
        DeckId::parse(s).unwrap()
    }

    fn store() -> (tempfile::TempDir, FileDeckStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDeckStore::open(dir.path().join("decks.json"));
        (dir, store)
    }

    #[test]
    fn save_then_get_returns_exact_record() {
        let (_dir, store) = store();
        let deck = Deck::new(deck_id("d1"))
            .with_card(Card::new("Q", "A"))
            .with_mcq(Mcq {
                stem: "2 + 2?".to_string(),
                choices: vec![Choice::new("A", "3"), Choice::new("B", "4")],
                correct_label: "B".to_string(),
                explanation: String::new(),
            });

        let saved = store.save_deck(deck.clone()).unwrap();

        assert_eq!(saved, deck);
        assert_eq!(store.get_deck(&deck_id("d1")).unwrap(), Some(deck));
    }

    #[test]
    fn unknown_deck_is_none() {
        let (_dir, store) = store();
        assert!(store.get_deck(&deck_id("missing")).unwrap().is_none());
    }

    #[test]
    fn duplicate_deck_id_is_rejected() {
        let (_dir, store) = store();
        store.save_deck(Deck::new(deck_id("d1"))).unwrap();

        let err = store
            .save_deck(Deck::new(deck_id("d1")).with_card(Card::new("other", "deck")))
            .unwrap_err();

        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert!(store.get_deck(&deck_id("d1")).unwrap().unwrap().cards.is_empty());
    }

    #[test]
    fn blank_id_from_the_wire_is_rejected() {
        let (_dir, store) = store();
        let deck: Deck = serde_json::from_str(r#"{"id": " "}"#).unwrap();

        let err = store.save_deck(deck).unwrap_err();

        assert!(matches!(err, StoreError::Domain(DomainError::InvalidId(_))));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn len_counts_saved_decks() {
        let (_dir, store) = store();
        let shared: Arc<dyn DeckStore> = Arc::new(store);
        assert_eq!(shared.len().unwrap(), 0);

        shared.save_deck(Deck::new(deck_id("a"))).unwrap();

        assert_eq!(shared.len().unwrap(), 1);
    }

    #[test]
    fn decks_list_newest_first() {
        let (_dir, store) = store();
        store.save_deck(Deck::new(deck_id("a"))).unwrap();
        store.save_deck(Deck::new(deck_id("b"))).unwrap();

        let ids: Vec<String> = store
            .list_decks()
            .unwrap()
            .into_iter()
            .map(|d| d.id.into())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
