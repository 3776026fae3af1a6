//! Decks: the immutable artifact a completed job produces.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::DeckId;

/// A question/answer flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub question: String,
    pub answer: String,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A labeled choice of a multiple-choice item (e.g. `A`, `B`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub text: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// A multiple-choice item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mcq {
    pub stem: String,
    pub choices: Vec<Choice>,
    /// Label of the correct entry in `choices`.
    pub correct_label: String,
    #[serde(default)]
    pub explanation: String,
}

impl Mcq {
    /// The choice whose label matches `correct_label`, if any.
    pub fn correct_choice(&self) -> Option<&Choice> {
        self.choices.iter().find(|c| c.label == self.correct_label)
    }
}

/// A fully materialized deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub mcqs: Vec<Mcq>,
}

impl Deck {
    pub fn new(id: DeckId) -> Self {
        Self {
            id,
            cards: Vec::new(),
            mcqs: Vec::new(),
        }
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    pub fn with_mcq(mut self, mcq: Mcq) -> Self {
        self.mcqs.push(mcq);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.mcqs.is_empty()
    }
}

impl Entity for Deck {
    type Id = DeckId;

    fn id(&self) -> &DeckId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_mcq() -> Mcq {
        Mcq {
            stem: "Powerhouse of the cell?".to_string(),
            choices: vec![Choice::new("A", "Nucleus"), Choice::new("B", "Mitochondria")],
            correct_label: "B".to_string(),
            explanation: "ATP is produced there.".to_string(),
        }
    }

    #[test]
    fn correct_choice_resolves_label() {
        let mcq = sample_mcq();
        assert_eq!(mcq.correct_choice().map(|c| c.text.as_str()), Some("Mitochondria"));

        let dangling = Mcq {
            correct_label: "Z".to_string(),
            ..sample_mcq()
        };
        assert!(dangling.correct_choice().is_none());
    }

    #[test]
    fn deck_wire_shape() {
        let deck = Deck::new(DeckId::parse("d1").unwrap())
            .with_card(Card::new("Q", "A"))
            .with_mcq(sample_mcq());

        let value = serde_json::to_value(&deck).unwrap();
        assert_eq!(value["id"], json!("d1"));
        assert_eq!(value["cards"], json!([{"question": "Q", "answer": "A"}]));
        assert_eq!(value["mcqs"][0]["correctLabel"], json!("B"));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let deck: Deck = serde_json::from_value(json!({"id": "d2"})).unwrap();
        assert!(deck.is_empty());
    }
}
