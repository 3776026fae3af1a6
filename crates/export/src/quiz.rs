//! Plain-text quiz rendering of a deck's multiple-choice items.

use std::fmt::Write;

use deckforge_core::Deck;

/// Numbered items, each followed by its labeled choices, the answer and the
/// explanation (when present). Items are separated by a blank line.
pub fn to_quiz_text(deck: &Deck) -> String {
    let mut out = String::new();
    for (index, mcq) in deck.mcqs.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}. {}", index + 1, mcq.stem.trim());
        for choice in &mcq.choices {
            let _ = writeln!(out, "   {}) {}", choice.label, choice.text.trim());
        }
        match mcq.correct_choice() {
            Some(choice) => {
                let _ = writeln!(out, "   Answer: {}) {}", choice.label, choice.text.trim());
            }
            None => {
                let _ = writeln!(out, "   Answer: {}", mcq.correct_label);
            }
        }
        if !mcq.explanation.trim().is_empty() {
            let _ = writeln!(out, "   Explanation: {}", mcq.explanation.trim());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckforge_core::{Choice, DeckId, Mcq};

    fn mcq(stem: &str, correct: &str, explanation: &str) -> Mcq {
        Mcq {
            stem: stem.to_string(),
            choices: vec![Choice::new("A", "Nucleus"), Choice::new("B", "Mitochondria")],
            correct_label: correct.to_string(),
            explanation: explanation.to_string(),
        }
    }

    #[test]
    fn renders_numbered_items() {
        let deck = Deck::new(DeckId::parse("d1").unwrap())
            .with_mcq(mcq("Powerhouse of the cell?", "B", "Makes ATP."))
            .with_mcq(mcq("Holds the DNA?", "A", ""));

        let expected = "\
1. Powerhouse of the cell?
   A) Nucleus
   B) Mitochondria
   Answer: B) Mitochondria
   Explanation: Makes ATP.

2. Holds the DNA?
   A) Nucleus
   B) Mitochondria
   Answer: A) Nucleus
";
        assert_eq!(to_quiz_text(&deck), expected);
    }

    #[test]
    fn dangling_answer_label_is_printed_verbatim() {
        let deck = Deck::new(DeckId::parse("d1").unwrap()).with_mcq(mcq("?", "Z", ""));
        assert!(to_quiz_text(&deck).contains("Answer: Z\n"));
    }

    #[test]
    fn deck_without_mcqs_renders_nothing() {
        assert_eq!(to_quiz_text(&Deck::new(DeckId::parse("d1").unwrap())), "");
    }
}
