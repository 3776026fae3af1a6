//! `deckforge-export`
//!
//! **Responsibility:** render an already-fetched [`Deck`] into shareable
//! formats. Pure functions: no store access, no state.

use core::str::FromStr;

use deckforge_core::Deck;
use thiserror::Error;

pub mod quiz;
pub mod tsv;

pub use quiz::to_quiz_text;
pub use tsv::to_tsv;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode deck: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `question<TAB>answer` per line (flashcard importers)
    Tsv,
    /// The deck document itself
    Json,
    /// Numbered multiple-choice quiz
    QuizText,
}

impl ExportFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
            ExportFormat::QuizText => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" | "anki" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            "quiz" | "txt" | "text" => Ok(ExportFormat::QuizText),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Pretty-printed JSON of the whole deck.
pub fn to_json(deck: &Deck) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(deck)?)
}

/// Render `deck` in `format`.
pub fn render(deck: &Deck, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Tsv => Ok(to_tsv(deck)),
        ExportFormat::Json => to_json(deck),
        ExportFormat::QuizText => Ok(to_quiz_text(deck)),
    }
}
