//! Builds Anki flashcard decks for JLPT study from the jmdict-simplified
//! exports of Kanjidic2 and JMdict.
//!
//! Kanji are grouped by their JLPT level (old 4-level data mapped onto
//! N5..N1). Words are grouped by the hardest level among their kanji, with
//! separate decks for kana-only words and words whose kanji carry no level.

pub mod classify;
pub mod deck;
pub mod error;
pub mod frequency;
pub mod jmdict;
pub mod kanjidic;
pub mod level;
pub mod report;
pub mod sets;
pub mod writer;

pub use classify::{ClassifierConfig, Lookups};
pub use deck::{Card, Deck, DeckSet};
pub use error::LoadError;
