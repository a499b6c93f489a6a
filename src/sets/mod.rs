//! Deck sources. Each one turns the loaded dictionaries into a [`DeckSet`].

pub mod kanji;
pub mod vocab;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::classify::{ClassifierConfig, Lookups};
use crate::deck::DeckSet;
use crate::frequency::build_tier_map;
use crate::kanjidic::Kanjidic;
use crate::level::build_level_map;
use crate::writer;

pub use kanji::KanjiDeckSource;
pub use vocab::{VocabDeckSource, VocabOptions};

/// Deck kinds accepted on the command line.
pub const AVAILABLE: [&str; 2] = ["kanji", "vocab"];

pub const TATOEBA_NOTE: &str = "Examples are from the Tatoeba corpus (Japanese/English pairs)";

pub trait DeckSource {
    fn name(&self) -> String;
    fn build(&self, inputs: &Inputs) -> Result<DeckSet>;
}

/// Inputs shared by every source in a run.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub kanjidic: Kanjidic,
    pub lookups: Lookups,
}

impl Inputs {
    pub fn new(kanjidic: Kanjidic, config: ClassifierConfig) -> Self {
        let levels = build_level_map(&kanjidic.characters);
        info!("Loaded {} kanji with JLPT levels", levels.len());

        let tiers = build_tier_map(&kanjidic.characters);
        info!("Calculated tiers for {} kanji with frequency data", tiers.len());

        Self {
            kanjidic,
            lookups: Lookups {
                levels,
                tiers,
                config,
            },
        }
    }
}

/// Builds every source, then writes them. Nothing reaches `output_dir` unless
/// all builds succeed.
pub fn generate(
    sources: &[Box<dyn DeckSource>],
    inputs: &Inputs,
    output_dir: &Path,
) -> Result<Vec<DeckSet>> {
    let mut built = Vec::with_capacity(sources.len());
    for source in sources {
        let set = source
            .build(inputs)
            .with_context(|| format!("Failed to build {} decks", source.name()))?;
        built.push(set);
    }

    for set in &built {
        info!("Generating {} CSV files in {}...", set.name, output_dir.display());
        writer::write_deck_set(set, output_dir)?;
    }
    Ok(built)
}
