use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::{DeckSource, Inputs, TATOEBA_NOTE};
use crate::classify::{Lookups, VocabLevel};
use crate::deck::{Buckets, Card, DeckInfo, DeckSet};
use crate::jmdict::{load_jmdict, Jmdict, VocabEntry, Word};

#[derive(Debug, Clone)]
pub struct VocabOptions {
    pub jmdict: PathBuf,
    pub jmdict_examples: PathBuf,
    pub include_examples: bool,
    pub common_only: bool,
}

impl VocabOptions {
    /// The examples build of JMdict is a separate file.
    pub fn dictionary_path(&self) -> &Path {
        if self.include_examples {
            self.jmdict_examples.as_path()
        } else {
            self.jmdict.as_path()
        }
    }

    fn suffix(&self) -> &'static str {
        if self.include_examples {
            "_examples"
        } else {
            ""
        }
    }
}

#[derive(Debug, Clone)]
pub struct VocabDeckSource {
    options: VocabOptions,
}

impl VocabDeckSource {
    pub fn new(options: VocabOptions) -> Self {
        Self { options }
    }

    fn card(&self, entry: &VocabEntry, level: VocabLevel, word: &Word, lookups: &Lookups) -> Card {
        let mut tags = vec![level.tag().to_string()];
        if entry.is_common {
            tags.push("common".to_string());
        }
        tags.push(entry.form_type.to_string());
        if let Some(tier) = lookups.word_tier(word) {
            tags.push(format!("freq_tier{tier}"));
        }
        Card {
            front: entry.word.clone(),
            back: entry.back_field(self.options.include_examples),
            tags,
        }
    }

    /// Buckets an already loaded dictionary.
    pub fn bucket(&self, dict: &Jmdict, lookups: &Lookups) -> Buckets<VocabLevel> {
        let mut buckets = Buckets::new();
        for word in &dict.words {
            let Some(entry) = VocabEntry::from_word(word, &dict.tags, self.options.include_examples)
            else {
                debug!("Skipping word {}: no primary form or meanings", word.id);
                buckets.skip();
                continue;
            };
            if self.options.common_only && !entry.is_common {
                buckets.skip();
                continue;
            }
            let level = lookups.word_level(word);
            buckets.push(level, self.card(&entry, level, word, lookups));
        }
        buckets
    }
}

impl DeckSource for VocabDeckSource {
    fn name(&self) -> String {
        "vocab".to_string()
    }

    fn build(&self, inputs: &Inputs) -> Result<DeckSet> {
        let path = self.options.dictionary_path();
        info!(
            "Loading JMdict ({})...",
            if self.options.include_examples {
                "with examples"
            } else {
                "without examples"
            }
        );
        let dict = load_jmdict(path).context("Failed to load JMdict")?;
        info!("Total entries: {}", dict.words.len());
        if self.options.include_examples {
            let with_examples = dict.words.iter().filter(|w| w.has_examples()).count();
            info!("Entries with examples: {}", with_examples);
        }

        info!("Categorizing words by JLPT level...");
        let buckets = self.bucket(&dict, &inputs.lookups);
        let processed = buckets.processed();
        let skipped = buckets.skipped();
        info!("Processed: {} words", processed);
        if skipped > 0 {
            info!("Skipped: {} words", skipped);
        }

        let suffix = self.options.suffix();
        let decks = buckets.into_decks(&VocabLevel::ALL, |level| DeckInfo {
            label: match level {
                VocabLevel::Jlpt(l) => l.to_string(),
                VocabLevel::KanaOnly => "Kana-only".to_string(),
                VocabLevel::NonJlpt => "Non-JLPT kanji".to_string(),
            },
            file_name: format!("jlpt_{}_vocab{suffix}.csv", level.slug()),
        });

        Ok(DeckSet {
            name: self.name(),
            unit: "words",
            header: ["word", "back", "tags"],
            decks,
            processed,
            skipped,
            note: self.options.include_examples.then_some(TATOEBA_NOTE),
        })
    }
}
