use anyhow::Result;
use tracing::{debug, info};

use super::{DeckSource, Inputs};
use crate::deck::{Buckets, Card, DeckInfo, DeckSet};
use crate::frequency::Tier;
use crate::kanjidic::KanjiEntry;
use crate::level::JlptLevel;

#[derive(Debug, Clone, Default)]
pub struct KanjiDeckSource;

impl KanjiDeckSource {
    fn card(entry: &KanjiEntry, tier: Option<Tier>) -> Card {
        let mut tags = vec![entry.level.to_string()];
        if let Some(grade) = entry.grade.filter(|&g| g > 0) {
            tags.push(format!("grade{grade}"));
        }
        if let Some(tier) = tier {
            tags.push(format!("freq_tier{tier}"));
        }
        Card {
            front: entry.kanji.clone(),
            back: entry.back_field(),
            tags,
        }
    }
}

impl DeckSource for KanjiDeckSource {
    fn name(&self) -> String {
        "kanji".to_string()
    }

    fn build(&self, inputs: &Inputs) -> Result<DeckSet> {
        info!("Processing characters...");
        let mut buckets: Buckets<JlptLevel> = Buckets::new();

        for character in &inputs.kanjidic.characters {
            match KanjiEntry::from_character(character) {
                Some(entry) => {
                    let tier = inputs.lookups.kanji_tier(&entry.kanji);
                    buckets.push(entry.level, Self::card(&entry, tier));
                }
                None => {
                    debug!("Skipping character {:?}", character.literal);
                    buckets.skip();
                }
            }
        }

        let processed = buckets.processed();
        let skipped = buckets.skipped();
        info!("Processed {} kanji with JLPT levels", processed);
        if skipped > 0 {
            info!("Skipped {} entries (no JLPT level or invalid data)", skipped);
        }

        let decks = buckets.into_decks(&JlptLevel::ALL, |level| DeckInfo {
            label: level.to_string(),
            file_name: format!("jlpt_{level}_kanji.csv"),
        });

        Ok(DeckSet {
            name: self.name(),
            unit: "kanji",
            header: ["kanji", "back", "tags"],
            decks,
            processed,
            skipped,
            note: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassifierConfig;
    use crate::kanjidic::Kanjidic;

    fn inputs() -> Inputs {
        let characters = serde_json::from_str(
            r#"[
                {"literal": "日", "misc": {"jlptLevel": 4, "grade": 1, "frequency": 1},
                 "readingMeaning": {"groups": [{"meanings": [{"lang": "en", "value": "day"}]}]}},
                {"literal": "学", "misc": {"jlptLevel": 2, "grade": 1, "frequency": 63}},
                {"literal": "曜", "misc": {"jlptLevel": 2, "grade": 2, "frequency": 940}},
                {"literal": "鬱", "misc": {"frequency": 2000}},
                {"literal": "璽", "misc": {"jlptLevel": 1}}
            ]"#,
        )
        .unwrap();
        Inputs::new(Kanjidic { characters }, ClassifierConfig::default())
    }

    #[test]
    fn test_build_buckets_by_level() {
        let set = KanjiDeckSource.build(&inputs()).unwrap();
        assert_eq!(set.processed, 4);
        assert_eq!(set.skipped, 1);

        let labels: Vec<_> = set.decks.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["N5", "N4", "N3", "N2", "N1"]);

        let n5 = &set.decks[0];
        assert_eq!(n5.file_name, "jlpt_N5_kanji.csv");
        assert_eq!(n5.cards.len(), 1);
        assert_eq!(n5.cards[0].front, "日");
        assert_eq!(n5.cards[0].back, "<b>Meanings:</b> day<br><br><b>Stats:</b> Freq: #1");
        assert_eq!(n5.cards[0].tags, vec!["N5", "grade1", "freq_tier1"]);

        assert!(set.decks[1].cards.is_empty());

        let n3: Vec<_> = set.decks[2].cards.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(n3, vec!["学", "曜"]);

        let n1 = &set.decks[4].cards[0];
        assert_eq!(n1.front, "璽");
        assert_eq!(n1.tags, vec!["N1"]);
    }

    #[test]
    fn test_cards_carry_their_deck_tag() {
        let set = KanjiDeckSource.build(&inputs()).unwrap();
        for deck in &set.decks {
            for card in &deck.cards {
                assert_eq!(card.tags[0], deck.label);
            }
        }
    }
}
