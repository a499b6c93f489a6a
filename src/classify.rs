//! Classifies multi-kanji words from the levels and tiers of their kanji.

use std::collections::HashMap;
use std::fmt;

use crate::frequency::{Tier, TierMap, TierStrategy};
use crate::jmdict::Word;
use crate::level::{JlptLevel, LevelMap};

/// CJK Unified Ideographs, U+4E00..=U+9FFF.
pub fn is_kanji(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Outcome of scanning a word's kanji against a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite<T> {
    /// The word has no kanji spellings at all.
    KanaOnly,
    /// Kanji spellings exist but none of their kanji are in the table.
    NoMatch,
    Matched(T),
}

/// Looks up every kanji of every spelling, in scan order.
pub fn scan<'a, T, I>(forms: I, lookup: &HashMap<String, T>) -> Composite<Vec<T>>
where
    T: Copy,
    I: IntoIterator<Item = &'a str>,
{
    let mut forms = forms.into_iter().peekable();
    if forms.peek().is_none() {
        return Composite::KanaOnly;
    }

    let mut buf = [0u8; 4];
    let found: Vec<T> = forms
        .flat_map(str::chars)
        .filter(|&c| is_kanji(c))
        .filter_map(|c| lookup.get(&*c.encode_utf8(&mut buf)).copied())
        .collect();

    if found.is_empty() {
        Composite::NoMatch
    } else {
        Composite::Matched(found)
    }
}

/// Hardest matched level wins.
pub fn classify_level<'a, I>(forms: I, levels: &LevelMap) -> Composite<JlptLevel>
where
    I: IntoIterator<Item = &'a str>,
{
    match scan(forms, levels) {
        Composite::KanaOnly => Composite::KanaOnly,
        Composite::NoMatch => Composite::NoMatch,
        Composite::Matched(found) => match found.into_iter().max() {
            Some(level) => Composite::Matched(level),
            None => Composite::NoMatch,
        },
    }
}

pub fn classify_tier<'a, I>(forms: I, tiers: &TierMap, strategy: TierStrategy) -> Composite<Tier>
where
    I: IntoIterator<Item = &'a str>,
{
    match scan(forms, tiers) {
        Composite::KanaOnly => Composite::KanaOnly,
        Composite::NoMatch => Composite::NoMatch,
        Composite::Matched(found) => match strategy.combine(&found) {
            Some(tier) => Composite::Matched(tier),
            None => Composite::NoMatch,
        },
    }
}

/// Vocabulary deck a word lands in. Ordered the way decks are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VocabLevel {
    Jlpt(JlptLevel),
    KanaOnly,
    NonJlpt,
}

impl VocabLevel {
    pub const ALL: [VocabLevel; 7] = [
        VocabLevel::Jlpt(JlptLevel::N5),
        VocabLevel::Jlpt(JlptLevel::N4),
        VocabLevel::Jlpt(JlptLevel::N3),
        VocabLevel::Jlpt(JlptLevel::N2),
        VocabLevel::Jlpt(JlptLevel::N1),
        VocabLevel::KanaOnly,
        VocabLevel::NonJlpt,
    ];

    /// File name component.
    pub fn slug(self) -> &'static str {
        match self {
            VocabLevel::Jlpt(level) => level.name(),
            VocabLevel::KanaOnly => "kana_only",
            VocabLevel::NonJlpt => "non_jlpt",
        }
    }

    /// Anki tag carried by every card of the deck.
    pub fn tag(self) -> &'static str {
        match self {
            VocabLevel::Jlpt(level) => level.name(),
            VocabLevel::KanaOnly => "kana",
            VocabLevel::NonJlpt => "non_jlpt",
        }
    }
}

impl From<Composite<JlptLevel>> for VocabLevel {
    fn from(c: Composite<JlptLevel>) -> Self {
        match c {
            Composite::KanaOnly => VocabLevel::KanaOnly,
            Composite::NoMatch => VocabLevel::NonJlpt,
            Composite::Matched(level) => VocabLevel::Jlpt(level),
        }
    }
}

impl fmt::Display for VocabLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Policy knobs for classification, fixed for the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub tier_strategy: TierStrategy,
}

/// The kanji tables every deck of a run is classified against.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    pub levels: LevelMap,
    pub tiers: TierMap,
    pub config: ClassifierConfig,
}

impl Lookups {
    pub fn word_level(&self, word: &Word) -> VocabLevel {
        classify_level(word.kanji_texts(), &self.levels).into()
    }

    pub fn word_tier(&self, word: &Word) -> Option<Tier> {
        match classify_tier(word.kanji_texts(), &self.tiers, self.config.tier_strategy) {
            Composite::Matched(tier) => Some(tier),
            Composite::KanaOnly | Composite::NoMatch => None,
        }
    }

    pub fn kanji_tier(&self, literal: &str) -> Option<Tier> {
        self.tiers.get(literal).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> LevelMap {
        HashMap::from([
            ("日".to_string(), JlptLevel::N5),
            ("本".to_string(), JlptLevel::N5),
            ("曜".to_string(), JlptLevel::N1),
            ("学".to_string(), JlptLevel::N3),
        ])
    }

    fn tiers() -> TierMap {
        HashMap::from([
            ("日".to_string(), Tier::new(1).unwrap()),
            ("曜".to_string(), Tier::new(4).unwrap()),
        ])
    }

    #[test]
    fn test_kana_only_regardless_of_lookup() {
        let none: [&str; 0] = [];
        assert_eq!(classify_level(none, &levels()), Composite::KanaOnly);
        assert_eq!(classify_level(none, &LevelMap::new()), Composite::KanaOnly);
        assert_eq!(
            classify_tier(none, &tiers(), TierStrategy::Max),
            Composite::KanaOnly
        );
    }

    #[test]
    fn test_unknown_kanji_is_no_match() {
        assert_eq!(classify_level(["鬱"], &levels()), Composite::NoMatch);
        // Non-ideographs are never looked up, even when the table has them.
        let mut table = levels();
        table.insert("ア".to_string(), JlptLevel::N5);
        assert_eq!(classify_level(["アイ"], &table), Composite::NoMatch);
    }

    #[test]
    fn test_hardest_level_wins() {
        assert_eq!(
            classify_level(["日本"], &levels()),
            Composite::Matched(JlptLevel::N5)
        );
        assert_eq!(
            classify_level(["曜日"], &levels()),
            Composite::Matched(JlptLevel::N1)
        );
        // Every spelling is scanned, not only the first.
        assert_eq!(
            classify_level(["日本", "学ぶ"], &levels()),
            Composite::Matched(JlptLevel::N3)
        );
    }

    #[test]
    fn test_tier_strategies() {
        let t = tiers();
        let tier = |s| match classify_tier(["曜日"], &t, s) {
            Composite::Matched(tier) => tier.get(),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(tier(TierStrategy::Max), 4);
        assert_eq!(tier(TierStrategy::Average), 3);
        assert_eq!(tier(TierStrategy::First), 4);

        assert_eq!(
            classify_tier(["本"], &t, TierStrategy::Max),
            Composite::NoMatch
        );
    }

    #[test]
    fn test_vocab_level_mapping_and_order() {
        assert_eq!(VocabLevel::from(Composite::KanaOnly), VocabLevel::KanaOnly);
        assert_eq!(VocabLevel::from(Composite::NoMatch), VocabLevel::NonJlpt);
        assert_eq!(
            VocabLevel::from(Composite::Matched(JlptLevel::N2)),
            VocabLevel::Jlpt(JlptLevel::N2)
        );

        let mut sorted = VocabLevel::ALL;
        sorted.reverse();
        sorted.sort();
        assert_eq!(sorted, VocabLevel::ALL);
        assert_eq!(VocabLevel::KanaOnly.tag(), "kana");
        assert_eq!(VocabLevel::KanaOnly.slug(), "kana_only");
    }

    #[test]
    fn test_lookups_on_words() {
        let lookups = Lookups {
            levels: levels(),
            tiers: tiers(),
            config: ClassifierConfig {
                tier_strategy: TierStrategy::Average,
            },
        };
        let word: Word = serde_json::from_str(
            r#"{"kanji": [{"text": "曜日"}], "kana": [{"text": "ようび"}]}"#,
        )
        .unwrap();
        assert_eq!(lookups.word_level(&word), VocabLevel::Jlpt(JlptLevel::N1));
        assert_eq!(lookups.word_tier(&word).map(Tier::get), Some(3));

        let kana: Word = serde_json::from_str(r#"{"kana": [{"text": "ようび"}]}"#).unwrap();
        assert_eq!(lookups.word_level(&kana), VocabLevel::KanaOnly);
        assert_eq!(lookups.word_tier(&kana), None);
        assert_eq!(lookups.kanji_tier("日").map(Tier::get), Some(1));
    }
}
