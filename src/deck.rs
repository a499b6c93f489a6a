//! Cards and the buckets that group them into decks.

use std::collections::BTreeMap;

/// One flashcard row: front, HTML back, space-joined tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub front: String,
    pub back: String,
    pub tags: Vec<String>,
}

impl Card {
    pub fn tag_line(&self) -> String {
        self.tags.join(" ")
    }
}

/// Groups cards by classification. Buckets appear on first use.
#[derive(Debug, Clone)]
pub struct Buckets<K: Ord> {
    buckets: BTreeMap<K, Vec<Card>>,
    skipped: usize,
}

impl<K: Ord> Default for Buckets<K> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            skipped: 0,
        }
    }
}

impl<K: Ord + Copy> Buckets<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: K, card: Card) {
        self.buckets.entry(key).or_default().push(card);
    }

    /// Records a filtered-out input record.
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    pub fn processed(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len_of(&self, key: &K) -> usize {
        self.buckets.get(key).map_or(0, Vec::len)
    }

    pub fn get(&self, key: &K) -> &[Card] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Turns buckets into decks following `order`. Listed keys without cards
    /// still yield an empty deck so they show up in the summary; keys that
    /// are not listed come last in key order.
    pub fn into_decks<F>(self, order: &[K], mut describe: F) -> Vec<Deck>
    where
        F: FnMut(K) -> DeckInfo,
    {
        let mut buckets = self.buckets;
        let mut decks = Vec::with_capacity(order.len().max(buckets.len()));
        for key in order {
            let cards = buckets.remove(key).unwrap_or_default();
            decks.push(describe(*key).into_deck(cards));
        }
        for (key, cards) in buckets {
            decks.push(describe(key).into_deck(cards));
        }
        decks
    }
}

/// Naming of a deck derived from its classification.
#[derive(Debug, Clone)]
pub struct DeckInfo {
    pub label: String,
    pub file_name: String,
}

impl DeckInfo {
    fn into_deck(self, cards: Vec<Card>) -> Deck {
        Deck {
            label: self.label,
            file_name: self.file_name,
            cards,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Deck {
    /// Summary label, e.g. `N5` or `Kana-only`.
    pub label: String,
    pub file_name: String,
    pub cards: Vec<Card>,
}

/// Everything one deck source produced in a run.
#[derive(Debug, Clone)]
pub struct DeckSet {
    pub name: String,
    /// Noun used in the summary, e.g. `kanji` or `words`.
    pub unit: &'static str,
    /// CSV header, front column first.
    pub header: [&'static str; 3],
    pub decks: Vec<Deck>,
    pub processed: usize,
    pub skipped: usize,
    /// Printed once after the import instructions.
    pub note: Option<&'static str>,
}
