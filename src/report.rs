//! End-of-run summary and Anki import instructions.

use std::path::Path;

use crate::deck::{Deck, DeckSet};
use crate::level::JlptLevel;

const RULE: &str = "============================================================";

fn heading(out: &mut String, title: &str) {
    out.push_str(&format!("\n{RULE}\n{title}\n{RULE}\n"));
}

fn is_jlpt_deck(deck: &Deck) -> bool {
    JlptLevel::ALL.iter().any(|level| level.name() == deck.label)
}

pub fn summary(set: &DeckSet, output_dir: &Path) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("{} DECK SUMMARY", set.name.to_uppercase()));

    for deck in &set.decks {
        out.push_str(&format!("  {}: {} {}\n", deck.label, deck.cards.len(), set.unit));
    }

    // Kana-only and non-JLPT word decks are listed above but not counted.
    let jlpt_total: usize = set
        .decks
        .iter()
        .filter(|d| is_jlpt_deck(d))
        .map(|d| d.cards.len())
        .sum();
    if set.decks.iter().all(is_jlpt_deck) {
        out.push_str(&format!("\nTotal: {} {}\n", jlpt_total, set.unit));
    } else {
        out.push_str(&format!("\nTotal JLPT {}: {}\n", set.unit, jlpt_total));
    }

    if set.skipped > 0 {
        out.push_str(&format!("Skipped: {} entries\n", set.skipped));
    }
    out.push_str(&format!("Files saved to: {}\n", output_dir.display()));
    out
}

pub fn import_instructions(sets: &[DeckSet]) -> String {
    let mut out = String::new();
    heading(&mut out, "IMPORT INSTRUCTIONS");
    out.push_str("1. Open Anki → File → Import\n");
    out.push_str("2. Select a CSV file (e.g. jlpt_N5_kanji.csv)\n");
    out.push_str("3. Set card type to 'Basic'\n");
    out.push_str("4. Field mapping:\n");
    for set in sets {
        out.push_str(&format!("   {} decks:\n", set.name));
        out.push_str(&format!("   - Column 1 ({}) → Front\n", set.header[0]));
        out.push_str(&format!("   - Column 2 ({}) → Back\n", set.header[1]));
        out.push_str(&format!("   - Column 3 ({}) → Tags\n", set.header[2]));
    }
    out.push_str("5. ✅ Allow HTML in fields\n");
    if sets.iter().any(|s| s.unit == "words") {
        out.push_str("\nNote: a word is assigned to the HIGHEST (most difficult)\n");
        out.push_str("JLPT level of any kanji it contains.\n");
    }
    for note in sets.iter().filter_map(|s| s.note) {
        out.push_str(&format!("\n{note}\n"));
    }
    out
}
