//! Anki-importable CSV output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::deck::{Card, Deck, DeckSet};

/// Quotes a field only when it holds a comma, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<W: Write>(out: &mut W, fields: [&str; 3]) -> std::io::Result<()> {
    let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    write!(out, "{}\r\n", row.join(","))
}

pub fn write_csv(path: &Path, header: [&str; 3], cards: &[Card]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    write_row(&mut out, header).with_context(|| format!("Failed to write {}", path.display()))?;
    for card in cards {
        let tags = card.tag_line();
        write_row(&mut out, [card.front.as_str(), card.back.as_str(), tags.as_str()])
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Writes one file per non-empty deck and returns the written paths.
pub fn write_deck_set(set: &DeckSet, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut written = Vec::new();
    for deck in set.decks.iter().filter(|d| !d.cards.is_empty()) {
        written.push(write_deck(deck, set.header, output_dir)?);
    }
    Ok(written)
}

fn write_deck(deck: &Deck, header: [&str; 3], output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(&deck.file_name);
    write_csv(&path, header, &deck.cards)?;
    info!("Created: {} ({} cards)", path.display(), deck.cards.len());
    Ok(path)
}
