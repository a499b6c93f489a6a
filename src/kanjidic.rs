//! Kanjidic2 (jmdict-simplified JSON) model and per-character extraction.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;
use crate::level::{map_legacy_level, JlptLevel};

#[derive(Debug, Clone)]
pub struct Kanjidic {
    pub characters: Vec<Character>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(default)]
    pub literal: String,
    #[serde(default)]
    pub misc: Misc,
    #[serde(default)]
    pub reading_meaning: Option<ReadingMeaning>,
    #[serde(default)]
    pub radicals: Vec<Radical>,
    #[serde(default)]
    pub dictionary_references: Vec<DictionaryReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Misc {
    #[serde(default)]
    pub jlpt_level: Option<u8>,
    #[serde(default)]
    pub grade: Option<u8>,
    #[serde(default)]
    pub frequency: Option<u32>,
    #[serde(default)]
    pub stroke_counts: Vec<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadingMeaning {
    #[serde(default)]
    pub groups: Vec<ReadingMeaningGroup>,
    #[serde(default)]
    pub nanori: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadingMeaningGroup {
    #[serde(default)]
    pub readings: Vec<Reading>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Reading {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meaning {
    #[serde(default = "default_meaning_lang")]
    pub lang: String,
    #[serde(default)]
    pub value: String,
}

fn default_meaning_lang() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Radical {
    pub value: Scalar,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryReference {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub value: Scalar,
}

/// Some Kanjidic2 exports write numeric values as strings, some as numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(u64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Deserialize)]
struct RawKanjidic {
    characters: Option<Vec<Character>>,
}

pub fn load_kanjidic(path: &Path) -> Result<Kanjidic, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let data = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawKanjidic = serde_json::from_str(&data).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let characters = raw.characters.ok_or_else(|| LoadError::MissingKey {
        path: path.to_path_buf(),
        key: "characters",
    })?;
    Ok(Kanjidic { characters })
}

/// On'yomi and kun'yomi, in document order across all groups.
pub fn extract_readings(rm: Option<&ReadingMeaning>) -> (Vec<String>, Vec<String>) {
    let mut on = Vec::new();
    let mut kun = Vec::new();
    for reading in rm.into_iter().flat_map(|rm| &rm.groups).flat_map(|g| &g.readings) {
        match reading.kind.as_str() {
            "ja_on" => on.push(reading.value.clone()),
            "ja_kun" => kun.push(reading.value.clone()),
            _ => {}
        }
    }
    (on, kun)
}

pub fn extract_meanings(rm: Option<&ReadingMeaning>, lang: &str) -> Vec<String> {
    rm.into_iter()
        .flat_map(|rm| &rm.groups)
        .flat_map(|g| &g.meanings)
        .filter(|m| m.lang == lang && !m.value.is_empty())
        .map(|m| m.value.clone())
        .collect()
}

pub fn extract_nanori(rm: Option<&ReadingMeaning>) -> Vec<String> {
    rm.map(|rm| rm.nanori.clone()).unwrap_or_default()
}

pub fn extract_dict_reference(refs: &[DictionaryReference], kind: &str) -> Option<String> {
    refs.iter()
        .find(|r| r.kind == kind)
        .map(|r| r.value.to_string())
}

/// A classified character, ready to become a card.
#[derive(Debug, Clone, PartialEq)]
pub struct KanjiEntry {
    pub kanji: String,
    pub level: JlptLevel,
    pub on_readings: Vec<String>,
    pub kun_readings: Vec<String>,
    pub meanings: Vec<String>,
    pub nanori: Vec<String>,
    pub stroke_count: Option<u32>,
    pub grade: Option<u8>,
    pub frequency: Option<u32>,
    pub radical: Option<String>,
    pub heisig: Option<String>,
    pub heisig6: Option<String>,
}

impl KanjiEntry {
    /// `None` when the character has no literal or no mappable JLPT level.
    pub fn from_character(c: &Character) -> Option<KanjiEntry> {
        if c.literal.is_empty() {
            return None;
        }
        let level = map_legacy_level(c.misc.jlpt_level, c.misc.grade)?;
        let rm = c.reading_meaning.as_ref();
        let (on_readings, kun_readings) = extract_readings(rm);

        Some(KanjiEntry {
            kanji: c.literal.clone(),
            level,
            on_readings,
            kun_readings,
            meanings: extract_meanings(rm, "en"),
            nanori: extract_nanori(rm),
            stroke_count: c.misc.stroke_counts.first().copied(),
            grade: c.misc.grade,
            frequency: c.misc.frequency,
            radical: c.radicals.first().map(|r| r.value.to_string()),
            heisig: extract_dict_reference(&c.dictionary_references, "heisig"),
            heisig6: extract_dict_reference(&c.dictionary_references, "heisig6"),
        })
    }

    /// HTML back side of the card.
    pub fn back_field(&self) -> String {
        let mut parts = Vec::new();

        if !self.meanings.is_empty() {
            parts.push(format!("<b>Meanings:</b> {}", self.meanings.join("; ")));
        }
        if !self.on_readings.is_empty() {
            parts.push(format!("<b>On'yomi:</b> {}", self.on_readings.join("; ")));
        }
        if !self.kun_readings.is_empty() {
            parts.push(format!("<b>Kun'yomi:</b> {}", self.kun_readings.join("; ")));
        }
        if !self.nanori.is_empty() {
            parts.push(format!("<b>Name readings:</b> {}", self.nanori.join("; ")));
        }

        let mut stats = Vec::new();
        if let Some(n) = self.stroke_count.filter(|&n| n > 0) {
            stats.push(format!("Strokes: {n}"));
        }
        if let Some(r) = self.radical.as_deref().filter(|r| !r.is_empty()) {
            stats.push(format!("Radical: {r}"));
        }
        if let Some(f) = self.frequency.filter(|&f| f > 0) {
            stats.push(format!("Freq: #{f}"));
        }
        if !stats.is_empty() {
            parts.push(format!("<b>Stats:</b> {}", stats.join(" | ")));
        }

        let mut rtk = Vec::new();
        if let Some(h) = self.heisig.as_deref().filter(|h| !h.is_empty()) {
            rtk.push(format!("RTK: #{h}"));
        }
        if let Some(h) = self.heisig6.as_deref().filter(|h| !h.is_empty()) {
            rtk.push(format!("RTK6: #{h}"));
        }
        if !rtk.is_empty() {
            parts.push(format!("<b>Heisig:</b> {}", rtk.join(" | ")));
        }

        parts.join("<br><br>")
    }
}
