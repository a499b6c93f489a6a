//! JMdict (jmdict-simplified JSON) model and per-word extraction.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Jmdict {
    /// Tag code -> human label, e.g. `"v1" -> "Ichidan verb"`.
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Word {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub kanji: Vec<Form>,
    #[serde(default)]
    pub kana: Vec<Form>,
    #[serde(default)]
    pub sense: Vec<Sense>,
}

/// A kanji or kana spelling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Form {
    #[serde(default)]
    pub common: bool,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    #[serde(default)]
    pub part_of_speech: Vec<String>,
    #[serde(default)]
    pub gloss: Vec<Gloss>,
    #[serde(default)]
    pub info: Vec<String>,
    #[serde(default)]
    pub misc: Vec<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gloss {
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sentence {
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub text: String,
}

pub fn load_jmdict(path: &Path) -> Result<Jmdict, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let data = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormType {
    Kanji,
    Kana,
}

impl FormType {
    pub fn as_str(self) -> &'static str {
        match self {
            FormType::Kanji => "kanji",
            FormType::Kana => "kana",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Word {
    pub fn is_common(&self) -> bool {
        self.kanji.iter().chain(&self.kana).any(|f| f.common)
    }

    /// First common kanji form, else first kanji form, else first common
    /// kana form, else first kana form. A common form with empty text ends
    /// the search with no form.
    pub fn primary_form(&self) -> Option<(&str, FormType)> {
        fn text_of(form: &Form, kind: FormType) -> Option<(&str, FormType)> {
            (!form.text.is_empty()).then_some((form.text.as_str(), kind))
        }

        if let Some(k) = self.kanji.iter().find(|k| k.common) {
            return text_of(k, FormType::Kanji);
        }
        if let Some(found) = self.kanji.first().and_then(|k| text_of(k, FormType::Kanji)) {
            return Some(found);
        }
        if let Some(k) = self.kana.iter().find(|k| k.common) {
            return text_of(k, FormType::Kana);
        }
        self.kana.first().and_then(|k| text_of(k, FormType::Kana))
    }

    pub fn readings(&self) -> Vec<&str> {
        self.kana
            .iter()
            .map(|k| k.text.as_str())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Texts of every kanji-bearing spelling, in order.
    pub fn kanji_texts(&self) -> impl Iterator<Item = &str> {
        self.kanji.iter().map(|k| k.text.as_str())
    }

    pub fn has_examples(&self) -> bool {
        self.sense.iter().any(|s| !s.examples.is_empty())
    }
}

fn label<'a>(tags: &'a HashMap<String, String>, code: &'a str) -> &'a str {
    tags.get(code).map(String::as_str).unwrap_or(code)
}

/// `(pos; pos) gloss; gloss [info] <i>(misc)</i>`, omitting empty parts.
pub fn format_sense(sense: &Sense, tags: &HashMap<String, String>) -> String {
    let mut parts = Vec::new();

    let pos: Vec<&str> = sense
        .part_of_speech
        .iter()
        .map(|p| label(tags, p))
        .filter(|l| !l.is_empty())
        .collect();
    if !pos.is_empty() {
        parts.push(format!("({})", pos.join("; ")));
    }

    let glosses: Vec<&str> = sense
        .gloss
        .iter()
        .filter(|g| g.lang == "eng" && !g.text.is_empty())
        .map(|g| g.text.as_str())
        .collect();
    if !glosses.is_empty() {
        parts.push(glosses.join("; "));
    }

    if !sense.info.is_empty() {
        parts.push(format!("[{}]", sense.info.join("; ")));
    }

    let misc: Vec<&str> = sense
        .misc
        .iter()
        .map(|m| label(tags, m))
        .filter(|l| !l.is_empty())
        .collect();
    if !misc.is_empty() {
        parts.push(format!("<i>({})</i>", misc.join("; ")));
    }

    parts.join(" ")
}

/// Numbered Japanese/English pairs. Examples missing either side are dropped
/// but still consume their number.
pub fn format_examples(examples: &[Example], max_examples: usize) -> String {
    let mut formatted = Vec::new();
    for (i, ex) in examples.iter().take(max_examples).enumerate() {
        let mut japanese = "";
        let mut english = "";
        for sentence in &ex.sentences {
            match sentence.lang.as_str() {
                "jpn" => japanese = &sentence.text,
                "eng" => english = &sentence.text,
                _ => {}
            }
        }
        if !japanese.is_empty() && !english.is_empty() {
            formatted.push(format!("{}. {japanese}<br>→ {english}", i + 1));
        }
    }
    formatted.join("<br>")
}

const EXAMPLES_PER_SENSE: usize = 2;
const EXAMPLE_BLOCKS: usize = 2;

/// A dictionary entry reduced to what a vocabulary card shows.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabEntry {
    pub word: String,
    pub form_type: FormType,
    pub readings: String,
    pub senses: String,
    pub is_common: bool,
    pub examples: Option<String>,
}

impl VocabEntry {
    /// `None` when the word has no primary form or no non-empty sense.
    pub fn from_word(
        word: &Word,
        tags: &HashMap<String, String>,
        include_examples: bool,
    ) -> Option<VocabEntry> {
        let (form, form_type) = word.primary_form()?;

        let mut senses = Vec::new();
        let mut example_blocks = Vec::new();
        for (i, sense) in word.sense.iter().enumerate() {
            let text = format_sense(sense, tags);
            if !text.is_empty() {
                senses.push(format!("{}. {text}", i + 1));
            }
            if include_examples {
                let block = format_examples(&sense.examples, EXAMPLES_PER_SENSE);
                if !block.is_empty() {
                    example_blocks.push(block);
                }
            }
        }
        if senses.is_empty() {
            return None;
        }

        example_blocks.truncate(EXAMPLE_BLOCKS);
        let examples = (!example_blocks.is_empty()).then(|| example_blocks.join("<br><br>"));

        Some(VocabEntry {
            word: form.to_string(),
            form_type,
            readings: word.readings().join(", "),
            senses: senses.join("<br>"),
            is_common: word.is_common(),
            examples,
        })
    }

    pub fn back_field(&self, include_examples: bool) -> String {
        let mut parts = Vec::new();
        if !self.readings.is_empty() {
            parts.push(format!("<b>Reading:</b> {}", self.readings));
        }
        if !self.senses.is_empty() {
            parts.push(format!("<b>Meanings:</b><br>{}", self.senses));
        }
        if include_examples {
            if let Some(examples) = &self.examples {
                parts.push(format!("<b>Examples:</b><br>{examples}"));
            }
        }
        parts.join("<br><br>")
    }
}
