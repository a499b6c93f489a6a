use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use jlpt_decks::frequency::TierStrategy;
use jlpt_decks::kanjidic::load_kanjidic;
use jlpt_decks::sets::{self, DeckSource, Inputs, KanjiDeckSource, VocabDeckSource, VocabOptions};
use jlpt_decks::{report, ClassifierConfig};

/// Generate JLPT kanji and vocabulary Anki decks from Kanjidic2 and JMdict.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Comma separated deck kinds to build.
    #[arg(short, long, default_value = "kanji,vocab", env = "JLPT_DECKS_DECKS")]
    decks: String,

    /// List available deck kinds and exit.
    #[arg(short, long, default_value = "false")]
    list: bool,

    /// Kanjidic2 JSON file.
    #[arg(long, default_value = "kanjidic2-en-3.6.2.json", env = "JLPT_DECKS_KANJIDIC")]
    kanjidic: PathBuf,

    /// JMdict JSON file.
    #[arg(long, default_value = "jmdict-eng-3.6.2.json", env = "JLPT_DECKS_JMDICT")]
    jmdict: PathBuf,

    /// JMdict JSON file with example sentences, read instead of --jmdict with --examples.
    #[arg(
        long,
        default_value = "jmdict-examples-eng-3.6.2.json",
        env = "JLPT_DECKS_JMDICT_EXAMPLES"
    )]
    jmdict_examples: PathBuf,

    /// Include example sentences on vocabulary cards.
    #[arg(short, long)]
    examples: bool,

    /// Only include words marked as common.
    #[arg(long)]
    common_only: bool,

    /// Output directory.
    #[arg(short, long, default_value = "anki_decks", env = "JLPT_DECKS_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// How a word's frequency tier is derived from its kanji.
    #[arg(long, value_enum, default_value_t = TierStrategy::Max, env = "JLPT_DECKS_TIER_STRATEGY")]
    tier_strategy: TierStrategy,
}

impl Args {
    fn vocab_options(&self) -> VocabOptions {
        VocabOptions {
            jmdict: self.jmdict.clone(),
            jmdict_examples: self.jmdict_examples.clone(),
            include_examples: self.examples,
            common_only: self.common_only,
        }
    }

    fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            tier_strategy: self.tier_strategy,
        }
    }
}

fn get_source(name: &str, args: &Args) -> Option<Box<dyn DeckSource>> {
    match name {
        "kanji" => Some(Box::new(KanjiDeckSource)),
        "vocab" => Some(Box::new(VocabDeckSource::new(args.vocab_options()))),
        _ => None,
    }
}

fn resolve_sources(args: &Args) -> Vec<Box<dyn DeckSource>> {
    let mut sources: Vec<Box<dyn DeckSource>> = Vec::new();
    for name in args.decks.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if sources.iter().any(|s| s.name() == name) {
            continue;
        }
        match get_source(name, args) {
            Some(source) => sources.push(source),
            None => warn!("Deck kind '{}' not found.", name),
        }
    }
    sources
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    if args.list {
        println!("Available deck kinds: {}", sets::AVAILABLE.join(", "));
        return Ok(());
    }

    let sources = resolve_sources(&args);
    if sources.is_empty() {
        println!("No deck kinds selected. Use --list to see what is available.");
        return Ok(());
    }

    info!("Loading Kanjidic2 from {}...", args.kanjidic.display());
    let kanjidic = load_kanjidic(&args.kanjidic).context("Failed to load Kanjidic2")?;
    let inputs = Inputs::new(kanjidic, args.classifier_config());

    let built = sets::generate(&sources, &inputs, &args.output_dir)?;

    let output_dir = args
        .output_dir
        .canonicalize()
        .unwrap_or_else(|_| args.output_dir.clone());
    for set in &built {
        print!("{}", report::summary(set, &output_dir));
    }
    print!("{}", report::import_instructions(&built));

    Ok(())
}
