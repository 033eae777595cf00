//! CLI binary for pdf2cards.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `GenerationConfig`, auto-detects PDF vs text input, and prints cards.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use pdf2cards::{
    analyze, generate_cards, generate_with_difficulty, inspect, parse_pdf, process_text,
    validate_for_cards, Difficulty, GeminiBackend, GenerationConfig, GenerationOutput,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI definition ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Generate study flashcards from a PDF or plain-text file.
#[derive(Debug, Parser)]
#[command(name = "pdf2cards", version, about)]
struct Cli {
    /// Input file: a PDF (detected by magic bytes) or UTF-8 text
    input: PathBuf,

    /// Number of cards to generate
    #[arg(short = 'n', long, default_value_t = 10)]
    num_cards: usize,

    /// Difficulty tier (model-backed generation only)
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Gemini API key; omit to run rule-based generation only
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier for the generative backend
    #[arg(long, default_value = "gemini-pro")]
    model: String,

    /// Print the result as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show PDF metadata and exit without generating cards
    #[arg(long)]
    inspect: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("reading '{}'", cli.input.display()))?;
    let is_pdf = bytes.starts_with(b"%PDF");

    if cli.inspect {
        if !is_pdf {
            bail!("--inspect needs a PDF input");
        }
        let meta = inspect(&bytes)?;
        println!("{}", bold("Document metadata"));
        println!("  pages:   {}", meta.page_count);
        println!("  title:   {}", meta.title);
        println!("  author:  {}", meta.author);
        println!("  subject: {}", meta.subject);
        return Ok(());
    }

    let mut builder = GenerationConfig::builder().num_cards(cli.num_cards);
    let model_backed = match cli.api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => {
            builder = builder.backend(Arc::new(GeminiBackend::with_model(key, cli.model.as_str())));
            true
        }
        None => false,
    };
    let config = builder.build()?;

    if cli.difficulty.is_some() && !model_backed {
        eprintln!(
            "{}",
            dim("note: --difficulty has no effect without an API key")
        );
    }

    let raw = if is_pdf {
        parse_pdf(&bytes, &config)?
    } else {
        String::from_utf8(bytes).context("input is neither a PDF nor valid UTF-8 text")?
    };
    validate_for_cards(&raw)?;
    let cleaned = process_text(&raw)?;
    let stats = analyze(&cleaned);
    eprintln!(
        "{}",
        dim(&format!(
            "{} chars, {} words, {} sentences",
            stats.char_count, stats.word_count, stats.sentence_count
        ))
    );

    let output = match cli.difficulty {
        Some(tier) => generate_with_difficulty(&cleaned, tier.into(), &config).await,
        None => generate_cards(&cleaned, &config).await,
    };

    // Zero cards after a non-error path is a generation failure, not an
    // empty success.
    if output.cards.is_empty() {
        bail!("no cards could be generated from this input");
    }

    let rendered = if cli.json {
        serde_json::to_string_pretty(&output).context("serialising output")?
    } else {
        render_cards(&output, cli.output.is_none())
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("writing '{}'", path.display()))?;
            eprintln!(
                "{} {} cards written to {}",
                green("✓"),
                output.cards.len(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Format cards for terminal or file output.
fn render_cards(output: &GenerationOutput, colour: bool) -> String {
    let mut out = String::new();
    let source = if output.stats.model_used {
        "model"
    } else {
        "rule-based"
    };
    let header = format!(
        "{} cards ({source}, {} ms)",
        output.stats.produced, output.stats.duration_ms
    );
    if colour {
        out.push_str(&format!("{} {}\n\n", cyan("◆"), bold(&header)));
    } else {
        out.push_str(&format!("{header}\n\n"));
    }

    for (index, card) in output.cards.iter().enumerate() {
        let number = index + 1;
        if colour {
            out.push_str(&format!(
                "{number:>2}. {} {}\n    {} {}\n\n",
                bold("Q:"),
                card.question,
                dim("A:"),
                card.answer
            ));
        } else {
            out.push_str(&format!(
                "{number:>2}. Q: {}\n    A: {}\n\n",
                card.question, card.answer
            ));
        }
    }
    out.trim_end().to_string()
}
