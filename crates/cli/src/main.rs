//! CLI tool for generating the Taste Infrastructure presentation.

use anyhow::{Context, Result};
use clap::Parser;
use deck_core::{DeckAssembler, DeckContent};
use deck_pptx::{PptxParser, PptxWriter};
use std::path::{Path, PathBuf};

/// Default output file, written to the working directory.
const DEFAULT_OUTPUT: &str = "Taste_Infrastructure_W230.pptx";

/// Generate the Taste Infrastructure deck as a .pptx file.
#[derive(Parser, Debug)]
#[command(name = "build-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output .pptx file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// JSON file replacing the built-in deck text
    #[arg(short, long)]
    content: Option<PathBuf>,

    /// Print the built-in deck text as JSON and exit
    #[arg(long)]
    print_content: bool,

    /// Read the written file back and print each slide's structure
    #[arg(short, long)]
    summary: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if args.print_content {
        let content = DeckContent::builtin().context("Built-in deck content is invalid")?;
        println!("{}", content.to_json_pretty()?);
        return Ok(());
    }

    let content = load_content(args.content.as_deref())?;
    let deck = DeckAssembler::new().assemble(&content);
    log::debug!("Assembled {} slides", deck.slide_count());

    PptxWriter::new()
        .save(&deck, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if args.summary {
        let summary = PptxParser::new()
            .parse_file(&args.output)
            .with_context(|| format!("Failed to read back {}", args.output.display()))?;
        print!("{}", summary);
    }

    println!(
        "Presentation generated successfully: {}",
        args.output.display()
    );

    Ok(())
}

/// Load deck text from `path`, or the built-in text when no path is given.
fn load_content(path: Option<&Path>) -> Result<DeckContent> {
    match path {
        Some(path) => {
            log::debug!("Using deck content from {}", path.display());
            DeckContent::from_path(path)
                .with_context(|| format!("Failed to load deck content from {}", path.display()))
        }
        None => DeckContent::builtin().context("Built-in deck content is invalid"),
    }
}
