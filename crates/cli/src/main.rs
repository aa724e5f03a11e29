//! CLI entry point that writes the LN Portal manual deck.

use anyhow::{Context, Result};
use clap::Parser;
use deck_manual::DeckAssembler;
use std::path::Path;

/// Generate the LN Portal user manual (.pptx) in the current directory.
///
/// Screenshots are read from ./guide-screenshots when present.
#[derive(Parser, Debug)]
#[command(name = "manual-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
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

    let base_dir = std::env::current_dir().context("Failed to resolve working directory")?;
    let assembler = DeckAssembler::new(&base_dir);

    let output_path = assembler
        .run()
        .with_context(|| format!("Failed to write {}", assembler.output_path().display()))?;

    if args.verbose {
        report(&output_path)?;
    }

    let display_path = output_path
        .strip_prefix(&base_dir)
        .unwrap_or(&output_path);
    println!("✓ PowerPoint作成完了: {}", display_path.display());

    Ok(())
}

/// Read the written deck back and log what ended up on each slide.
fn report(path: &Path) -> Result<()> {
    let outline = deck_pptx::PptxReader::new()
        .open(path)
        .with_context(|| format!("Failed to read back {}", path.display()))?;

    for slide in &outline.slides {
        log::debug!(
            "  slide {}: {} ({} text boxes, {} pictures)",
            slide.number,
            slide.title.as_deref().unwrap_or("-"),
            slide.text_boxes,
            slide.pictures
        );
    }
    eprintln!(
        "  {} slides, {} screenshots",
        outline.slide_count(),
        outline.picture_count()
    );
    Ok(())
}
