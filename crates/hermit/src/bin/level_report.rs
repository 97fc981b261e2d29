//! # Level Report
//!
//! Builds one level against a recording factory and prints what was placed.
//!
//! ## Usage
//!
//! ```bash
//! # Default tuning, seed from the config defaults
//! ./level_report
//!
//! # Tuning from a file, seed overridden on the command line
//! ./level_report configs/level.toml --seed 42
//! ```
//!
//! The build is driven tick by tick exactly as a game host would drive it,
//! so the tick count shows how many frames the level takes to appear.

use clap::Parser;
use hermit_procedural::{
    LevelConfigFile, LevelGenerator, PlacementKind, RecordingFactory, SeedSettings, TickOutcome,
};

use std::path::PathBuf;
use std::process;

/// Command line options.
#[derive(Parser, Debug)]
#[command(name = "level_report", version, about = "Builds one level and prints what was placed")]
struct Cli {
    /// TOML tuning file. Built-in defaults when omitted.
    config: Option<PathBuf>,
    /// Seed override, replaces the `[seed]` table of the config.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let cli = Cli::parse();

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    HERMIT LEVEL REPORT v0.1.0");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();

    // === CONFIG ===
    let mut file = match &cli.config {
        Some(path) => {
            println!("📄 Loading config from {} ...", path.display());
            match LevelConfigFile::from_toml_file(path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("   ✗ FATAL: {e}");
                    process::exit(1);
                }
            }
        }
        None => {
            println!("📄 Using default config");
            LevelConfigFile::default()
        }
    };
    if let Some(seed) = cli.seed {
        file.seed = SeedSettings::fixed(seed);
    }

    // === BUILD ===
    let mut factory = RecordingFactory::new();
    let mut generator = LevelGenerator::from_file(file);

    let seed = match generator.generate_level(&mut factory) {
        Ok(seed) => seed,
        Err(e) => {
            eprintln!("   ✗ FATAL: {e}");
            process::exit(1);
        }
    };
    println!("   ✓ Seed {}", seed.value());

    let mut ticks = 1u32;
    while generator.tick(&mut factory) == TickOutcome::InProgress {
        ticks += 1;
    }

    let Some(level) = generator.take_result() else {
        eprintln!("   ✗ FATAL: build did not complete");
        process::exit(1);
    };

    // === REPORT ===
    let report = &level.report;
    println!("   ✓ Built in {ticks} ticks");
    println!();
    println!("  Anchors:    {}", report.anchors);
    println!("  Requested:  {}", report.requested);
    println!("  Created:    {}", report.created);
    println!();
    println!("  Per kind:");
    for (kind, count) in &report.per_kind {
        println!("    {:<18} {count}", kind.to_string());
    }

    println!();
    for (label, handle) in [("Spawn", level.spawn_marker), ("Victory", level.victory_marker)] {
        match handle.and_then(|h| factory.resolve(h)) {
            Some(marker) => println!(
                "  {label:<8} ({:.2}, {:.2})",
                marker.position.x, marker.position.y
            ),
            None => println!("  {label:<8} not placed"),
        }
    }

    let floors = report.count(PlacementKind::Floor);
    let hazards = report
        .per_kind
        .iter()
        .filter(|(kind, _)| kind.is_hazard_or_encounter())
        .map(|(_, count)| count)
        .sum::<usize>();
    println!();
    println!("  Floor tiles: {floors}, hazards and encounters: {hazards}");

    if !report.warnings.is_empty() {
        println!();
        println!("  Warnings:");
        for warning in &report.warnings {
            println!("    ⚠ {warning}");
        }
    }
}
