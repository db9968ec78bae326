// Aria Music Generator — CLI entry point.
//
// Generates a piece in one of the six styles and writes it to MIDI.
// The pipeline: engine construction → generation (melody + harmony merge)
// → MIDI output.
//
// Usage:
//   cargo run -p aria_music -- [output.mid] [--style NAME] [--tempo BPM]
//     [--duration SECS] [--seed N]
//
// Styles: ambient, classical, electronic, jazz, rock, cinematic

use aria_music::engine::MusicEngine;
use aria_music::midi::write_midi;
use aria_music::note::GenerationParameters;
use aria_music::style::MusicStyle;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse arguments
    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("output.mid");
    let style_name: String = parse_flag(&args, "--style").unwrap_or_else(|| "classical".to_string());
    let tempo: f64 = parse_flag(&args, "--tempo").unwrap_or(120.0);
    let duration: f64 = parse_flag(&args, "--duration").unwrap_or(30.0);
    let seed: Option<u64> = parse_flag(&args, "--seed");

    let style = match MusicStyle::from_name(&style_name) {
        Some(style) => style,
        None => {
            eprintln!("Unknown style '{}'. Using classical.", style_name);
            MusicStyle::Classical
        }
    };

    println!("=== Aria Music Generator ===");
    println!("Output: {}", output_path);
    println!("Style: {}", style.name());
    println!("Tempo: {} BPM", tempo);
    println!("Duration: {} s", duration);
    if let Some(s) = seed {
        println!("Seed: {}", s);
    }
    println!();

    println!("[1/3] Building engine...");
    let engine = match seed {
        Some(s) => MusicEngine::with_seed(s),
        None => MusicEngine::new(),
    };

    println!("[2/3] Generating...");
    let params = GenerationParameters::new(style, tempo, duration);
    let notes = match engine.generate(&params) {
        Ok(notes) => notes,
        Err(e) => {
            eprintln!("  Generation failed: {}", e);
            std::process::exit(1);
        }
    };
    println!("  {} notes generated.", notes.len());
    if let (Some(first), Some(last)) = (notes.first(), notes.last()) {
        println!(
            "  First note {} at {:.2} s, last note {} at {:.2} s.",
            first.name(),
            first.start_time,
            last.name(),
            last.start_time
        );
    }

    println!("[3/3] Writing MIDI to {}...", output_path);
    match write_midi(&notes, tempo, Path::new(output_path)) {
        Ok(()) => println!("  Done!"),
        Err(e) => {
            eprintln!("  Error writing MIDI: {}", e);
            std::process::exit(1);
        }
    }

    println!();
    println!("Play with: timidity {} (or any MIDI player)", output_path);
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
