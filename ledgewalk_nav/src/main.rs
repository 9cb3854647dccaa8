// CLI entry point for the offline path builder.
//
// Loads a level from JSON, builds its navigation graph, prints the build
// summary and optionally writes the committed graph as JSON. Exits with
// status 1 on any failure. A graph that exceeds capacity also gets a hint
// about what to change.
//
// Usage:
//   navbuild <LEVEL.json> [OPTIONS]
//     --config <FILE>   NavConfig JSON (default: built-in defaults)
//     --out <FILE>      Write the built graph here as JSON
//
// Set `RUST_LOG=debug` to see per-stage progress.

use std::path::PathBuf;

use ledgewalk_nav::{Level, LogProgress, NavConfig, build_paths};

struct Args {
    level: PathBuf,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = parse_args();
    if let Err(e) = run(&args) {
        eprintln!("navbuild: {e}");
        if e.is_capacity() {
            eprintln!("navbuild: simplify the level geometry or raise the capacity in --config");
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> ledgewalk_nav::Result<()> {
    let mut level = Level::from_json(&std::fs::read_to_string(&args.level)?)?;
    let config = match &args.config {
        Some(path) => NavConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => NavConfig::default(),
    };

    let stats = build_paths(&mut level, &config, &mut LogProgress::default())?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    if let (Some(out), Some(graph)) = (&args.out, &level.navigator) {
        std::fs::write(out, serde_json::to_string_pretty(graph)?)?;
        println!("Graph written to {}", out.display());
    }
    Ok(())
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut level = None;
    let mut config = None;
    let mut out = None;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--config requires a file path");
                    std::process::exit(1);
                }));
            }
            "--out" => {
                i += 1;
                out = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--out requires a file path");
                    std::process::exit(1);
                }));
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
            path if level.is_none() => level = Some(PathBuf::from(path)),
            extra => {
                eprintln!("Unexpected argument: {extra}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(level) = level else {
        print_usage();
        std::process::exit(1);
    };
    Args { level, config, out }
}

fn print_usage() {
    println!("Usage: navbuild <LEVEL.json> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <FILE>   NavConfig JSON (default: built-in defaults)");
    println!("  --out <FILE>      Write the built graph here as JSON");
    println!("  --help, -h        Show this help");
}
