//! Draw-economy simulator CLI.
//!
//! Run Monte Carlo simulations to check hit rates and cashout strategies.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                         # Default: 1000 runs x 500 draws
//!   cargo run --bin simulate -- -n 100 -d 2000       # 100 runs of 2000 draws
//!   cargo run --bin simulate -- --seed 42            # Reproducible run
//!   cargo run --bin simulate -- --cashout-at 100     # Greedier cashout threshold

use nftuklas::loot::Variant;
use nftuklas::simulator::{run_simulation, SimConfig};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);
    init_tracing(config.verbosity);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              NFTUKLAS DRAW SIMULATOR                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Variant:        {}", config.variant.name());
    println!("  Runs:           {}", config.num_runs);
    println!("  Draws per Run:  {}", config.draws_per_run);
    if config.variant.has_run_mechanic() {
        println!("  Cashout At:     {}", config.cashout_at);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write {}: {}", filename, e);
                std::process::exit(1);
            }
        }
    }
}

/// Simulator logs go to stderr so they never mix with the report.
fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "error",
        1 => "warn",
        _ => "info",
    };
    let filter =
        EnvFilter::try_from_env("NFTUKLAS_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-d" | "--draws" => {
                if i + 1 < args.len() {
                    config.draws_per_run = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--variant" => {
                if i + 1 < args.len() {
                    match Variant::parse(&args[i + 1]) {
                        Some(variant) => config.variant = variant,
                        None => {
                            eprintln!(
                                "Unknown variant '{}' (expected basic, collector or prospect)",
                                args[i + 1]
                            );
                            std::process::exit(2);
                        }
                    }
                    i += 1;
                }
            }
            "--cashout-at" => {
                if i + 1 < args.len() {
                    config.cashout_at = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--seconds-per-draw" => {
                if i + 1 < args.len() {
                    if let Ok(secs) = args[i + 1].parse::<f64>() {
                        config.seconds_per_draw = secs.max(0.0);
                    }
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--frequency" => {
                config = SimConfig::frequency_check(config.variant);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("NFTuklas Draw Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>            Number of simulated sessions (default: 1000)");
    println!("    -d, --draws <D>           Draws per session (default: 500)");
    println!("    -s, --seed <S>            Random seed for reproducibility");
    println!("    --variant <V>             basic, collector or prospect (default: prospect)");
    println!("    --cashout-at <C>          Cash out when run currency reaches C (default: 50)");
    println!("    --seconds-per-draw <T>    Simulated seconds per draw for regen (default: 3)");
    println!("    --frequency               Long runs for hit-rate checks");
    println!("    -v, --verbose             Log every run");
    println!("    -q, --quiet               Suppress warnings");
    println!("    --json                    Save JSON report");
    println!("    -h, --help                Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                          # Default run");
    println!("    cargo run --bin simulate -- -n 100 -d 2000       # Longer sessions");
    println!("    cargo run --bin simulate -- --seed 42            # Reproducible");
    println!("    cargo run --bin simulate -- --variant collector  # No bombs");
}
