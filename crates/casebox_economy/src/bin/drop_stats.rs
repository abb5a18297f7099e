//! # Drop Statistics
//!
//! Command-line tool that rolls each weighting table many times and compares
//! the observed rarity distribution against the configured odds.

use casebox_economy::{CaseCategory, EconomyConfig, RewardEngine};
use casebox_shared::Rarity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DEFAULT_SAMPLES: u64 = 100_000;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         CASEBOX DROP STATISTICS                                  ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("Usage: drop_stats [samples] [--seed <n>] [--config <economy.toml>]");
        println!();
        println!("Options:");
        println!("  --seed <n>       Fixed RNG seed (default: OS entropy)");
        println!("  --config <path>  Load weighting tables from a TOML file");
        return;
    }

    let option = |name: &str| {
        args.iter()
            .position(|a| a == name)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };

    let samples = args
        .get(1)
        .filter(|a| !a.starts_with("--"))
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SAMPLES);
    let seed: Option<u64> = option("--seed").and_then(|s| s.parse().ok());

    let config = match option("--config") {
        Some(path) => match EconomyConfig::from_toml_file(&path) {
            Ok(c) => {
                println!("Loaded config: {path}");
                c
            }
            Err(e) => {
                println!("Error: {e}");
                return;
            }
        },
        None => EconomyConfig::default(),
    };

    let engine = match RewardEngine::new(config.rewards) {
        Ok(engine) => engine,
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };

    let mut rng = seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);

    println!("Samples per table: {samples}");
    match seed {
        Some(s) => println!("Seed:              {s}"),
        None => println!("Seed:              (entropy)"),
    }
    println!();

    for category in CaseCategory::ALL {
        let table = engine.table(category);
        let stats = engine.run_statistics(category, samples, &mut rng);

        println!(
            "┌─ {:<8} TABLE ─────────────────────────────────────────────────┐",
            category.as_str().to_uppercase()
        );
        println!("│ {:<10} {:>10} {:>12} {:>12} {:>10}", "RARITY", "HITS", "OBSERVED", "EXPECTED", "DELTA");
        for rarity in Rarity::ALL {
            let expected = table.weight(rarity);
            let observed = stats.percent(rarity);
            println!(
                "│ {:<10} {:>10} {:>11.4}% {:>11.4}% {:>+9.4}",
                rarity.as_str(),
                stats.count(rarity),
                observed,
                expected,
                observed - expected
            );
        }
        println!("└──────────────────────────────────────────────────────────────────┘");
        println!();
    }
}
