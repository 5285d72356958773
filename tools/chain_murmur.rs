/// chain_murmur — signals from the chain state.
///
/// Reads the infinite-chain state blob and produces murmurs about
/// iteration, progress, and ideas. The chain speaks through murmur.
///
/// Usage: chain_murmur [--full] [--count <n>] [--iteration] [--streak]
///                     [--ideas] [--state <path>] [--seed <n>]

use murmur_engine::chain::signal::{self, SignalKind};
use murmur_engine::chain::state::{self, ChainState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut seed: Option<u64> = None;
    let mut state_path: Option<PathBuf> = None;
    extract_flag_value(&mut args, "--seed", |v| {
        if let Ok(n) = v.parse() {
            seed = Some(n);
        }
    });
    extract_flag_value(&mut args, "--state", |v| state_path = Some(PathBuf::from(v)));

    let loaded = match state_path.or_else(state::default_path) {
        Some(path) => state::load(&path),
        None => None,
    };

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    if args.is_empty() {
        print_lines(signal::batch(loaded.as_ref(), 3, &mut rng));
        return;
    }

    match args[0].as_str() {
        "--full" => match signal::full_status(loaded.as_ref(), &mut rng) {
            Ok(status) => println!("{}", status),
            Err(e) => eprintln!("generation failed: {}", e),
        },
        "--count" => {
            let count = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(5);
            print_lines(signal::batch(loaded.as_ref(), count, &mut rng));
        }
        "--iteration" | "--streak" | "--ideas" => {
            // Single-kind queries format even without state; absent fields
            // read as zero.
            let kind = args[0].trim_start_matches("--");
            let kind = SignalKind::parse(kind).unwrap_or(SignalKind::Iteration);
            let state = loaded.unwrap_or_else(ChainState::default);
            match signal::signal(kind, &state, &mut rng) {
                Ok(murmur) => println!("{}", murmur),
                Err(e) => eprintln!("generation failed: {}", e),
            }
        }
        _ => print_usage(),
    }
}

fn print_lines(result: Result<Vec<String>, murmur_engine::core::template::TemplateError>) {
    match result {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => eprintln!("generation failed: {}", e),
    }
}

/// Remove `flag <value>` from the argument list, handing the value to
/// `apply` when present.
fn extract_flag_value<F: FnMut(&str)>(args: &mut Vec<String>, flag: &str, mut apply: F) {
    while let Some(pos) = args.iter().position(|a| a == flag) {
        if pos + 1 < args.len() {
            let value = args.remove(pos + 1);
            apply(&value);
        }
        args.remove(pos);
    }
}

fn print_usage() {
    println!("chain_murmur - signals from the chain state");
    println!();
    println!("usage:");
    println!("  chain_murmur                3 random murmurs");
    println!("  chain_murmur --full         complete status");
    println!("  chain_murmur --count <n>    n random murmurs");
    println!("  chain_murmur --iteration    about iteration");
    println!("  chain_murmur --streak       about streak");
    println!("  chain_murmur --ideas        about ideas");
    println!("  chain_murmur --state <path> read state from path");
    println!("  chain_murmur --seed <n>     deterministic output");
}
