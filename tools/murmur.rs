/// murmur — small signals from undefined coordinates.
///
/// Usage: murmur [count] [--json] [--seed <n>] [--lexicon <path>]

use murmur_engine::core::lexicon::Lexicon;
use murmur_engine::core::report::Report;
use murmur_engine::forms::murmur;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut count: usize = 1;
    let mut as_json = false;
    let mut seed: Option<u64> = None;
    let mut pack: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => as_json = true,
            "--help" => {
                print_usage();
                return;
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                if let Ok(n) = args[i].parse() {
                    seed = Some(n);
                }
            }
            "--lexicon" if i + 1 < args.len() => {
                i += 1;
                pack = Some(args[i].clone());
            }
            other => {
                // A bare count; anything unparsable is ignored.
                if let Ok(n) = other.parse() {
                    count = n;
                }
            }
        }
        i += 1;
    }

    let mut lex = murmur::lexicon();
    if let Some(ref path) = pack {
        match Lexicon::load_from_ron(Path::new(path)) {
            Ok(extra) => lex.merge(extra),
            Err(e) => eprintln!("could not load lexicon pack {}: {}", path, e),
        }
    }

    let mut rng = rng_from(seed);
    let murmurs = match murmur::murmurs(&lex, count, &mut rng) {
        Ok(murmurs) => murmurs,
        Err(e) => {
            eprintln!("generation failed: {}", e);
            return;
        }
    };

    if as_json {
        let report = Report::new("murmur", seed, murmurs);
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("could not encode report: {}", e),
        }
    } else {
        for m in &murmurs {
            println!("{}", m);
        }
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn print_usage() {
    println!("murmur - small signals from undefined coordinates");
    println!();
    println!("usage:");
    println!("  murmur [count]           generate count murmurs (default: 1)");
    println!("  murmur --json            JSON output");
    println!("  murmur --seed <n>        deterministic output");
    println!("  murmur --lexicon <path>  overlay a RON lexicon pack");
    println!("  murmur --help            this help");
}
