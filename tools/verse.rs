/// verse — code that writes poetry.
///
/// Haiku about computation, existence, observation; structured forms
/// emerging from random combination.
///
/// Usage: verse [--haiku|-h [n]] [--free|-f [n]] [--concrete|-c] [--all]
///              [--seed <n>] [--lexicon <path>]

use murmur_engine::core::lexicon::Lexicon;
use murmur_engine::core::template::TemplateError;
use murmur_engine::forms::verse;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut seed: Option<u64> = None;
    let mut pack: Option<String> = None;
    extract_flag_value(&mut args, "--seed", |v| {
        if let Ok(n) = v.parse() {
            seed = Some(n);
        }
    });
    extract_flag_value(&mut args, "--lexicon", |v| pack = Some(v.to_string()));

    let mut lex = verse::lexicon();
    if let Some(ref path) = pack {
        match Lexicon::load_from_ron(Path::new(path)) {
            Ok(extra) => lex.merge(extra),
            Err(e) => eprintln!("could not load lexicon pack {}: {}", path, e),
        }
    }

    let mut rng = rng_from(seed);

    if args.is_empty() {
        // default: haiku
        report(verse::haiku(&lex, &mut rng));
        return;
    }

    match args[0].as_str() {
        "--haiku" | "-h" => {
            let count = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(1);
            for i in 0..count {
                report(verse::haiku(&lex, &mut rng));
                if i < count - 1 {
                    println!();
                }
            }
        }
        "--free" | "-f" => {
            let lines = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(7);
            report(verse::free_verse(&lex, lines, &mut rng));
        }
        "--concrete" | "-c" => {
            println!("{}", verse::concrete_poem(&mut rng));
        }
        "--all" => {
            println!("=== haiku ===");
            report(verse::haiku(&lex, &mut rng));
            println!();
            println!("=== free verse ===");
            report(verse::free_verse(&lex, 5, &mut rng));
            println!();
            println!("=== concrete ===");
            println!("{}", verse::concrete_poem(&mut rng));
        }
        _ => {
            print_usage();
        }
    }
}

fn report(result: Result<String, TemplateError>) {
    match result {
        Ok(poem) => println!("{}", poem),
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

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn print_usage() {
    println!("verse - code that writes poetry");
    println!();
    println!("usage:");
    println!("  verse                  generate a haiku");
    println!("  verse -h [n]           n haiku");
    println!("  verse -f [n]           free verse, n lines");
    println!("  verse -c               concrete poem");
    println!("  verse --all            one of each");
    println!("  verse --seed <n>       deterministic output");
    println!("  verse --lexicon <path> overlay a RON lexicon pack");
}
