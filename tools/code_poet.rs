/// code_poet — writes poetry about the code it reads.
///
/// Give it a source file; it will read the code and write a poem about
/// what it sees.
///
/// Usage: code_poet <file> [--haiku] [--seed <n>]

use murmur_engine::forms::survey;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut file: Option<PathBuf> = None;
    let mut as_haiku = false;
    let mut seed: Option<u64> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--haiku" => as_haiku = true,
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
            other => {
                if file.is_none() {
                    file = Some(PathBuf::from(other));
                }
            }
        }
        i += 1;
    }

    let path = match file {
        Some(path) => path,
        None => {
            print_usage();
            return;
        }
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(_) => {
            println!("file not found: {}", path.display());
            return;
        }
    };

    let features = survey::analyze(&source);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    if as_haiku {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        println!("{}", survey::haiku(stem, &features, &mut rng));
    } else {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        match survey::poem(name, &features, &survey::lexicon(), &mut rng) {
            Ok(poem) => println!("{}", poem),
            Err(e) => eprintln!("generation failed: {}", e),
        }
    }
}

fn print_usage() {
    println!("code_poet - writes poetry about code");
    println!();
    println!("usage:");
    println!("  code_poet <file>          generate poem");
    println!("  code_poet <file> --haiku  generate haiku");
    println!("  code_poet --seed <n>      deterministic output");
    println!();
    println!("example:");
    println!("  code_poet src/lib.rs");
}
