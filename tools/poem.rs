/// poem — generate code-shaped poems.
///
/// Where syntax meets verse: brackets hold meaning, the compiler reads
/// and weeps.
///
/// Usage: poem [--function|--type|--import|--loop] [-n <count>] [--seed <n>]

use murmur_engine::forms::codeshape::{self, PoemStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut style: Option<PoemStyle> = None;
    let mut count: usize = 1;
    let mut seed: Option<u64> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" => {
                print_usage();
                return;
            }
            "-n" if i + 1 < args.len() => {
                i += 1;
                if let Ok(n) = args[i].parse() {
                    count = n;
                }
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                if let Ok(n) = args[i].parse() {
                    seed = Some(n);
                }
            }
            other => {
                let name = other.trim_start_matches("--");
                match PoemStyle::parse(name) {
                    Some(parsed) => style = Some(parsed),
                    None => {
                        println!("unknown style: {}", other);
                        println!("styles: --function, --type, --import, --loop");
                        return;
                    }
                }
            }
        }
        i += 1;
    }

    let lex = codeshape::lexicon();
    let set = match codeshape::template_set() {
        Ok(set) => set,
        Err(e) => {
            eprintln!("template tables are broken: {}", e);
            return;
        }
    };

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    for i in 0..count {
        if i > 0 {
            println!();
            println!("{}", "=".repeat(40));
            println!();
        }
        match codeshape::generate(style, &lex, &set, &mut rng) {
            Ok(poem) => {
                println!("{}", poem);
                println!();
                println!("{}", codeshape::attribution());
            }
            Err(e) => eprintln!("generation failed: {}", e),
        }
    }
}

fn print_usage() {
    println!("poem - generate code-shaped poems");
    println!();
    println!("usage:");
    println!("  poem               random poem style");
    println!("  poem --function    function-shaped");
    println!("  poem --type        type-shaped");
    println!("  poem --import      import-shaped");
    println!("  poem --loop        loop-shaped");
    println!("  poem -n <count>    generate multiple");
    println!("  poem --seed <n>    deterministic output");
}
