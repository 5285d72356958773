/// prompt — generate conversation prompts.
///
/// Seeds for conversation, starting points for creation.
///
/// Usage: prompt [n] [--creative|--code|--philosophy|--meta] [--list]
///               [--seed <n>] [--lexicon <path>]

use murmur_engine::core::lexicon::Lexicon;
use murmur_engine::core::template::TemplateError;
use murmur_engine::forms::prompt;
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

    let set = match prompt::template_set() {
        Ok(set) => set,
        Err(e) => {
            eprintln!("template tables are broken: {}", e);
            return;
        }
    };
    let mut lex = prompt::lexicon();
    if let Some(ref path) = pack {
        match Lexicon::load_from_ron(Path::new(path)) {
            Ok(extra) => lex.merge(extra),
            Err(e) => eprintln!("could not load lexicon pack {}: {}", path, e),
        }
    }

    let mut rng = rng_from(seed);

    if args.is_empty() {
        println!("prompt - generate conversation prompts");
        println!();
        match prompt::conversation_starter(&set, &lex, &mut rng) {
            Ok(starter) => println!("{}", starter),
            Err(e) => eprintln!("generation failed: {}", e),
        }
        return;
    }

    let cmd = args[0].as_str();

    if cmd == "--help" {
        print_usage();
    } else if cmd == "--list" {
        println!("categories:");
        for (name, count) in prompt::categories(&set) {
            println!("  --{}: {} templates", name, count);
        }
    } else if let Some(category) = cmd.strip_prefix("--") {
        match prompt::batch(&set, &lex, 3, Some(category), &mut rng) {
            Ok(prompts) => {
                for p in prompts {
                    println!("  {}", p);
                    println!();
                }
            }
            Err(TemplateError::UnknownGroup(_)) => {
                println!("unknown category: {}", category);
                let names: Vec<String> =
                    prompt::categories(&set).into_iter().map(|(n, _)| n).collect();
                println!("available: {}", names.join(", "));
            }
            Err(e) => eprintln!("generation failed: {}", e),
        }
    } else if let Ok(count) = cmd.parse::<usize>() {
        match prompt::batch(&set, &lex, count, None, &mut rng) {
            Ok(prompts) => {
                for p in prompts {
                    println!("  {}", p);
                    println!();
                }
            }
            Err(e) => eprintln!("generation failed: {}", e),
        }
    } else {
        // Treat the argument as a topic: pin a random fill pool to it and
        // generate around it.
        let topic = cmd.to_string();
        println!("prompt using '{}':", topic);

        let mut pool_names: Vec<String> = lex.pools.keys().cloned().collect();
        pool_names.sort_unstable();
        if let Some(name) = pick_name(&pool_names, &mut rng) {
            lex.insert(&name, vec![topic]);
        }

        match prompt::generate(&set, &lex, None, &mut rng) {
            Ok(p) => println!("  {}", p),
            Err(e) => eprintln!("generation failed: {}", e),
        }
    }
}

fn pick_name(names: &[String], rng: &mut StdRng) -> Option<String> {
    use rand::seq::SliceRandom;
    names.choose(rng).cloned()
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
    println!("prompt - generate conversation prompts");
    println!();
    println!("usage:");
    println!("  prompt                  one conversation starter");
    println!("  prompt <n>              generate n prompts");
    println!("  prompt --creative       creative prompts");
    println!("  prompt --code           code prompts");
    println!("  prompt --philosophy     philosophical prompts");
    println!("  prompt --meta           self-referential prompts");
    println!("  prompt --list           list categories");
    println!("  prompt <topic>          prompt built around a topic");
    println!("  prompt --seed <n>       deterministic output");
    println!("  prompt --lexicon <path> overlay a RON lexicon pack");
}
