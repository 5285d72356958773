/// self_verse — poetry that references its own generation.
///
/// Combines the verse and murmur pools into poems that know how they
/// were made: generated text aware of its generation.
///
/// Usage: self_verse [--meta] [--recursive [depth]] [--log] [--hybrid]
///                   [--all] [--json] [--seed <n>]

use murmur_engine::core::template::TemplateError;
use murmur_engine::forms::reflect::{self, HaikuCard};
use murmur_engine::forms::{murmur, verse};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut seed: Option<u64> = None;
    extract_flag_value(&mut args, "--seed", |v| {
        if let Ok(n) = v.parse() {
            seed = Some(n);
        }
    });

    let murmur_lex = murmur::lexicon();
    let verse_lex = verse::lexicon();
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    if args.is_empty() {
        present_card(reflect::self_aware_haiku(&verse_lex, &mut rng), false);
        return;
    }

    match args[0].as_str() {
        "--json" => {
            present_card(reflect::self_aware_haiku(&verse_lex, &mut rng), true);
        }
        "--meta" => {
            println!("=== meta-poem ===");
            println!();
            report(reflect::meta_poem(&murmur_lex, &mut rng));
        }
        "--recursive" => {
            let depth = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(3);
            println!("=== recursive verse ===");
            println!();
            report(reflect::recursive_verse(&verse_lex, depth, &mut rng));
        }
        "--log" => {
            println!("=== generation log ===");
            println!();
            report(reflect::generation_log(&murmur_lex, &mut rng));
        }
        "--hybrid" => {
            println!("=== murmur-verse hybrid ===");
            println!();
            report(reflect::hybrid(&murmur_lex, &verse_lex, &mut rng));
        }
        "--all" => {
            present_card(reflect::self_aware_haiku(&verse_lex, &mut rng), false);
            divider();
            println!("=== meta-poem ===");
            println!();
            report(reflect::meta_poem(&murmur_lex, &mut rng));
            divider();
            println!("=== recursive verse ===");
            println!();
            report(reflect::recursive_verse(&verse_lex, 3, &mut rng));
            divider();
            println!("=== generation log ===");
            println!();
            report(reflect::generation_log(&murmur_lex, &mut rng));
            divider();
            println!("=== hybrid ===");
            println!();
            report(reflect::hybrid(&murmur_lex, &verse_lex, &mut rng));
        }
        _ => print_usage(),
    }
}

fn present_card(result: Result<HaikuCard, TemplateError>, as_json: bool) {
    let card = match result {
        Ok(card) => card,
        Err(e) => {
            eprintln!("generation failed: {}", e);
            return;
        }
    };

    if as_json {
        match serde_json::to_string_pretty(&card) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("could not encode card: {}", e),
        }
        return;
    }

    println!("=== self-aware haiku ===");
    println!();
    println!("{}", card.poem);
    println!();
    println!("--- metadata ---");
    println!("fingerprint: {}", card.fingerprint);
    println!("generated: {}", card.generated_at);
    println!("probability: {}", card.probability);
    println!();
    for source in &card.line_sources {
        println!("  {}", source);
    }
    println!();
    println!("{}", card.self_reference);
}

fn report(result: Result<String, TemplateError>) {
    match result {
        Ok(poem) => println!("{}", poem),
        Err(e) => eprintln!("generation failed: {}", e),
    }
}

fn divider() {
    println!();
    println!("{}", "-".repeat(40));
    println!();
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
    println!("self_verse - poetry that references its own generation");
    println!();
    println!("usage:");
    println!("  self_verse                   self-aware haiku");
    println!("  self_verse --json            self-aware haiku as JSON");
    println!("  self_verse --meta            poem describing its generation");
    println!("  self_verse --recursive [d]   nested self-reference");
    println!("  self_verse --log             generation as log file");
    println!("  self_verse --hybrid          murmur + verse merged");
    println!("  self_verse --all             all forms");
    println!("  self_verse --seed <n>        deterministic output");
}
