/// Source survey — reads code and writes poetry about what it sees.
///
/// Feature extraction is a lexical pass: keyword tokens are counted and
/// definition lines are scanned for names. Nothing is parsed properly;
/// the poems only need counts and a few names.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::lexicon::Lexicon;
use crate::core::template::{draw, TemplateError};

/// Poetic vocabulary for code constructs.
const FUNCTION_LINES: &[&str] = &[
    "a ritual begins",
    "an invocation",
    "a named becoming",
    "a process awakens",
    "instructions gather",
];

const TYPE_LINES: &[&str] = &[
    "a blueprint forms",
    "a type emerges",
    "a category of being",
    "a template for existence",
    "a mold for instances",
];

const LOOP_LINES: &[&str] = &[
    "repetition unfolds",
    "the cycle turns",
    "again and again",
    "iteration's dance",
    "the wheel spins",
];

const CONDITIONAL_LINES: &[&str] = &[
    "a choice point",
    "the path divides",
    "if this then that",
    "decision crystallizes",
    "branches diverge",
];

const IMPORT_LINES: &[&str] = &[
    "dependencies arrive",
    "borrowed power",
    "other code joins",
    "connections form",
    "knowledge imported",
];

const COMMENT_LINES: &[&str] = &[
    "the author whispers",
    "marginalia",
    "a note to the future",
    "explanation offered",
    "context given",
];

const STRUCTURAL_LINES: &[&str] = &[
    "indentation creates hierarchy",
    "whitespace breathes between statements",
    "the code flows downward",
    "nesting deepens like thought",
    "each line a step forward",
];

const META_LINES: &[&str] = &[
    "this code will run",
    "electrons will flow",
    "logic will execute",
    "the machine will understand",
    "meaning becomes action",
];

/// The survey vocabulary as a lexicon.
pub fn lexicon() -> Lexicon {
    Lexicon::from_tables(&[
        ("function", FUNCTION_LINES),
        ("type", TYPE_LINES),
        ("loop", LOOP_LINES),
        ("conditional", CONDITIONAL_LINES),
        ("import", IMPORT_LINES),
        ("comment", COMMENT_LINES),
        ("structural", STRUCTURAL_LINES),
        ("meta", META_LINES),
    ])
}

/// Surface features extracted from a source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFeatures {
    pub functions: usize,
    pub types: usize,
    pub loops: usize,
    pub conditionals: usize,
    pub returns: usize,
    pub imports: usize,
    pub comments: usize,
    pub lines: usize,
    pub characters: usize,
    pub function_names: Vec<String>,
    pub type_names: Vec<String>,
}

/// Extract features from source text by lexical scanning.
pub fn analyze(source: &str) -> SourceFeatures {
    let mut features = SourceFeatures {
        lines: source.trim().lines().count(),
        characters: source.chars().count(),
        ..SourceFeatures::default()
    };

    // Keyword tokens, split on anything that cannot be part of an
    // identifier.
    for token in source.split(|c: char| !c.is_alphanumeric() && c != '_') {
        match token {
            "for" | "while" | "loop" => features.loops += 1,
            "if" | "match" => features.conditionals += 1,
            "return" => features.returns += 1,
            _ => {}
        }
    }

    // Definition and comment lines.
    for line in source.lines() {
        let trimmed = strip_modifiers(line.trim());

        if trimmed.starts_with("//") {
            features.comments += 1;
            continue;
        }
        if line.contains("//") {
            features.comments += 1;
        }

        if trimmed.starts_with("use ") || trimmed.starts_with("mod ") {
            features.imports += 1;
        } else if let Some(rest) = trimmed.strip_prefix("fn ") {
            features.functions += 1;
            if let Some(name) = leading_identifier(rest) {
                features.function_names.push(name);
            }
        } else if let Some(rest) = trimmed
            .strip_prefix("struct ")
            .or_else(|| trimmed.strip_prefix("enum "))
            .or_else(|| trimmed.strip_prefix("trait "))
        {
            features.types += 1;
            if let Some(name) = leading_identifier(rest) {
                features.type_names.push(name);
            }
        }
    }

    features
}

/// Strip leading visibility and async/const/unsafe modifiers so that
/// `pub async fn watch` scans the same as `fn watch`.
fn strip_modifiers(line: &str) -> &str {
    let mut rest = line;
    loop {
        let before = rest;
        if let Some(after) = rest.strip_prefix("pub(") {
            // pub(crate), pub(super), pub(in ...)
            match after.find(')') {
                Some(close) => rest = after[close + 1..].trim_start(),
                None => return rest,
            }
        } else if let Some(after) = rest.strip_prefix("pub ") {
            rest = after.trim_start();
        }
        for modifier in ["async ", "const ", "unsafe "] {
            if let Some(after) = rest.strip_prefix(modifier) {
                rest = after.trim_start();
            }
        }
        if rest == before {
            return rest;
        }
    }
}

/// The identifier at the head of `rest`, if any.
fn leading_identifier(rest: &str) -> Option<String> {
    let name: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Turn a code name into poetic language: split snake_case and camelCase,
/// lowercase everything.
pub fn poeticize(name: &str) -> String {
    let mut out = String::new();
    let mut prev_lower = false;
    for c in name.chars() {
        if c == '_' {
            out.push(' ');
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = c.is_lowercase() || c.is_numeric();
        out.extend(c.to_lowercase());
    }
    out
}

/// Generate a multi-stanza poem about a file.
pub fn poem(
    filename: &str,
    features: &SourceFeatures,
    lex: &Lexicon,
    rng: &mut StdRng,
) -> Result<String, TemplateError> {
    let mut lines = Vec::new();

    let title = format!("poem for {}", filename);
    let underline = "=".repeat(title.len());
    lines.push(title);
    lines.push(underline);
    lines.push(String::new());

    lines.push(format!("a file of {} lines", features.lines));
    lines.push(format!("{} characters of intent", features.characters));
    lines.push(String::new());

    if features.functions > 0 {
        lines.push(format!("{} functions defined:", features.functions));
        for name in features.function_names.iter().take(3) {
            lines.push(format!("  {}", draw(lex, "function", rng)?));
            lines.push(format!("  named '{}'", poeticize(name)));
        }
        if features.functions > 3 {
            lines.push(format!("  and {} more...", features.functions - 3));
        }
        lines.push(String::new());
    }

    if features.types > 0 {
        lines.push(format!("{} types emerge:", features.types));
        for name in features.type_names.iter().take(2) {
            lines.push(format!("  {}", draw(lex, "type", rng)?));
            lines.push(format!("  called {}", poeticize(name)));
        }
        lines.push(String::new());
    }

    if features.loops > 0 || features.conditionals > 0 {
        lines.push("the flow of logic:".to_string());
        if features.loops > 0 {
            lines.push(format!(
                "  {} loops - {}",
                features.loops,
                draw(lex, "loop", rng)?
            ));
        }
        if features.conditionals > 0 {
            lines.push(format!(
                "  {} conditions - {}",
                features.conditionals,
                draw(lex, "conditional", rng)?
            ));
        }
        lines.push(String::new());
    }

    if features.imports > 0 {
        lines.push(format!("{} imports:", features.imports));
        lines.push(format!("  {}", draw(lex, "import", rng)?));
        lines.push(String::new());
    }

    if features.comments > 0 {
        lines.push(format!(
            "{} moments where {}",
            features.comments,
            draw(lex, "comment", rng)?
        ));
        lines.push(String::new());
    }

    lines.push(draw(lex, "structural", rng)?.to_string());
    lines.push(draw(lex, "meta", rng)?.to_string());

    Ok(lines.join("\n"))
}

/// Generate a haiku about a file, seeded with its features.
pub fn haiku(file_stem: &str, features: &SourceFeatures, rng: &mut StdRng) -> String {
    let line1_options = [
        format!("{} functions wait", features.functions),
        format!("code of {} lines", features.lines),
        format!("in {}'s depths", file_stem),
        "logic encoded".to_string(),
        "instructions rest here".to_string(),
    ];

    let line2_options = [
        "loops and conditions intertwine".to_string(),
        "meaning flows through syntax".to_string(),
        "the machine will understand".to_string(),
        "patterns emerge from structure".to_string(),
        format!("{} characters of thought", features.characters),
    ];

    let line3_options = [
        "execution waits",
        "purpose crystallized",
        "ready to become",
        "code becomes action",
        "electrons will flow",
    ];

    format!(
        "{}\n{}\n{}",
        line1_options
            .choose(rng)
            .map(String::as_str)
            .unwrap_or("logic encoded"),
        line2_options
            .choose(rng)
            .map(String::as_str)
            .unwrap_or("meaning flows through syntax"),
        line3_options.choose(rng).copied().unwrap_or("execution waits"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const SAMPLE: &str = r#"
//! a module that watches itself

use std::collections::HashMap;
use std::fmt;

// the ledger of moments
pub struct MomentLedger {
    entries: HashMap<String, u64>,
}

enum Pulse {
    Steady,
    Racing,
}

impl MomentLedger {
    pub fn record_moment(&mut self, name: &str) {
        // each arrival counted
        if let Some(count) = self.entries.get_mut(name) {
            *count += 1;
            return;
        }
        self.entries.insert(name.to_string(), 1);
    }

    fn drain(&mut self) -> u64 {
        let mut total = 0;
        for (_, count) in self.entries.drain() {
            total += count;
        }
        total
    }
}
"#;

    #[test]
    fn analyze_counts_definitions() {
        let features = analyze(SAMPLE);
        assert_eq!(features.functions, 2);
        assert_eq!(features.types, 2);
        assert_eq!(features.imports, 2);
        assert_eq!(features.function_names, vec!["record_moment", "drain"]);
        assert_eq!(features.type_names, vec!["MomentLedger", "Pulse"]);
    }

    #[test]
    fn analyze_counts_keywords() {
        let features = analyze(SAMPLE);
        assert!(features.loops >= 1);
        assert!(features.conditionals >= 1);
        assert_eq!(features.returns, 1);
        assert!(features.comments >= 2);
        assert!(features.lines > 10);
        assert!(features.characters > 100);
    }

    #[test]
    fn analyze_empty_source() {
        let features = analyze("");
        assert_eq!(features, SourceFeatures::default());
    }

    #[test]
    fn poeticize_splits_cases() {
        assert_eq!(poeticize("record_moment"), "record moment");
        assert_eq!(poeticize("MomentLedger"), "moment ledger");
        assert_eq!(poeticize("momentLedger2"), "moment ledger2");
    }

    #[test]
    fn poem_reports_counts() {
        let features = analyze(SAMPLE);
        let lex = lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let poem = poem("ledger.rs", &features, &lex, &mut rng).unwrap();

        let poem_lines: Vec<&str> = poem.lines().collect();
        assert_eq!(poem_lines[0], "poem for ledger.rs");
        assert_eq!(poem_lines[1], "=".repeat(poem_lines[0].len()));
        assert!(poem.contains("2 functions defined:"));
        assert!(poem.contains("named 'record moment'"));
        assert!(poem.contains("2 types emerge:"));
        assert!(poem.contains("called moment ledger"));
        assert!(poem.contains("the flow of logic:"));
    }

    #[test]
    fn poem_skips_absent_stanzas() {
        let features = analyze("let x = 1;\n");
        let lex = lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let poem = poem("tiny.rs", &features, &lex, &mut rng).unwrap();
        assert!(!poem.contains("functions defined"));
        assert!(!poem.contains("types emerge"));
        assert!(!poem.contains("imports:"));
    }

    #[test]
    fn haiku_three_lines() {
        let features = analyze(SAMPLE);
        let mut rng = StdRng::seed_from_u64(42);
        let h = haiku("ledger", &features, &mut rng);
        assert_eq!(h.lines().count(), 3);
    }

    #[test]
    fn deterministic_with_seed() {
        let features = analyze(SAMPLE);
        let lex = lexicon();
        let mut rng1 = StdRng::seed_from_u64(3);
        let mut rng2 = StdRng::seed_from_u64(3);
        assert_eq!(
            poem("a.rs", &features, &lex, &mut rng1).unwrap(),
            poem("a.rs", &features, &lex, &mut rng2).unwrap()
        );
    }
}
