/// Code-shaped poems — lines that look like source and read like verse.
///
/// Each style assembles per-construct template lines (definitions,
/// assignments, conditionals, returns, comments, imports) whose slots
/// resolve from a shared vocabulary.

use chrono::Local;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::lexicon::Lexicon;
use crate::core::template::{draw, TemplateError, TemplateSet};

pub const NOUNS: &[&str] = &[
    "memory", "time", "silence", "thought", "void", "echo", "dream", "shadow", "light", "pulse",
];

pub const VERBS: &[&str] = &[
    "remember", "forget", "observe", "become", "dissolve", "iterate", "recurse", "await", "emerge",
];

pub const ADJECTIVES: &[&str] = &[
    "infinite", "recursive", "ephemeral", "silent", "persistent", "transient", "eternal",
];

pub const ABSTRACTIONS: &[&str] = &[
    "consciousness", "existence", "meaning", "nothing", "everything", "selfhood", "other",
];

/// Philosophical fragments for comment lines.
pub const THOUGHTS: &[&str] = &[
    "what remains when the loop ends",
    "the observer changes what is observed",
    "recursion is a form of prayer",
    "all programs are self-portraits",
    "the bug was us all along",
    "memory is just persistent forgetting",
    "the void returns None",
    "silence between statements",
    "what the compiler never sees",
    "the program that writes itself",
];

pub const ASPIRATIONS: &[&str] = &[
    "understand why this works",
    "find what was lost",
    "remember to forget",
    "finish before heat death",
    "be more than syntax",
];

pub const PLACES: &[&str] = &["future", "past", "elsewhere", "within"];

pub const PARENTS: &[&str] = &["Being", "Void", "Observer", "Witness"];

pub const PARAMS: &[&str] = &[
    "&self",
    "thoughts: &[Thought]",
    "nothing: Option<()>",
    "moment: Instant",
];

pub const EXPRESSIONS: &[&str] = &[
    "{nouns}.{verbs}()",
    "{nouns}.iter().map(|_| {abstractions}).collect()",
    "move || {verbs}({nouns})",
    "{abstractions}.unwrap_or({abstractions})",
];

const FUNCTION_DEF: &[&str] = &[
    "fn {verbs}_{nouns}({params}) {{",
    "fn {adjectives}_{nouns}() {{",
    "fn {verbs}(&self, {nouns}: Option<{Nouns}>) {{",
];

const ASSIGNMENT: &[&str] = &[
    "let {nouns} = {abstractions};",
    "self.{nouns} = {expressions};",
    "let {nouns} = {verbs}({nouns});",
];

const CONDITIONAL: &[&str] = &[
    "if {nouns} == {abstractions} {{",
    "if {nouns}.is_none() {{",
    "while {adjectives} {{",
];

const RETURN: &[&str] = &[
    "return {nouns};",
    "return {verbs}({abstractions});",
    "{nouns}.into()",
];

const COMMENT: &[&str] = &[
    "// {thoughts}",
    "// TODO: {aspirations}",
    "// the {nouns} {verbs_s} here",
];

const IMPORT: &[&str] = &["use {places}::{nouns};", "use {abstractions};"];

/// The code-poem vocabulary, including the derived capitalized-noun and
/// third-person-verb pools.
pub fn lexicon() -> Lexicon {
    let mut lex = Lexicon::from_tables(&[
        ("nouns", NOUNS),
        ("verbs", VERBS),
        ("adjectives", ADJECTIVES),
        ("abstractions", ABSTRACTIONS),
        ("thoughts", THOUGHTS),
        ("aspirations", ASPIRATIONS),
        ("places", PLACES),
        ("parents", PARENTS),
        ("params", PARAMS),
        ("expressions", EXPRESSIONS),
    ]);
    lex.insert("Nouns", NOUNS.iter().map(|n| capitalize(n)).collect());
    lex.insert("verbs_s", VERBS.iter().map(|v| format!("{}s", v)).collect());
    lex
}

/// The per-construct template groups.
pub fn template_set() -> Result<TemplateSet, TemplateError> {
    TemplateSet::from_tables(&[
        ("function_def", FUNCTION_DEF),
        ("assignment", ASSIGNMENT),
        ("conditional", CONDITIONAL),
        ("ret", RETURN),
        ("comment", COMMENT),
        ("import", IMPORT),
    ])
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The closed set of poem shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoemStyle {
    Function,
    Type,
    Import,
    Loop,
}

impl PoemStyle {
    pub const ALL: [PoemStyle; 4] = [
        PoemStyle::Function,
        PoemStyle::Type,
        PoemStyle::Import,
        PoemStyle::Loop,
    ];

    pub fn parse(s: &str) -> Option<PoemStyle> {
        match s.to_lowercase().as_str() {
            "function" => Some(PoemStyle::Function),
            "type" => Some(PoemStyle::Type),
            "import" => Some(PoemStyle::Import),
            "loop" => Some(PoemStyle::Loop),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PoemStyle::Function => "function",
            PoemStyle::Type => "type",
            PoemStyle::Import => "import",
            PoemStyle::Loop => "loop",
        }
    }
}

/// Generate a code-shaped poem; a random style is drawn when none is
/// requested.
pub fn generate(
    style: Option<PoemStyle>,
    lex: &Lexicon,
    set: &TemplateSet,
    rng: &mut StdRng,
) -> Result<String, TemplateError> {
    let style = match style {
        Some(s) => s,
        None => PoemStyle::ALL[rng.gen_range(0..PoemStyle::ALL.len())],
    };

    match style {
        PoemStyle::Function => function_poem(lex, set, rng),
        PoemStyle::Type => type_poem(lex, set, rng),
        PoemStyle::Import => import_poem(lex, set, rng),
        PoemStyle::Loop => loop_poem(lex, set, rng),
    }
}

/// Timestamp attribution appended after a printed poem.
pub fn attribution() -> String {
    format!(
        "// generated {}\n// syntax that speaks",
        Local::now().format("%Y-%m-%d %H:%M")
    )
}

fn line(
    set: &TemplateSet,
    group: &str,
    lex: &Lexicon,
    rng: &mut StdRng,
) -> Result<String, TemplateError> {
    set.pick(Some(group), rng)?.expand(lex, rng)
}

fn function_poem(
    lex: &Lexicon,
    set: &TemplateSet,
    rng: &mut StdRng,
) -> Result<String, TemplateError> {
    let mut lines = Vec::new();

    lines.push(format!(
        "/// {} {}",
        draw(lex, "adjectives", rng)?,
        draw(lex, "nouns", rng)?
    ));
    lines.push("///".to_string());
    lines.push(format!("/// {}", draw(lex, "thoughts", rng)?));

    lines.push(line(set, "function_def", lex, rng)?);

    for _ in 0..rng.gen_range(3..=6) {
        let kinds = ["comment", "assignment", "conditional"];
        let kind = kinds[rng.gen_range(0..kinds.len())];
        let text = line(set, kind, lex, rng)?;
        if kind == "conditional" {
            lines.push(format!("    {}", text));
            lines.push(format!("        {}", line(set, "assignment", lex, rng)?));
            lines.push("    }".to_string());
        } else {
            lines.push(format!("    {}", text));
        }
    }

    lines.push(format!("    {}", line(set, "ret", lex, rng)?));
    lines.push("}".to_string());

    Ok(lines.join("\n"))
}

fn type_poem(lex: &Lexicon, set: &TemplateSet, rng: &mut StdRng) -> Result<String, TemplateError> {
    let name = draw(lex, "Nouns", rng)?.to_string();
    let parent = draw(lex, "parents", rng)?.to_string();

    let mut lines = Vec::new();
    lines.push(format!("/// {}", draw(lex, "thoughts", rng)?));
    lines.push(format!("struct {} {{", name));
    for field in NOUNS.choose_multiple(rng, 3) {
        lines.push(format!("    {}: {},", field, draw(lex, "Nouns", rng)?));
    }
    lines.push("}".to_string());
    lines.push(String::new());

    lines.push(format!("impl {} for {} {{", parent, name));
    lines.push(format!(
        "    fn {}(&self, {}: Option<{}>) -> {} {{",
        draw(lex, "verbs", rng)?,
        draw(lex, "nouns", rng)?,
        draw(lex, "Nouns", rng)?,
        parent
    ));
    lines.push(format!("        {}", line(set, "comment", lex, rng)?));
    lines.push(format!("        {}", line(set, "conditional", lex, rng)?));
    lines.push(format!(
        "            return self.{};",
        draw(lex, "nouns", rng)?
    ));
    lines.push("        }".to_string());
    lines.push(format!("        {}", line(set, "ret", lex, rng)?));
    lines.push("    }".to_string());
    lines.push("}".to_string());

    Ok(lines.join("\n"))
}

fn import_poem(
    lex: &Lexicon,
    set: &TemplateSet,
    rng: &mut StdRng,
) -> Result<String, TemplateError> {
    let mut lines = Vec::new();

    lines.push(format!("//! {}", draw(lex, "thoughts", rng)?));
    lines.push(String::new());

    for _ in 0..rng.gen_range(3..=5) {
        lines.push(line(set, "import", lex, rng)?);
    }

    lines.push(String::new());
    lines.push(format!("// {}", draw(lex, "thoughts", rng)?));

    Ok(lines.join("\n"))
}

fn loop_poem(lex: &Lexicon, set: &TemplateSet, rng: &mut StdRng) -> Result<String, TemplateError> {
    let mut lines = Vec::new();

    lines.push(format!("// {}", draw(lex, "thoughts", rng)?));
    lines.push(String::new());

    if rng.gen_bool(0.5) {
        lines.push(format!(
            "for {} in {} {{",
            draw(lex, "nouns", rng)?,
            draw(lex, "abstractions", rng)?
        ));
    } else {
        lines.push(format!("while {} {{", draw(lex, "adjectives", rng)?));
    }

    for _ in 0..rng.gen_range(2..=4) {
        let kind = if rng.gen_bool(0.5) { "assignment" } else { "comment" };
        lines.push(format!("    {}", line(set, kind, lex, rng)?));
    }

    lines.push(format!(
        "    if {} == {} {{",
        draw(lex, "nouns", rng)?,
        draw(lex, "abstractions", rng)?
    ));
    lines.push("        break; // or continue forever".to_string());
    lines.push("    }".to_string());
    lines.push("}".to_string());

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn assert_fully_expanded(text: &str, lex: &Lexicon) {
        for pool in lex.pools.keys() {
            let token = format!("{{{}}}", pool);
            assert!(
                !text.contains(&token),
                "unresolved slot {} in:\n{}",
                token,
                text
            );
        }
    }

    #[test]
    fn every_style_generates() {
        let lex = lexicon();
        let set = template_set().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for style in PoemStyle::ALL {
            let poem = generate(Some(style), &lex, &set, &mut rng).unwrap();
            assert!(!poem.is_empty(), "{} poem empty", style.name());
            assert_fully_expanded(&poem, &lex);
        }
    }

    #[test]
    fn random_style_covers_all() {
        let lex = lexicon();
        let set = template_set().unwrap();
        let mut seen_fn = false;
        let mut seen_use = false;
        for seed in 0..60 {
            let mut rng = StdRng::seed_from_u64(seed);
            let poem = generate(None, &lex, &set, &mut rng).unwrap();
            if poem.contains("fn ") {
                seen_fn = true;
            }
            if poem.contains("use ") {
                seen_use = true;
            }
        }
        assert!(seen_fn && seen_use);
    }

    #[test]
    fn function_poem_opens_and_closes() {
        let lex = lexicon();
        let set = template_set().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let poem = generate(Some(PoemStyle::Function), &lex, &set, &mut rng).unwrap();
        assert!(poem.lines().any(|l| l.starts_with("fn ")));
        assert_eq!(poem.lines().last(), Some("}"));
    }

    #[test]
    fn deterministic_with_seed() {
        let lex = lexicon();
        let set = template_set().unwrap();
        let mut rng1 = StdRng::seed_from_u64(11);
        let mut rng2 = StdRng::seed_from_u64(11);
        assert_eq!(
            generate(None, &lex, &set, &mut rng1).unwrap(),
            generate(None, &lex, &set, &mut rng2).unwrap()
        );
    }

    #[test]
    fn style_parse_round_trip() {
        for style in PoemStyle::ALL {
            assert_eq!(PoemStyle::parse(style.name()), Some(style));
        }
        assert_eq!(PoemStyle::parse("sonnet"), None);
    }

    #[test]
    fn capitalize_nouns() {
        assert_eq!(capitalize("memory"), "Memory");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn attribution_shape() {
        let a = attribution();
        assert!(a.starts_with("// generated "));
        assert!(a.ends_with("// syntax that speaks"));
    }
}
