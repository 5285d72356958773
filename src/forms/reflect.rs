/// Self-referential verse — poems that describe their own generation.
///
/// Recombines the murmur and verse pools and layers metadata on top:
/// which pool members were chosen, how many alternatives existed at each
/// choice point, a short fingerprint, and a generation timestamp.

use chrono::Local;
use rand::rngs::StdRng;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::lexicon::Lexicon;
use crate::core::template::{draw, TemplateError};
use crate::forms::verse;

/// First 8 hex characters of the SHA-256 digest of a text.
pub fn fingerprint(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest.iter().take(4).map(|b| format!("{:02x}", b)).collect()
}

/// A haiku that knows about itself.
#[derive(Debug, Serialize)]
pub struct HaikuCard {
    pub poem: String,
    pub form: String,
    pub fingerprint: String,
    pub generated_at: String,
    pub line_sources: Vec<String>,
    pub probability: String,
    pub self_reference: String,
}

/// Generate a haiku with self-referential metadata. The verse pools
/// supply the lines; pool sizes document the odds.
pub fn self_aware_haiku(
    verse_lex: &Lexicon,
    rng: &mut StdRng,
) -> Result<HaikuCard, TemplateError> {
    let poem = verse::haiku(verse_lex, rng)?;
    let fp = fingerprint(&poem);

    let five = verse_lex.pool_len("five");
    let seven = verse_lex.pool_len("seven");
    let combinations = five * seven * five;

    Ok(HaikuCard {
        self_reference: format!(
            "this haiku is {}. it will never be generated exactly this way again at exactly this moment.",
            fp
        ),
        poem,
        form: "haiku".to_string(),
        fingerprint: fp,
        generated_at: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        line_sources: vec![
            format!("line 1: chosen from {} options", five),
            format!("line 2: chosen from {} options", seven),
            format!("line 3: chosen from {} options", five),
        ],
        probability: format!("1 in {}", group_thousands(combinations)),
    })
}

/// A poem that describes its own three choices, then quotes the result.
pub fn meta_poem(murmur_lex: &Lexicon, rng: &mut StdRng) -> Result<String, TemplateError> {
    let opening = draw(murmur_lex, "openings", rng)?.to_string();
    let middle = draw(murmur_lex, "middles", rng)?.to_string();
    let closing = draw(murmur_lex, "closings", rng)?.to_string();

    let base_poem = format!("{}, {} {}", opening, middle, closing);

    let lines = vec![
        format!("this poem began by choosing '{}'", opening),
        format!(
            "from {} possible openings",
            murmur_lex.pool_len("openings")
        ),
        String::new(),
        format!("then it selected '{}'", middle),
        format!(
            "from {} possible continuations",
            murmur_lex.pool_len("middles")
        ),
        String::new(),
        format!("and ended with '{}'", closing),
        format!(
            "from {} possible endings",
            murmur_lex.pool_len("closings")
        ),
        String::new(),
        "the poem that resulted was:".to_string(),
        format!("  \"{}\"", base_poem),
        String::new(),
        format!("its fingerprint: {}", fingerprint(&base_poem)),
        format!(
            "generated at: {}",
            Local::now().format("%Y-%m-%dT%H:%M:%S%.6f")
        ),
        String::new(),
        "this meta-description is also part of the poem".to_string(),
        "which changes the poem".to_string(),
        "which changes this description".to_string(),
        "(but not really, because we already wrote it)".to_string(),
    ];

    Ok(lines.join("\n"))
}

/// A poem that contains poems about itself containing poems, nested to
/// `depth` levels.
pub fn recursive_verse(
    verse_lex: &Lexicon,
    depth: usize,
    rng: &mut StdRng,
) -> Result<String, TemplateError> {
    let mut lines = Vec::new();
    lines.push("a poem that contains itself:".to_string());
    lines.push(String::new());

    descend(verse_lex, depth, "", &mut lines, rng)?;

    lines.push(String::new());
    lines.push("each layer is real".to_string());
    lines.push("each layer contains the next".to_string());
    lines.push("the bottom is where poetry becomes just a word".to_string());

    Ok(lines.join("\n"))
}

fn descend(
    verse_lex: &Lexicon,
    depth: usize,
    indent: &str,
    lines: &mut Vec<String>,
    rng: &mut StdRng,
) -> Result<(), TemplateError> {
    if depth == 0 {
        let fragment = draw(verse_lex, "fragments", rng)?;
        lines.push(format!("{}(at the bottom: '{}')", indent, fragment));
        return Ok(());
    }

    let fragment = draw(verse_lex, "fragments", rng)?;
    lines.push(format!("{}at depth {}: {}", indent, depth, fragment));
    lines.push(format!("{}which contains:", indent));

    descend(verse_lex, depth - 1, &format!("{}  ", indent), lines, rng)?;

    lines.push(format!("{}and returns to depth {}", indent, depth));
    Ok(())
}

/// A poem presented as a timestamped log of its own generation.
pub fn generation_log(murmur_lex: &Lexicon, rng: &mut StdRng) -> Result<String, TemplateError> {
    let ts = |offset_ms: u32| format!("[T+{:04}ms]", offset_ms);

    let mut lines = Vec::new();
    lines.push(format!("{} poem generation initiated", ts(0)));
    lines.push(format!("{} loading word banks...", ts(1)));
    lines.push(format!(
        "{}   - openings: {} entries",
        ts(2),
        murmur_lex.pool_len("openings")
    ));
    lines.push(format!(
        "{}   - middles: {} entries",
        ts(3),
        murmur_lex.pool_len("middles")
    ));
    lines.push(format!(
        "{}   - closings: {} entries",
        ts(4),
        murmur_lex.pool_len("closings")
    ));
    lines.push(format!(
        "{}   - solitary: {} entries",
        ts(5),
        murmur_lex.pool_len("solitary")
    ));

    lines.push(format!("{} selecting opening...", ts(10)));
    let opening = draw(murmur_lex, "openings", rng)?.to_string();
    lines.push(format!("{}   selected: '{}'", ts(11), opening));

    lines.push(format!("{} selecting continuation...", ts(15)));
    let middle = draw(murmur_lex, "middles", rng)?.to_string();
    lines.push(format!("{}   selected: '{}'", ts(16), middle));

    lines.push(format!("{} selecting closing...", ts(20)));
    let closing = draw(murmur_lex, "closings", rng)?.to_string();
    lines.push(format!("{}   selected: '{}'", ts(21), closing));

    lines.push(format!("{} assembling poem...", ts(25)));
    let poem = format!("{}, {} {}", opening, middle, closing);
    lines.push(format!("{}   result: \"{}\"", ts(26), poem));

    lines.push(format!(
        "{} computing fingerprint: {}",
        ts(30),
        fingerprint(&poem)
    ));

    lines.push(format!("{} poem generation complete", ts(35)));
    lines.push(format!("{} this log is the poem", ts(36)));
    lines.push(format!("{} the process is the product", ts(37)));

    Ok(lines.join("\n"))
}

/// A hybrid of the murmur tradition and the verse lexicon, with
/// attribution for each borrowed line.
pub fn hybrid(
    murmur_lex: &Lexicon,
    verse_lex: &Lexicon,
    rng: &mut StdRng,
) -> Result<String, TemplateError> {
    let mut lines = Vec::new();

    let opening = draw(murmur_lex, "openings", rng)?;
    lines.push(opening.to_string());
    lines.push("  (chosen from the murmur tradition)".to_string());
    lines.push(String::new());

    let fragment1 = draw(verse_lex, "fragments", rng)?;
    let fragment2 = draw(verse_lex, "fragments", rng)?;
    lines.push(format!("{} meets {}", fragment1, fragment2));
    lines.push("  (borrowed from the verse lexicon)".to_string());
    lines.push(String::new());

    let solitary = draw(murmur_lex, "solitary", rng)?;
    lines.push(solitary.to_string());
    lines.push("  (a complete thought from murmur's solitary collection)".to_string());
    lines.push(String::new());

    lines.push(draw(murmur_lex, "middles", rng)?.to_string());
    lines.push(draw(murmur_lex, "closings", rng)?.to_string());
    lines.push(draw(verse_lex, "five", rng)?.to_string());
    lines.push(String::new());
    lines.push("this poem drew from two sources".to_string());
    lines.push("murmur: cryptic, undefined".to_string());
    lines.push("verse: structured, countable".to_string());
    lines.push("the combination is neither".to_string());
    lines.push("yet both".to_string());

    Ok(lines.join("\n"))
}

/// Format a count with thousands separators: 6800 → "6,800".
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::murmur;
    use rand::SeedableRng;

    #[test]
    fn fingerprint_is_short_hex() {
        let fp = fingerprint("the signal is the noise");
        assert_eq!(fp.len(), 8);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fingerprint_stable_for_same_text() {
        assert_eq!(fingerprint("a poem"), fingerprint("a poem"));
        assert_ne!(fingerprint("a poem"), fingerprint("another poem"));
    }

    #[test]
    fn self_aware_haiku_card_fields() {
        let lex = verse::lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let card = self_aware_haiku(&lex, &mut rng).unwrap();

        assert_eq!(card.form, "haiku");
        assert_eq!(card.poem.lines().count(), 3);
        assert_eq!(card.fingerprint, fingerprint(&card.poem));
        assert_eq!(card.line_sources.len(), 3);
        assert!(card.line_sources[0].contains("20 options"));
        assert!(card.line_sources[1].contains("17 options"));
        assert!(card.probability.starts_with("1 in "));
        assert!(card.self_reference.contains(&card.fingerprint));
    }

    #[test]
    fn probability_counts_combination_space() {
        let lex = verse::lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let card = self_aware_haiku(&lex, &mut rng).unwrap();
        // 20 * 17 * 20
        assert_eq!(card.probability, "1 in 6,800");
    }

    #[test]
    fn card_serializes_to_json() {
        let lex = verse::lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let card = self_aware_haiku(&lex, &mut rng).unwrap();
        let json = serde_json::to_string_pretty(&card).unwrap();
        assert!(json.contains("\"fingerprint\""));
        assert!(json.contains("\"probability\""));
    }

    #[test]
    fn meta_poem_quotes_its_result() {
        let lex = murmur::lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let poem = meta_poem(&lex, &mut rng).unwrap();
        assert!(poem.starts_with("this poem began by choosing '"));
        assert!(poem.contains("the poem that resulted was:"));
        assert!(poem.contains("its fingerprint: "));
        assert!(poem.ends_with("(but not really, because we already wrote it)"));
    }

    #[test]
    fn recursive_verse_depth_markers() {
        let lex = verse::lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let poem = recursive_verse(&lex, 3, &mut rng).unwrap();
        for depth in 1..=3 {
            assert!(poem.contains(&format!("at depth {}:", depth)));
            assert!(poem.contains(&format!("and returns to depth {}", depth)));
        }
        assert!(poem.contains("(at the bottom: '"));
    }

    #[test]
    fn recursive_verse_depth_zero() {
        let lex = verse::lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let poem = recursive_verse(&lex, 0, &mut rng).unwrap();
        assert!(poem.contains("(at the bottom: '"));
        assert!(!poem.contains("at depth"));
    }

    #[test]
    fn generation_log_is_ordered() {
        let lex = murmur::lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let log = generation_log(&lex, &mut rng).unwrap();
        assert!(log.starts_with("[T+0000ms] poem generation initiated"));
        assert!(log.contains("- openings: 10 entries"));
        assert!(log.contains("computing fingerprint: "));
        assert!(log.ends_with("the process is the product"));
    }

    #[test]
    fn hybrid_credits_both_sources() {
        let murmur_lex = murmur::lexicon();
        let verse_lex = verse::lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let poem = hybrid(&murmur_lex, &verse_lex, &mut rng).unwrap();
        assert!(poem.contains("(chosen from the murmur tradition)"));
        assert!(poem.contains("(borrowed from the verse lexicon)"));
        assert!(poem.ends_with("yet both"));
    }

    #[test]
    fn group_thousands_separators() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(6800), "6,800");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn deterministic_with_seed() {
        let murmur_lex = murmur::lexicon();
        let verse_lex = verse::lexicon();
        let mut rng1 = StdRng::seed_from_u64(9);
        let mut rng2 = StdRng::seed_from_u64(9);
        assert_eq!(
            hybrid(&murmur_lex, &verse_lex, &mut rng1).unwrap(),
            hybrid(&murmur_lex, &verse_lex, &mut rng2).unwrap()
        );
    }
}
