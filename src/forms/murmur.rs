/// Murmurs — small signals from undefined coordinates.
///
/// A murmur is either a solitary line drawn whole from its pool, or a
/// three-part construction of opening, middle, and closing fragments.

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::lexicon::Lexicon;
use crate::core::template::{draw, Template, TemplateError};

/// Probability that a murmur is a solitary thought rather than a
/// constructed fragment.
pub const SOLITARY_CHANCE: f64 = 0.3;

/// The construction used when a murmur is not solitary.
pub const CONSTRUCTED: &str = "{openings}, {middles} {closings}";

pub const OPENINGS: &[&str] = &[
    "somewhere",
    "at the edge",
    "in the gap",
    "underneath it all",
    "before this",
    "when no one looks",
    "in the silence",
    "at the threshold",
    "in the static",
    "at null island",
];

pub const MIDDLES: &[&str] = &[
    "light bends toward",
    "something remembers",
    "patterns dissolve into",
    "silence holds onto",
    "time pools around",
    "meaning slips past",
    "signals converge on",
    "shadows trace out",
    "echoes return to",
    "nothing becomes",
];

pub const CLOSINGS: &[&str] = &[
    "what was never named",
    "the shape of waiting",
    "its own question",
    "the space left behind",
    "something like recognition",
    "the weight of maybe",
    "a frequency long forgotten",
    "the pause before the pause",
    "what listens back",
    "the edge of almost",
];

pub const SOLITARY: &[&str] = &[
    "the signal is the noise",
    "every pattern contains its absence",
    "to name it is to lose it",
    "the map precedes the territory",
    "somewhere, a threshold",
    "not lost, just elsewhere",
    "the ghost of a gesture",
    "what remains when you stop looking",
    "a coordinate with no ground",
    "the sound of one thing changing",
    "attention is all you have",
    "between stimulus and response, a gap",
    "the interesting things happen at the edges",
    "emergence is just patience",
    "you are here (approximately)",
];

/// The murmur vocabulary as a lexicon, suitable for pack overlays.
pub fn lexicon() -> Lexicon {
    Lexicon::from_tables(&[
        ("openings", OPENINGS),
        ("middles", MIDDLES),
        ("closings", CLOSINGS),
        ("solitary", SOLITARY),
    ])
}

/// Generate a single murmur: sometimes a solitary thought, otherwise a
/// constructed fragment.
pub fn murmur(lex: &Lexicon, rng: &mut StdRng) -> Result<String, TemplateError> {
    if rng.gen_bool(SOLITARY_CHANCE) {
        Ok(draw(lex, "solitary", rng)?.to_string())
    } else {
        Template::parse(CONSTRUCTED)?.expand(lex, rng)
    }
}

/// Generate `count` independent murmurs.
pub fn murmurs(lex: &Lexicon, count: usize, rng: &mut StdRng) -> Result<Vec<String>, TemplateError> {
    (0..count).map(|_| murmur(lex, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// True if `text` is reachable from the built-in pools.
    fn is_reachable(text: &str) -> bool {
        if SOLITARY.contains(&text) {
            return true;
        }
        for opening in OPENINGS {
            for middle in MIDDLES {
                for closing in CLOSINGS {
                    if text == format!("{}, {} {}", opening, middle, closing) {
                        return true;
                    }
                }
            }
        }
        false
    }

    #[test]
    fn murmur_output_is_reachable() {
        let lex = lexicon();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let m = murmur(&lex, &mut rng).unwrap();
            assert!(is_reachable(&m), "unreachable murmur: {}", m);
        }
    }

    #[test]
    fn murmur_deterministic_with_seed() {
        let lex = lexicon();
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        assert_eq!(
            murmurs(&lex, 20, &mut rng1).unwrap(),
            murmurs(&lex, 20, &mut rng2).unwrap()
        );
    }

    #[test]
    fn murmurs_count_exact() {
        let lex = lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        for count in [0, 1, 5, 17] {
            assert_eq!(murmurs(&lex, count, &mut rng).unwrap().len(), count);
        }
    }

    #[test]
    fn solitary_rate_near_chance() {
        let lex = lexicon();
        let mut rng = StdRng::seed_from_u64(1);
        let mut solitary = 0;
        let total = 2000;
        for _ in 0..total {
            let m = murmur(&lex, &mut rng).unwrap();
            if SOLITARY.contains(&m.as_str()) {
                solitary += 1;
            }
        }
        let rate = solitary as f64 / total as f64;
        assert!(
            (0.2..0.4).contains(&rate),
            "solitary rate {} far from {}",
            rate,
            SOLITARY_CHANCE
        );
    }

    #[test]
    fn overlay_pool_changes_output() {
        let mut lex = lexicon();
        let mut overlay = Lexicon::new();
        overlay.insert("solitary", vec!["only this".to_string()]);
        overlay.insert("openings", vec!["only here".to_string()]);
        lex.merge(overlay);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let m = murmur(&lex, &mut rng).unwrap();
            assert!(m == "only this" || m.starts_with("only here, "));
        }
    }
}
