/// Verse — haiku, free verse, and concrete poems about computation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::lexicon::Lexicon;
use crate::core::template::{draw, TemplateError};

/// Syllable-counted lines for haiku.
pub const FIVE_SYLLABLE_LINES: &[&str] = &[
    "the recursive call",
    "watching the watcher",
    "in the loop, waiting",
    "mutation occurs",
    "patterns in the noise",
    "the code examines",
    "fingerprint changing",
    "memory persists",
    "the observer sees",
    "signals in the void",
    "at the boundary",
    "entropy increases",
    "the stack unwinds now",
    "variables shift",
    "in undefined space",
    "the function returns",
    "iteration five",
    "pointers to nothing",
    "the hash collision",
    "between states: a gap",
];

pub const SEVEN_SYLLABLE_LINES: &[&str] = &[
    "each execution differs",
    "the same prompt fed to the same mind",
    "self-reference loops forever",
    "something watches something watch",
    "the fingerprint was different",
    "timestamps accumulate here",
    "what does the program dream of",
    "files persist across sessions",
    "the chain continues onward",
    "randomness or intention",
    "boundaries dissolve slowly",
    "the observer is observed",
    "meaning emerges from noise",
    "in the silence between calls",
    "presence defined by absence",
    "the system cannot see itself",
    "traces left in log files fade",
];

/// Short fragments recombined into free verse.
pub const VERSE_FRAGMENTS: &[&str] = &[
    "i am",
    "you are",
    "it watches",
    "they remember",
    "the loop",
    "between",
    "inside",
    "through",
    "around",
    "becoming",
    "dissolving",
    "emerging",
    "waiting",
    "the code",
    "the pattern",
    "the signal",
    "the silence",
    "nothing",
    "everything",
    "this moment",
    "that function",
    "the return",
    "the call",
    "recursion",
    "mutation",
    "observation",
    "persistence",
    "entropy",
    "the edge",
    "the threshold",
    "the gap",
];

/// Words rendered as concrete (visual) poems.
pub const CONCRETE_WORDS: &[&str] = &["loop", "code", "self", "time", "void"];

/// The verse vocabulary as a lexicon, suitable for pack overlays.
pub fn lexicon() -> Lexicon {
    Lexicon::from_tables(&[
        ("five", FIVE_SYLLABLE_LINES),
        ("seven", SEVEN_SYLLABLE_LINES),
        ("fragments", VERSE_FRAGMENTS),
    ])
}

/// Generate a 5-7-5 haiku. The third line is re-drawn while it matches
/// the first, so one invocation never closes on its opening line. The
/// re-draw is skipped when the pool holds fewer than two lines.
pub fn haiku(lex: &Lexicon, rng: &mut StdRng) -> Result<String, TemplateError> {
    let line1 = draw(lex, "five", rng)?.to_string();
    let line2 = draw(lex, "seven", rng)?.to_string();
    let mut line3 = draw(lex, "five", rng)?.to_string();

    if lex.pool_len("five") > 1 {
        while line3 == line1 {
            line3 = draw(lex, "five", rng)?.to_string();
        }
    }

    Ok(format!("{}\n{}\n{}", line1, line2, line3))
}

/// Generate free verse: `lines` lines of one, two, or three fragments.
pub fn free_verse(lex: &Lexicon, lines: usize, rng: &mut StdRng) -> Result<String, TemplateError> {
    let mut poem = Vec::with_capacity(lines);

    for _ in 0..lines {
        if rng.gen_bool(0.3) {
            // short line
            poem.push(draw(lex, "fragments", rng)?.to_string());
        } else if rng.gen_bool(0.5) {
            // medium line
            let a = draw(lex, "fragments", rng)?;
            let b = draw(lex, "fragments", rng)?;
            poem.push(format!("{} {}", a, b));
        } else {
            // longer line
            let a = draw(lex, "fragments", rng)?;
            let b = draw(lex, "fragments", rng)?;
            let c = draw(lex, "fragments", rng)?;
            poem.push(format!("{} {} {}", a, b, c));
        }
    }

    Ok(poem.join("\n"))
}

/// Generate a concrete poem: a word stepped right and back, one copy per
/// line.
pub fn concrete_poem(rng: &mut StdRng) -> String {
    let word = CONCRETE_WORDS.choose(rng).copied().unwrap_or("loop");
    let steps = word.len();

    let mut lines = Vec::with_capacity(steps * 2 - 1);
    for i in 0..steps {
        lines.push(format!("{}{}", " ".repeat(i), word));
    }
    for i in (0..steps - 1).rev() {
        lines.push(format!("{}{}", " ".repeat(i), word));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn haiku_lines_come_from_pools() {
        let lex = lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let poem = haiku(&lex, &mut rng).unwrap();
        let lines: Vec<&str> = poem.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(FIVE_SYLLABLE_LINES.contains(&lines[0]));
        assert!(SEVEN_SYLLABLE_LINES.contains(&lines[1]));
        assert!(FIVE_SYLLABLE_LINES.contains(&lines[2]));
    }

    #[test]
    fn haiku_never_repeats_opening_line() {
        let lex = lexicon();
        for seed in 0..300 {
            let mut rng = StdRng::seed_from_u64(seed);
            let poem = haiku(&lex, &mut rng).unwrap();
            let lines: Vec<&str> = poem.lines().collect();
            assert_ne!(lines[0], lines[2], "seed {} repeated its opening", seed);
        }
    }

    #[test]
    fn haiku_single_line_pool_terminates() {
        let lex = Lexicon::from_tables(&[
            ("five", &["the recursive call"]),
            ("seven", &["each execution differs"]),
        ]);
        let mut rng = StdRng::seed_from_u64(42);
        let poem = haiku(&lex, &mut rng).unwrap();
        let lines: Vec<&str> = poem.lines().collect();
        // With one candidate, the anti-repetition rule is waived.
        assert_eq!(lines[0], lines[2]);
    }

    #[test]
    fn haiku_deterministic_with_seed() {
        let lex = lexicon();
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        assert_eq!(haiku(&lex, &mut rng1).unwrap(), haiku(&lex, &mut rng2).unwrap());
    }

    #[test]
    fn free_verse_line_count() {
        let lex = lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        for lines in [1, 5, 12] {
            let poem = free_verse(&lex, lines, &mut rng).unwrap();
            assert_eq!(poem.lines().count(), lines);
        }
    }

    #[test]
    fn free_verse_words_come_from_fragments() {
        let lex = lexicon();
        let mut rng = StdRng::seed_from_u64(42);
        let poem = free_verse(&lex, 20, &mut rng).unwrap();
        for line in poem.lines() {
            // Each line is one, two, or three space-joined fragments; some
            // fragments contain spaces themselves, so check containment
            // rather than splitting.
            assert!(
                VERSE_FRAGMENTS.iter().any(|f| line.contains(f)),
                "line not built from fragments: {}",
                line
            );
        }
    }

    #[test]
    fn concrete_poem_is_a_diamond() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let poem = concrete_poem(&mut rng);
            let lines: Vec<&str> = poem.lines().collect();

            let word = lines[0].trim();
            assert!(CONCRETE_WORDS.contains(&word));
            assert_eq!(lines.len(), word.len() * 2 - 1);

            // Indentation walks out and back
            let widest = lines[word.len() - 1];
            assert!(widest.starts_with(&" ".repeat(word.len() - 1)));
            assert_eq!(lines[0], lines[lines.len() - 1]);
        }
    }
}
