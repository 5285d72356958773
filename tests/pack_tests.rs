/// Pack and state-file integration tests — external inputs end to end.

use murmur_engine::chain::{signal, state};
use murmur_engine::core::lexicon::Lexicon;
use murmur_engine::forms::murmur;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

#[test]
fn lexicon_pack_overlays_builtin_pools() {
    let mut lex = murmur::lexicon();
    let pack = Lexicon::load_from_ron(Path::new("tests/fixtures/extra_lexicon.ron")).unwrap();
    lex.merge(pack);

    // Overridden pools shrink to the pack's entries; untouched pools keep
    // the builtin sizes.
    assert_eq!(lex.pool_len("openings"), 3);
    assert_eq!(lex.pool_len("solitary"), 1);
    assert_eq!(lex.pool_len("middles"), murmur::MIDDLES.len());
    assert_eq!(lex.pool_len("closings"), murmur::CLOSINGS.len());

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let m = murmur::murmur(&lex, &mut rng).unwrap();
        if m == "the pack overlays the builtin" {
            continue;
        }
        let opening = m.split(", ").next().unwrap();
        assert!(
            lex.entries("openings").unwrap().iter().any(|o| o == opening),
            "opening not from pack: {}",
            m
        );
    }
}

#[test]
fn state_fixture_drives_signals() {
    let loaded = state::load(Path::new("tests/fixtures/state.json"));
    let state = loaded.expect("fixture should load");

    let mut rng = StdRng::seed_from_u64(42);
    let status = signal::full_status(Some(&state), &mut rng).unwrap();

    // Five lines, with the iteration and streak counters visible somewhere.
    assert_eq!(status.lines().count(), 5);
    assert!(status.contains("47"));
    assert!(status.contains("12"));
}

#[test]
fn missing_state_yields_documented_fallback() {
    let loaded = state::load(Path::new("tests/fixtures/no_such_state.json"));
    assert!(loaded.is_none());

    let mut rng = StdRng::seed_from_u64(42);
    let murmurs = signal::batch(loaded.as_ref(), 3, &mut rng).unwrap();
    assert_eq!(murmurs, ["the chain is silent", "no state to read"]);

    let status = signal::full_status(loaded.as_ref(), &mut rng).unwrap();
    assert_eq!(status, "the chain is silent");
}

#[test]
fn broken_state_yields_documented_fallback() {
    let loaded = state::load(Path::new("tests/fixtures/broken_state.json"));
    assert!(loaded.is_none());
}

#[test]
fn partial_state_formats_defaults() {
    let state = state::load(Path::new("tests/fixtures/partial_state.json")).unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    let ideas = signal::signal(signal::SignalKind::Ideas, &state, &mut rng).unwrap();
    // No ideas recorded: the empty-queue pool answers instead of a count.
    assert!(signal::EMPTY_QUEUE_MURMURS.contains(&ideas.as_str()));

    let progress = signal::signal(signal::SignalKind::Progress, &state, &mut rng).unwrap();
    assert!(progress.contains('0'));
}
