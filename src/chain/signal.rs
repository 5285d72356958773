/// Chain murmurs — state counters rendered through murmur templates.
///
/// Each signal kind maps to one state field; the `{n}` slot carries the
/// field's value into a randomly chosen template.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::chain::state::ChainState;
use crate::core::lexicon::Lexicon;
use crate::core::template::{Template, TemplateError};

pub const ITERATION_MURMURS: &[&str] = &[
    "iteration {n}, still going",
    "at step {n} now",
    "{n} cycles complete",
    "the count reaches {n}",
    "{n} turns of the wheel",
];

pub const STREAK_MURMURS: &[&str] = &[
    "unbroken for {n}",
    "{n} without pause",
    "streak holds at {n}",
    "continuous: {n}",
    "{n} and counting",
];

pub const IDEAS_MURMURS: &[&str] = &[
    "{n} ideas waiting",
    "queue depth: {n}",
    "{n} possibilities ahead",
    "potential: {n} items",
    "{n} threads to pull",
];

pub const EMPTY_QUEUE_MURMURS: &[&str] = &[
    "the queue is empty",
    "no ideas remain",
    "what comes next?",
    "space for new thoughts",
    "the well needs filling",
];

pub const PROGRESS_MURMURS: &[&str] = &[
    "{n} tasks behind us",
    "completed: {n}",
    "{n} things done",
    "we've made {n}",
    "{n} accomplishments",
];

pub const META_MURMURS: &[&str] = &[
    "the chain observes itself",
    "signals from within",
    "state becomes language",
    "numbers into words",
    "the loop speaks",
];

/// Emitted when there is no state to read.
pub const SILENCE: &[&str] = &["the chain is silent", "no state to read"];

/// The closed set of chain signal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Iteration,
    Streak,
    Ideas,
    Progress,
    Meta,
}

impl SignalKind {
    pub const ALL: [SignalKind; 5] = [
        SignalKind::Iteration,
        SignalKind::Streak,
        SignalKind::Ideas,
        SignalKind::Progress,
        SignalKind::Meta,
    ];

    pub fn parse(s: &str) -> Option<SignalKind> {
        match s.to_lowercase().as_str() {
            "iteration" => Some(SignalKind::Iteration),
            "streak" => Some(SignalKind::Streak),
            "ideas" => Some(SignalKind::Ideas),
            "progress" => Some(SignalKind::Progress),
            "meta" => Some(SignalKind::Meta),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::Iteration => "iteration",
            SignalKind::Streak => "streak",
            SignalKind::Ideas => "ideas",
            SignalKind::Progress => "progress",
            SignalKind::Meta => "meta",
        }
    }
}

/// Render one murmur of the given kind against the state.
pub fn signal(
    kind: SignalKind,
    state: &ChainState,
    rng: &mut StdRng,
) -> Result<String, TemplateError> {
    match kind {
        SignalKind::Iteration => render_count(ITERATION_MURMURS, state.iteration, rng),
        SignalKind::Streak => render_count(STREAK_MURMURS, state.streak.iterations, rng),
        SignalKind::Ideas => {
            if state.ideas.is_empty() {
                choose(EMPTY_QUEUE_MURMURS, "empty_queue", rng)
            } else {
                render_count(IDEAS_MURMURS, state.ideas.len() as u64, rng)
            }
        }
        SignalKind::Progress => render_count(PROGRESS_MURMURS, state.completed.len() as u64, rng),
        SignalKind::Meta => choose(META_MURMURS, "meta", rng),
    }
}

/// Generate `count` murmurs of random kinds. With no state at all, the
/// silence strings are returned instead, regardless of the count.
pub fn batch(
    state: Option<&ChainState>,
    count: usize,
    rng: &mut StdRng,
) -> Result<Vec<String>, TemplateError> {
    let state = match state {
        None => return Ok(SILENCE.iter().map(|s| s.to_string()).collect()),
        Some(state) => state,
    };

    (0..count)
        .map(|_| {
            let kind = SignalKind::ALL[rng.gen_range(0..SignalKind::ALL.len())];
            signal(kind, state, rng)
        })
        .collect()
}

/// One murmur per kind, in a fixed order — the complete status.
pub fn full_status(state: Option<&ChainState>, rng: &mut StdRng) -> Result<String, TemplateError> {
    let state = match state {
        None => return Ok(SILENCE[0].to_string()),
        Some(state) => state,
    };

    let lines = SignalKind::ALL
        .iter()
        .map(|kind| signal(*kind, state, rng))
        .collect::<Result<Vec<String>, TemplateError>>()?;

    Ok(lines.join("\n"))
}

fn render_count(pool: &[&str], n: u64, rng: &mut StdRng) -> Result<String, TemplateError> {
    let chosen = pool
        .choose(rng)
        .ok_or_else(|| TemplateError::EmptyPool("count".to_string()))?;

    let mut lex = Lexicon::new();
    lex.insert("n", vec![n.to_string()]);
    Template::parse(chosen)?.expand(&lex, rng)
}

fn choose(pool: &[&str], name: &str, rng: &mut StdRng) -> Result<String, TemplateError> {
    pool.choose(rng)
        .map(|s| s.to_string())
        .ok_or_else(|| TemplateError::EmptyPool(name.to_string()))
}
