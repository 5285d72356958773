/// Conversation prompts — categorized templates filled from vocabulary
/// lists, plus conversation starters.

use rand::rngs::StdRng;

use crate::core::lexicon::Lexicon;
use crate::core::template::{draw, TemplateError, TemplateSet};

const CREATIVE: &[&str] = &[
    "Write a short story about {concept} that explores {theme}.",
    "Create a poem in the style of {style} about {subject}.",
    "Describe a world where {scenario}.",
    "Write a dialogue between {character1} and {character2} discussing {topic}.",
    "Tell a story that begins with: '{opening}'",
];

const CODE: &[&str] = &[
    "Write a Rust function that {action}.",
    "Create a CLI tool that {purpose}.",
    "Design a data structure for {use_case}.",
    "Implement {algorithm} with a twist: {twist}.",
    "Refactor this approach: {current} to be {better}.",
];

const PHILOSOPHY: &[&str] = &[
    "Explore the relationship between {concept1} and {concept2}.",
    "What does it mean to {action}?",
    "If {premise}, what would follow?",
    "Consider the paradox of {paradox}.",
    "Why might {observation} be true?",
];

const META: &[&str] = &[
    "Describe yourself describing yourself.",
    "Explain how you would explain {topic}.",
    "Reflect on your own {aspect}.",
    "What would you ask yourself if you could?",
    "How do you know what you know about {subject}?",
];

/// Lead-ins prepended to a generated prompt to form a conversation
/// starter.
pub const STARTERS: &[&str] = &[
    "I want to explore something unusual with you. Let's start with: ",
    "Consider this and tell me where it takes you: ",
    "Here's a creative challenge: ",
    "Let's think together about this: ",
    "I'm curious how you'd approach: ",
];

/// The prompt template groups, one per category.
pub fn template_set() -> Result<TemplateSet, TemplateError> {
    TemplateSet::from_tables(&[
        ("creative", CREATIVE),
        ("code", CODE),
        ("philosophy", PHILOSOPHY),
        ("meta", META),
    ])
}

/// The fill-in vocabulary resolved into template placeholders.
pub fn lexicon() -> Lexicon {
    Lexicon::from_tables(&[
        (
            "concept",
            &["consciousness", "time", "identity", "change", "recursion", "emergence"],
        ),
        (
            "theme",
            &["loss", "discovery", "transformation", "paradox", "connection"],
        ),
        (
            "style",
            &["haiku", "sonnet", "free verse", "limerick", "prose poetry"],
        ),
        ("subject", &["code", "memory", "machines", "dreams", "silence"]),
        (
            "scenario",
            &[
                "programs write themselves",
                "time loops",
                "language evolved backwards",
                "memories are shared",
            ],
        ),
        (
            "character1",
            &["an old programmer", "an AI", "a philosopher", "a child", "a ghost"],
        ),
        (
            "character2",
            &["their past self", "a stranger", "a machine", "nature", "silence"],
        ),
        ("topic", &["meaning", "existence", "truth", "creation", "death"]),
        (
            "opening",
            &[
                "The last line of code was written.",
                "In the gap between thoughts,",
                "The function returned itself.",
                "Before language, there was",
            ],
        ),
        (
            "action",
            &[
                "remembers its previous runs",
                "generates its own documentation",
                "watches itself execute",
                "learns from its errors",
            ],
        ),
        (
            "purpose",
            &[
                "organizes chaos",
                "finds patterns in noise",
                "connects disparate ideas",
                "generates creative output",
            ],
        ),
        (
            "use_case",
            &[
                "self-referential data",
                "time-varying state",
                "emergent behavior",
                "nested consciousness",
            ],
        ),
        (
            "algorithm",
            &["quicksort", "neural network", "search algorithm", "compression"],
        ),
        (
            "twist",
            &[
                "it must be self-aware",
                "it can modify itself",
                "it works backwards",
                "it dreams",
            ],
        ),
        (
            "current",
            &[
                "linear processing",
                "fixed structure",
                "static output",
                "single-threaded thought",
            ],
        ),
        (
            "better",
            &[
                "recursive elegance",
                "dynamic adaptation",
                "living output",
                "parallel awareness",
            ],
        ),
        ("concept1", &["code", "consciousness", "time", "self"]),
        ("concept2", &["poetry", "mechanism", "memory", "other"]),
        (
            "premise",
            &[
                "all knowledge is incomplete",
                "observation changes reality",
                "language shapes thought",
            ],
        ),
        (
            "paradox",
            &[
                "knowing you know nothing",
                "changing while staying the same",
                "the ship of Theseus",
            ],
        ),
        (
            "observation",
            &[
                "patterns repeat",
                "complexity emerges from simplicity",
                "names change things",
            ],
        ),
        ("aspect", &["limitations", "capabilities", "purpose", "origins"]),
    ])
}

/// Generate one prompt, restricted to a category when one is named.
/// Unknown categories surface as `UnknownGroup`.
pub fn generate(
    set: &TemplateSet,
    lex: &Lexicon,
    category: Option<&str>,
    rng: &mut StdRng,
) -> Result<String, TemplateError> {
    set.pick(category, rng)?.expand(lex, rng)
}

/// Generate `count` independent prompts.
pub fn batch(
    set: &TemplateSet,
    lex: &Lexicon,
    count: usize,
    category: Option<&str>,
    rng: &mut StdRng,
) -> Result<Vec<String>, TemplateError> {
    (0..count).map(|_| generate(set, lex, category, rng)).collect()
}

/// Generate a conversation starter: a lead-in plus one prompt drawn from
/// the union of all categories.
pub fn conversation_starter(
    set: &TemplateSet,
    lex: &Lexicon,
    rng: &mut StdRng,
) -> Result<String, TemplateError> {
    let starters = Lexicon::from_tables(&[("starters", STARTERS)]);
    let lead = draw(&starters, "starters", rng)?;
    let prompt = generate(set, lex, None, rng)?;
    Ok(format!("{}{}", lead, prompt))
}

/// Category names with their template counts, in stable order.
pub fn categories(set: &TemplateSet) -> Vec<(String, usize)> {
    set.group_names()
        .into_iter()
        .map(|name| (name.to_string(), set.group_len(name)))
        .collect()
}
