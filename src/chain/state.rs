/// External chain state — an advisory JSON blob read once at startup.
///
/// All fields are optional; unknown fields are ignored. The blob is never
/// written back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The chain state consulted for numeric murmurs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainState {
    #[serde(default)]
    pub iteration: u64,
    #[serde(default)]
    pub streak: Streak,
    #[serde(default)]
    pub ideas: Vec<serde_json::Value>,
    #[serde(default)]
    pub completed: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Streak {
    #[serde(default)]
    pub iterations: u64,
}

/// Default location of the chain state file.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".infinite-chain").join("state.json"))
}

/// Load chain state. A file that is missing, unreadable, unparsable, or
/// an empty JSON object yields `None`; callers fall back to the silence
/// strings. Any non-empty object is state, with absent fields defaulted.
pub fn load(path: &Path) -> Option<ChainState> {
    let contents = std::fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&contents).ok()?;
    if value.as_object()?.is_empty() {
        return None;
    }
    serde_json::from_value(value).ok()
}
