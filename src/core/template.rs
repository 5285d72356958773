/// Template runtime — parsing and random expansion against a lexicon.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::lexicon::Lexicon;

/// Cap on nested slot resolution. Fill values may themselves contain
/// slots; a pool that keeps referring back into itself is abandoned here
/// instead of recursing forever.
const MAX_DEPTH: usize = 16;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("no pool named '{0}'")]
    UnknownSlot(String),
    #[error("pool '{0}' is empty")]
    EmptyPool(String),
    #[error("no template group named '{0}'")]
    UnknownGroup(String),
    #[error("template group '{0}' is empty")]
    EmptyGroup(String),
    #[error("slot nesting too deep")]
    TooDeep,
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Named placeholder resolved from a lexicon pool: `{pool_name}`.
    Slot(String),
}

/// A parsed template — a sequence of segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{pool_name}` → `Slot`
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            if chars[i] == '{' {
                // Escaped brace
                if i + 1 < len && chars[i + 1] == '{' {
                    literal_buf.push('{');
                    i += 2;
                    continue;
                }

                // Flush any accumulated literal
                if !literal_buf.is_empty() {
                    segments.push(TemplateSegment::Literal(literal_buf.clone()));
                    literal_buf.clear();
                }

                // Find the closing brace
                let start = i + 1;
                let mut end = start;
                let mut closed = false;
                while end < len {
                    if chars[end] == '{' {
                        return Err(TemplateError::Parse(
                            "nested braces are not allowed".to_string(),
                        ));
                    }
                    if chars[end] == '}' {
                        closed = true;
                        break;
                    }
                    end += 1;
                }

                if !closed {
                    return Err(TemplateError::Parse("unclosed brace".to_string()));
                }

                let name: String = chars[start..end].iter().collect();
                if name.is_empty() {
                    return Err(TemplateError::Parse("empty braces".to_string()));
                }

                segments.push(TemplateSegment::Slot(name));
                i = end + 1;
            } else if chars[i] == '}' {
                // Escaped closing brace
                if i + 1 < len && chars[i + 1] == '}' {
                    literal_buf.push('}');
                    i += 2;
                    continue;
                }
                return Err(TemplateError::Parse(
                    "unmatched closing brace".to_string(),
                ));
            } else {
                literal_buf.push(chars[i]);
                i += 1;
            }
        }

        if !literal_buf.is_empty() {
            segments.push(TemplateSegment::Literal(literal_buf));
        }

        Ok(Template { segments })
    }

    /// Expand this template against a lexicon, drawing one fragment
    /// uniformly at random per slot. Multiple occurrences of the same slot
    /// are each resolved independently, and a drawn fragment that itself
    /// contains slots is expanded in turn.
    pub fn expand(&self, lexicon: &Lexicon, rng: &mut StdRng) -> Result<String, TemplateError> {
        self.expand_at(lexicon, rng, 0)
    }

    fn expand_at(
        &self,
        lexicon: &Lexicon,
        rng: &mut StdRng,
        depth: usize,
    ) -> Result<String, TemplateError> {
        if depth >= MAX_DEPTH {
            return Err(TemplateError::TooDeep);
        }

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Slot(name) => {
                    let fragment = draw(lexicon, name, rng)?;
                    if fragment.contains('{') || fragment.contains('}') {
                        let nested = Template::parse(fragment)?;
                        out.push_str(&nested.expand_at(lexicon, rng, depth + 1)?);
                    } else {
                        out.push_str(fragment);
                    }
                }
            }
        }
        Ok(out)
    }
}

/// Draw one fragment uniformly at random from a named pool, as an error
/// rather than an `Option`.
pub fn draw<'a>(
    lexicon: &'a Lexicon,
    pool: &str,
    rng: &mut StdRng,
) -> Result<&'a str, TemplateError> {
    let entries = lexicon
        .entries(pool)
        .ok_or_else(|| TemplateError::UnknownSlot(pool.to_string()))?;
    entries
        .choose(rng)
        .map(String::as_str)
        .ok_or_else(|| TemplateError::EmptyPool(pool.to_string()))
}

/// Named groups of parsed templates, drawn from per-group or across the
/// union of all groups.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    pub groups: FxHashMap<String, Vec<Template>>,
}

impl TemplateSet {
    /// Build a template set from static literal tables, parsing each
    /// template string up front.
    pub fn from_tables(tables: &[(&str, &[&str])]) -> Result<TemplateSet, TemplateError> {
        let mut groups = FxHashMap::default();
        for (name, entries) in tables {
            let mut templates = Vec::with_capacity(entries.len());
            for entry in *entries {
                templates.push(Template::parse(entry)?);
            }
            groups.insert(name.to_string(), templates);
        }
        Ok(TemplateSet { groups })
    }

    /// Group names in stable (sorted) order.
    pub fn group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn group_len(&self, name: &str) -> usize {
        self.groups.get(name).map_or(0, Vec::len)
    }

    /// Draw one template uniformly at random, restricted to a group when
    /// one is named, otherwise across the union of all groups.
    pub fn pick(
        &self,
        group: Option<&str>,
        rng: &mut StdRng,
    ) -> Result<&Template, TemplateError> {
        match group {
            Some(name) => {
                let templates = self
                    .groups
                    .get(name)
                    .ok_or_else(|| TemplateError::UnknownGroup(name.to_string()))?;
                templates
                    .choose(rng)
                    .ok_or_else(|| TemplateError::EmptyGroup(name.to_string()))
            }
            None => {
                // Union draw: collect in sorted group order so the same
                // seed reproduces the same template across runs.
                let mut all: Vec<&Template> = Vec::new();
                for name in self.group_names() {
                    all.extend(self.groups[name].iter());
                }
                all.choose(rng)
                    .copied()
                    .ok_or_else(|| TemplateError::EmptyGroup("<union>".to_string()))
            }
        }
    }
}
