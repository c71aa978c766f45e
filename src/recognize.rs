//! Entity recognition engine.
//!
//! [`SemanticEngine`] applies the label rule table in order against input
//! text; every match becomes a [`NamedEntity`] with a heuristic confidence.
//! There is no deduplication across rules: a substring matching two label
//! patterns yields two entities, and both are kept.
//!
//! Recognized terms accumulate in an [`EntityCache`] owned by the engine
//! value. The cache lives exactly as long as the engine the caller
//! constructed — there is no process-wide state — and can be inspected or
//! cleared explicitly. Recognition output itself does not depend on the
//! cache; it only records what has been seen.

use std::collections::HashMap;

use anyhow::Result;

use crate::models::{EntityLabel, NamedEntity};
use crate::rules::LabelRuleSet;
use crate::text;

/// Default cap applied to recognition input, in characters. N-gram and
/// match work is linear-to-quadratic in input length, so callers get a
/// bound instead of a stall on degenerate input.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 20_000;

/// Terms recognized so far, keyed by lowercase text. Owned by the engine;
/// survives across `recognize_entities` calls until cleared.
#[derive(Debug, Default)]
pub struct EntityCache {
    entries: HashMap<String, EntityLabel>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(&term.to_lowercase())
    }

    pub fn label_of(&self, term: &str) -> Option<EntityLabel> {
        self.entries.get(&term.to_lowercase()).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn record(&mut self, term: &str, label: EntityLabel) {
        self.entries.insert(term.to_lowercase(), label);
    }
}

/// The recognition engine: compiled rule table + term cache + input bound.
///
/// Construct one per pipeline owner; there are no module-level instances.
pub struct SemanticEngine {
    rules: LabelRuleSet,
    cache: EntityCache,
    max_input_chars: usize,
}

impl SemanticEngine {
    /// Engine with the default input bound.
    pub fn new() -> Result<Self> {
        Self::with_max_input(DEFAULT_MAX_INPUT_CHARS)
    }

    /// Engine with an explicit input bound (characters).
    pub fn with_max_input(max_input_chars: usize) -> Result<Self> {
        Ok(Self {
            rules: LabelRuleSet::compile()?,
            cache: EntityCache::new(),
            max_input_chars,
        })
    }

    /// The compiled rule table (shared with the linker, classifier, and
    /// gap detector).
    pub fn rules(&self) -> &LabelRuleSet {
        &self.rules
    }

    /// Terms seen across all recognition calls on this engine.
    pub fn cache(&self) -> &EntityCache {
        &self.cache
    }

    /// Drop all cached terms.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Tag every rule match in `input`. Matches from different rules may
    /// overlap; all are returned, in rule order then position order.
    /// Empty input yields an empty vector. Input beyond the engine's
    /// character bound is ignored.
    pub fn recognize_entities(&mut self, input: &str) -> Vec<NamedEntity> {
        let input = bound_input(input, self.max_input_chars);
        if input.is_empty() {
            return Vec::new();
        }

        let mut entities = Vec::new();
        for compiled in self.rules.iter() {
            for m in compiled.regex.find_iter(input) {
                let matched = m.as_str();
                let entity = NamedEntity {
                    text: matched.to_string(),
                    label: compiled.rule.label,
                    start: m.start(),
                    end: m.end(),
                    confidence: confidence_for(matched),
                    context: text::context_around_span(input, m.start(), m.end()),
                };
                self.cache.record(matched, compiled.rule.label);
                entities.push(entity);
            }
        }
        entities
    }
}

/// Truncate at a char boundary so the regex scan stays within bounds.
fn bound_input(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &input[..byte_idx],
        None => input,
    }
}

/// Match-quality heuristic: longer, multi-word, and cased (or Arabic)
/// matches score higher. Capped at 1.0.
fn confidence_for(matched: &str) -> f64 {
    let mut confidence: f64 = 0.5;
    if matched.chars().count() > 10 {
        confidence += 0.2;
    }
    if matched.contains(' ') {
        confidence += 0.15;
    }
    let cased = matched
        .chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false);
    if cased || text::contains_arabic(matched) {
        confidence += 0.15;
    }
    confidence.min(1.0)
}
