//! N-gram and skip-gram extraction.
//!
//! Splits text on whitespace and builds every contiguous window of size `n`
//! (or, for skip-grams, every word pair separated by exactly `skip`
//! intervening words). `frequency` is a count of the exact phrase within
//! the same source text, so it is always >= 1 for a generated entry — a
//! known low-value metric that is preserved as-is and pinned by tests
//! rather than silently reinterpreted as corpus frequency.
//!
//! Both functions are pure: no engine state is read or written, and two
//! calls with the same input produce identical output.

use crate::models::{NGram, NamedEntity, SkipGram};
use crate::text;

/// Every contiguous window of `n` words. Returns exactly
/// `max(0, word_count - n + 1)` entries; `n == 0` yields none.
pub fn generate_ngrams(input: &str, n: usize) -> Vec<NGram> {
    let words = text::words(input);
    if n == 0 || words.len() < n {
        return Vec::new();
    }

    let mut ngrams = Vec::with_capacity(words.len() - n + 1);
    for i in 0..=words.len() - n {
        let phrase = words[i..i + n].join(" ");
        ngrams.push(NGram {
            // max(1): the joined phrase may normalize whitespace away from
            // the source form, but a generated window always occurred once.
            frequency: text::count_occurrences(input, &phrase).max(1),
            context: text::context_window(&words, i, i + n),
            text: phrase,
            size: n,
            entities: Vec::new(),
        });
    }
    ngrams
}

/// Every word pair separated by exactly `skip` intervening words.
pub fn generate_skip_grams(input: &str, skip: usize) -> Vec<SkipGram> {
    let words = text::words(input);
    let gap = skip + 1;
    if words.len() <= gap {
        return Vec::new();
    }

    let mut grams = Vec::with_capacity(words.len() - gap);
    for i in 0..words.len() - gap {
        let phrase = format!("{} {}", words[i], words[i + gap]);
        grams.push(SkipGram {
            frequency: text::count_occurrences(input, &phrase).max(1),
            context: text::context_window(&words, i, i + gap + 1),
            text: phrase,
            skip,
            entities: Vec::new(),
        });
    }
    grams
}

/// Attach the texts of `entities` that occur inside each word group.
pub fn annotate_with_entities(ngrams: &mut [NGram], entities: &[NamedEntity]) {
    for gram in ngrams.iter_mut() {
        let lower = gram.text.to_lowercase();
        gram.entities = entities
            .iter()
            .filter(|e| lower.contains(&e.text.to_lowercase()))
            .map(|e| e.text.clone())
            .collect();
    }
}
