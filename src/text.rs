//! Small text helpers shared across the pipeline.
//!
//! Whitespace tokenization, context windows, slugging, HTML escaping, and
//! the sentence-shortening pass used by the assembler. All functions here
//! are pure; same input, same output.

/// Number of words kept on each side of a span when building context.
pub const CONTEXT_WORDS: usize = 3;

/// Split on whitespace. Empty input yields an empty vector.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Context window around the word range `[from, to)`: up to
/// [`CONTEXT_WORDS`] words on each side, joined with single spaces.
pub fn context_window(words: &[&str], from: usize, to: usize) -> String {
    let lo = from.saturating_sub(CONTEXT_WORDS);
    let hi = (to + CONTEXT_WORDS).min(words.len());
    words[lo..hi].join(" ")
}

/// Context around a byte span of `text`: the words overlapping the span
/// plus up to [`CONTEXT_WORDS`] on each side.
pub fn context_around_span(text: &str, start: usize, end: usize) -> String {
    let mut offsets = Vec::new();
    let mut pos = 0;
    for w in text.split_whitespace() {
        // split_whitespace drops offsets, so rediscover each word's start
        let found = text[pos..].find(w).map(|i| pos + i).unwrap_or(pos);
        offsets.push((found, found + w.len()));
        pos = found + w.len();
    }

    let first = offsets.iter().position(|&(_, e)| e > start);
    let last = offsets.iter().rposition(|&(s, _)| s < end);
    match (first, last) {
        (Some(f), Some(l)) if f <= l => {
            let ws: Vec<&str> = text.split_whitespace().collect();
            context_window(&ws, f, l + 1)
        }
        _ => String::new(),
    }
}

/// Count non-overlapping occurrences of `phrase` in `text`,
/// case-insensitively. Zero for an empty phrase.
pub fn count_occurrences(text: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    let haystack = text.to_lowercase();
    let needle = phrase.to_lowercase();
    let mut count = 0;
    let mut at = 0;
    while let Some(i) = haystack[at..].find(&needle) {
        count += 1;
        at += i + needle.len();
    }
    count
}

/// URL slug: lowercase, non-alphanumeric runs collapsed to a single `-`.
/// Arabic letters count as alphanumeric and are preserved.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Percent-encode a query-string value. Unreserved characters (RFC 3986)
/// pass through; everything else is encoded byte-wise.
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// Escape text for interpolation into HTML element content or attributes.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// True if any character of `text` is in the Arabic script block.
pub fn contains_arabic(text: &str) -> bool {
    text.chars()
        .any(|c| ('\u{0600}'..='\u{06FF}').contains(&c) || ('\u{0750}'..='\u{077F}').contains(&c))
}

/// Shorten every sentence of `text` to at most `max_words` words,
/// preserving the terminating punctuation. Sentences end at `.`, `!`, `?`
/// or the Arabic question mark.
pub fn shorten_sentences(text: &str, max_words: usize) -> String {
    if max_words == 0 {
        return String::new();
    }
    let mut out = String::with_capacity(text.len());
    let mut sentence = String::new();
    for c in text.chars() {
        sentence.push(c);
        if matches!(c, '.' | '!' | '?' | '؟') {
            out.push_str(&truncate_sentence(&sentence, max_words));
            sentence.clear();
        }
    }
    if !sentence.trim().is_empty() {
        out.push_str(&truncate_sentence(&sentence, max_words));
    }
    out
}

fn truncate_sentence(sentence: &str, max_words: usize) -> String {
    let trimmed = sentence.trim_end();
    let terminator = trimmed
        .chars()
        .last()
        .filter(|c| matches!(c, '.' | '!' | '?' | '؟'));
    let body = match terminator {
        Some(t) => &trimmed[..trimmed.len() - t.len_utf8()],
        None => trimmed,
    };

    let ws: Vec<&str> = body.split_whitespace().collect();
    let leading = if sentence.starts_with(char::is_whitespace) {
        " "
    } else {
        ""
    };
    if ws.len() <= max_words {
        return format!("{}{}", leading, sentence.trim_start());
    }
    let mut short = ws[..max_words].join(" ");
    if let Some(t) = terminator {
        short.push(t);
    }
    format!("{}{}", leading, short)
}
