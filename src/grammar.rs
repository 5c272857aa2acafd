//! Deterministic grammar and spelling repair for stored review text.
//!
//! Pure regex rewriting, no ML: spacing/punctuation normalization, a fixed
//! misspelling table tuned on the review corpus, and sentence
//! capitalization. Used by the store's maintenance pass before re-analysis.

use std::sync::LazyLock;

use regex::Regex;

struct Rewrite {
    pattern: Regex,
    replacement: &'static str,
}

fn rewrite(pattern: &str, replacement: &'static str) -> Rewrite {
    Rewrite {
        pattern: Regex::new(pattern).expect("static rewrite pattern"),
        replacement,
    }
}

/// Spacing repairs: concatenated words, missing spaces after punctuation,
/// glued letter/digit runs.
static SPACING_FIXES: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    vec![
        rewrite(r"\s+", " "),
        rewrite(r"([a-z])([A-Z])", "$1 $2"),
        rewrite(r"([A-Za-z])([,;:.!?])([A-Za-z])", "$1$2 $3"),
        rewrite(r"([A-Za-z])(\d)", "$1 $2"),
        rewrite(r"(\d)([A-Za-z])", "$1 $2"),
    ]
});

/// Misspellings observed in the review corpus.
static SPELLING_FIXES: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    vec![
        rewrite(r"(?i)\bavilable\b", "available"),
        rewrite(r"(?i)\bremondening\b", "recommending"),
        rewrite(r"(?i)\bremonding\b", "recommending"),
        rewrite(r"(?i)\bremonded\b", "recommended"),
        rewrite(r"(?i)\brecomended\b", "recommended"),
        rewrite(r"(?i)\batleast\b", "at least"),
        rewrite(r"(?i)\bmobnumber\b", "mobile number"),
        rewrite(r"(?i)\beffected\b", "affected"),
        rewrite(r"(?i)\bacurate\b", "accurate"),
        rewrite(r"(?i)\bsitings\b", "sittings"),
        rewrite(r"(?i)\blaringitis\b", "laryngitis"),
        rewrite(r"(?i)\bsomes\b", "some"),
        rewrite(r"(?i)\bpeoples\b", "people"),
        rewrite(r"(?i)\bmy self\b", "myself"),
        rewrite(r"(?i)\bi have been having\b", "I have had"),
        rewrite(r"(?i)\bwasn't\b", "was not"),
        rewrite(r"(?i)\bdon't\b", "do not"),
        rewrite(r"(?i)\bdoesn't\b", "does not"),
        rewrite(r"(?i)\bdidn't\b", "did not"),
    ]
});

static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,!?])").expect("static punctuation pattern"));

static SENTENCE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])\s*([a-z])").expect("static sentence pattern"));

/// Repair spacing, spelling, and capitalization in review text.
/// Deterministic: the same input always produces the same output.
pub fn repair(text: &str) -> String {
    let mut fixed = text.to_string();

    for fix in SPACING_FIXES.iter() {
        fixed = fix.pattern.replace_all(&fixed, fix.replacement).into_owned();
    }
    for fix in SPELLING_FIXES.iter() {
        fixed = fix.pattern.replace_all(&fixed, fix.replacement).into_owned();
    }

    fixed = fixed.trim().to_string();
    fixed = SPACE_BEFORE_PUNCTUATION
        .replace_all(&fixed, "$1")
        .into_owned();
    fixed = SENTENCE_START
        .replace_all(&fixed, |caps: &regex::Captures<'_>| {
            format!("{} {}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned();

    capitalize_first(&fixed)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
