//! Text normalization for classifier input and lexical matching.
//!
//! `normalize` is a pure function of its input: it is re-run on every
//! classification and every aspect pass, so it must never carry hidden state.
//! Steps run in a fixed order — emoji to words, contraction expansion, URL
//! stripping, charset restriction, whitespace collapse, lowercasing.

use std::sync::LazyLock;

use regex::Regex;

/// Common review emoji mapped to their descriptive names. Underscores become
/// spaces on substitution so each glyph contributes plain tokens.
const EMOJI_WORDS: &[(char, &str)] = &[
    ('😀', "grinning_face"),
    ('😊', "smiling_face"),
    ('🙂', "slightly_smiling_face"),
    ('😍', "heart_eyes"),
    ('🥰', "smiling_face_with_hearts"),
    ('😁', "beaming_face"),
    ('😃', "grinning_face_with_big_eyes"),
    ('❤', "red_heart"),
    ('💯', "hundred_points"),
    ('👍', "thumbs_up"),
    ('👎', "thumbs_down"),
    ('🙏', "folded_hands"),
    ('🎉', "party_popper"),
    ('⭐', "star"),
    ('✨', "sparkles"),
    ('🔥', "fire"),
    ('😢', "crying_face"),
    ('😭', "loudly_crying_face"),
    ('😞', "disappointed_face"),
    ('☹', "frowning_face"),
    ('😠', "angry_face"),
    ('😡', "pouting_face"),
    ('🤬', "cursing_face"),
    ('🤮', "vomiting_face"),
    ('🤢', "nauseated_face"),
    ('😷', "masked_face"),
    ('🤒', "face_with_thermometer"),
    ('💊', "pill"),
    ('🏥', "hospital"),
];

const CONTRACTIONS: &[(&str, &str)] = &[
    ("won't", "will not"),
    ("can't", "cannot"),
    ("shan't", "shall not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("isn't", "is not"),
    ("wasn't", "was not"),
    ("aren't", "are not"),
    ("weren't", "were not"),
    ("couldn't", "could not"),
    ("shouldn't", "should not"),
    ("wouldn't", "would not"),
    ("haven't", "have not"),
    ("hasn't", "has not"),
    ("hadn't", "had not"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("i'll", "i will"),
    ("i'd", "i would"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("what's", "what is"),
    ("he's", "he is"),
    ("she's", "she is"),
    ("they're", "they are"),
    ("we're", "we are"),
    ("you're", "you are"),
    ("they've", "they have"),
    ("we've", "we have"),
    ("you've", "you have"),
];

static CONTRACTION_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    CONTRACTIONS
        .iter()
        .map(|(from, to)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(from));
            (Regex::new(&pattern).expect("static contraction pattern"), *to)
        })
        .collect()
});

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("static URL pattern"));

/// Normalize raw review text into a cleaned, lowercase token stream.
///
/// Empty input yields empty output. Idempotent on already-cleaned text:
/// cleaned text contains no emoji, apostrophes, or URL syntax, so a second
/// pass finds nothing to rewrite.
pub fn normalize(text: &str) -> String {
    // Curly apostrophes would defeat contraction matching.
    let text = text.replace('\u{2019}', "'");

    let mut replaced = String::with_capacity(text.len());
    for c in text.chars() {
        match emoji_words(c) {
            Some(words) => {
                replaced.push(' ');
                replaced.push_str(words);
                replaced.push(' ');
            }
            None => replaced.push(c),
        }
    }

    let mut expanded = replaced;
    for (pattern, replacement) in CONTRACTION_PATTERNS.iter() {
        expanded = pattern.replace_all(&expanded, *replacement).into_owned();
    }

    let stripped = URL_PATTERN.replace_all(&expanded, " ");

    let filtered: String = stripped
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '!' | '?'))
        .collect();

    filtered
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn emoji_words(c: char) -> Option<&'static str> {
    static EXPANDED: LazyLock<Vec<(char, String)>> = LazyLock::new(|| {
        EMOJI_WORDS
            .iter()
            .map(|(glyph, name)| (*glyph, name.replace('_', " ")))
            .collect()
    });
    EXPANDED
        .iter()
        .find(|(glyph, _)| *glyph == c)
        .map(|(_, words)| words.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_contractions() {
        assert_eq!(
            normalize("The doctor didn't listen and I'm upset"),
            "the doctor did not listen and i am upset"
        );
    }

    #[test]
    fn expands_curly_apostrophe_contractions() {
        assert_eq!(normalize("It didn\u{2019}t help"), "it did not help");
    }

    #[test]
    fn replaces_emoji_with_words() {
        assert_eq!(normalize("great staff 👍"), "great staff thumbs up");
        assert_eq!(normalize("🏥 was awful"), "hospital was awful");
    }

    #[test]
    fn strips_urls() {
        assert_eq!(
            normalize("see https://example.com/review?id=1 for details"),
            "see for details"
        );
        assert_eq!(normalize("visit www.clinic.org today"), "visit today");
    }

    #[test]
    fn strips_symbols_but_keeps_terminal_punctuation() {
        assert_eq!(normalize("Great care!! (really) #1 @clinic"), "great care!! really 1 clinic");
        assert_eq!(normalize("Was it worth it?"), "was it worth it?");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  too \t many\n\n spaces  "), "too many spaces");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn idempotent_on_cleaned_text() {
        let samples = [
            "The nurses didn't care, waited 3 hours!! 😡 https://example.com",
            "I'm very happy with Dr. Smith's treatment 👍",
            "clean rooms & friendly staff... would recommend?",
        ];
        for raw in samples {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }
}
