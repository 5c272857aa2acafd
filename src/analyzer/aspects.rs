//! Aspect-level sentiment extraction.
//!
//! Pure lexicon model over sentence windows: each aspect profile carries a
//! keyword set, positive/negative term sets, bonus phrase lists, and negation
//! hooks. Sentences that mention an aspect are scored independently; per-
//! aspect totals are ranked by strength and trimmed to the top four.

use std::cmp::Ordering;

use super::overrides::OUTCOME_TOKENS;
use super::types::{Aspect, AspectFinding, Sentiment};

/// Score contributed by a bonus phrase hit.
const PHRASE_BONUS: f64 = 1.5;
/// Score contributed by a single lexicon term hit.
const TERM_HIT: f64 = 1.0;
/// Score contributed by a negation hook or deficit match.
const STRONG_HIT: f64 = 2.0;
/// Multiplier applied to the negative score of a concession clause.
const CONTRAST_SOFTENING: f64 = 0.6;
/// Findings at or below this strength are treated as noise.
const NOISE_FLOOR: f64 = 0.5;
/// How many tokens before a keyword the deficit scan looks at.
const DEFICIT_WINDOW: usize = 2;
/// Maximum findings emitted per review.
const MAX_FINDINGS: usize = 4;

struct AspectProfile {
    aspect: Aspect,
    keywords: &'static [&'static str],
    positive_terms: &'static [&'static str],
    negative_terms: &'static [&'static str],
    bonus_positive: &'static [&'static str],
    bonus_negative: &'static [&'static str],
    negation_hooks: &'static [&'static str],
}

/// Profiles in insertion order; this order is the ranking tie-break.
const PROFILES: [AspectProfile; 4] = [
    AspectProfile {
        aspect: Aspect::Staff,
        keywords: &[
            "staff", "doctor", "doctors", "nurse", "nurses", "personnel",
            "employee", "employees", "receptionist", "surgeon", "physician",
        ],
        positive_terms: &[
            "friendly", "kind", "helpful", "caring", "polite", "attentive",
            "professional", "courteous", "compassionate", "knowledgeable",
            "respectful",
        ],
        negative_terms: &[
            "rude", "unfriendly", "dismissive", "arrogant", "unprofessional",
            "impatient", "cold", "careless", "unhelpful", "indifferent",
            "condescending",
        ],
        bonus_positive: &[
            "went above and beyond",
            "very helpful",
            "extremely friendly",
            "took the time",
            "listened to me",
        ],
        bonus_negative: &[
            "did not listen",
            "didn't listen",
            "talked down to",
            "ignored me",
            "brushed me off",
        ],
        negation_hooks: &[
            "not helpful",
            "not friendly",
            "not professional",
            "no compassion",
            "never listened",
        ],
    },
    AspectProfile {
        aspect: Aspect::Cleanliness,
        keywords: &[
            "clean", "dirty", "hygiene", "sanitary", "tidy", "messy",
            "spotless", "filthy", "room", "rooms", "bathroom", "facility",
        ],
        positive_terms: &[
            "clean", "spotless", "tidy", "sanitary", "hygienic", "immaculate",
            "fresh", "sterile", "neat",
        ],
        negative_terms: &[
            "dirty", "filthy", "messy", "unsanitary", "unhygienic", "smelly",
            "stained", "dusty", "grimy",
        ],
        bonus_positive: &["very clean", "well maintained", "spotlessly clean"],
        bonus_negative: &["poor hygiene", "smelled bad", "never cleaned"],
        negation_hooks: &["not clean", "not sanitary", "not tidy", "lack of hygiene"],
    },
    AspectProfile {
        aspect: Aspect::WaitTime,
        keywords: &[
            "wait", "waiting", "waited", "delay", "delayed", "queue", "hours",
            "time", "appointment", "schedule",
        ],
        positive_terms: &[
            "quick", "quickly", "fast", "prompt", "promptly", "short",
            "efficient", "punctual", "timely", "immediate",
        ],
        negative_terms: &[
            "long", "slow", "delayed", "endless", "forever", "crowded",
            "late", "overbooked",
        ],
        bonus_positive: &[
            "no wait",
            "no waiting",
            "seen quickly",
            "right on time",
            "seen immediately",
        ],
        bonus_negative: &[
            "waited for hours",
            "long wait",
            "kept waiting",
            "hours of waiting",
            "waited over an hour",
        ],
        negation_hooks: &["never on time", "not worth the wait", "no respect for my time"],
    },
    AspectProfile {
        aspect: Aspect::Treatment,
        keywords: &[
            "treatment", "care", "diagnosis", "therapy", "medicine",
            "medication", "prescription", "procedure", "surgery", "results",
        ],
        positive_terms: &[
            "effective", "excellent", "successful", "thorough", "accurate",
            "painless", "improved", "recovered", "cured", "relief", "gentle",
        ],
        negative_terms: &[
            "ineffective", "wrong", "misdiagnosed", "failed", "useless",
            "painful", "worse", "complications", "botched", "unnecessary",
        ],
        bonus_positive: &[
            "fully recovered",
            "worked wonders",
            "correct diagnosis",
            "completely healed",
            "pain free",
        ],
        bonus_negative: &[
            "did not work",
            "didn't work",
            "did not help",
            "didn't help",
            "made it worse",
            "wrong diagnosis",
            "no improvement",
        ],
        negation_hooks: &["not effective", "no relief", "never improved", "not helped"],
    },
];

/// Lexical cues that an aspect's resource is insufficient: they bias the
/// aspect negative even without an explicit negative adjective.
const DEFICIT_TERMS: &[&str] = &[
    "lack", "lacks", "lacked", "lacking", "shortage", "missing", "absent",
    "insufficient", "inadequate", "without", "no",
];

const CONTRAST_MARKERS: &[&str] = &["but", "though", "however", "yet"];

/// Extract up to four aspect findings from raw review text, strongest first.
pub fn extract_aspects(raw_text: &str) -> Vec<AspectFinding> {
    let sentences: Vec<String> = raw_text
        .replace('\u{2019}', "'")
        .split(['.', '!', '?', '\n'])
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let mut ranked: Vec<(Aspect, Sentiment, f64)> = Vec::new();

    for profile in &PROFILES {
        let mut positive_total = 0.0;
        let mut negative_total = 0.0;
        let mut hits = 0u32;

        for sentence in &sentences {
            let toks = tokenize(sentence);
            if !toks.iter().any(|t| profile.keywords.contains(t)) {
                continue;
            }
            let (positive, negative) = score_sentence(profile, sentence, &toks);
            positive_total += positive;
            negative_total += negative;
            hits += 1;
        }

        if positive_total + negative_total == 0.0 {
            continue;
        }

        let diff = positive_total - negative_total;
        let sentiment = if diff > 0.0 {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        };
        let strength = diff.abs() + 0.3 * hits as f64;
        if strength <= NOISE_FLOOR {
            continue;
        }
        ranked.push((profile.aspect, sentiment, strength));
    }

    // Stable sort: equal strengths keep profile insertion order.
    ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));
    ranked.truncate(MAX_FINDINGS);
    ranked
        .into_iter()
        .map(|(aspect, sentiment, _)| AspectFinding { aspect, sentiment })
        .collect()
}

fn tokenize(sentence: &str) -> Vec<&str> {
    sentence
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Score one sentence against one aspect profile.
fn score_sentence(profile: &AspectProfile, sentence: &str, toks: &[&str]) -> (f64, f64) {
    let mut positive = 0.0;
    let mut negative = 0.0;

    for phrase in profile.bonus_positive {
        if sentence.contains(phrase) {
            positive += PHRASE_BONUS;
        }
    }
    for phrase in profile.bonus_negative {
        if sentence.contains(phrase) {
            negative += PHRASE_BONUS;
        }
    }

    for tok in toks {
        if profile.positive_terms.contains(tok) {
            positive += TERM_HIT;
        }
        if profile.negative_terms.contains(tok) {
            negative += TERM_HIT;
        }
    }

    for hook in profile.negation_hooks {
        if sentence.contains(hook) {
            negative += STRONG_HIT;
        }
    }

    // Deficit lookbehind: "lack of staff" reads negative even with no
    // negative adjective, unless a positive/outcome term sits in the same
    // window ("no better staff" stays unscored).
    for (i, tok) in toks.iter().enumerate() {
        if !profile.keywords.contains(tok) {
            continue;
        }
        let window = &toks[i.saturating_sub(DEFICIT_WINDOW)..i];
        let deficit = window.iter().any(|w| DEFICIT_TERMS.contains(w));
        let vetoed = window
            .iter()
            .any(|w| profile.positive_terms.contains(w) || OUTCOME_TOKENS.contains(w));
        if deficit && !vetoed {
            negative += STRONG_HIT;
        }
    }

    // A concession clause should not dominate: soften the negative side when
    // both polarities fired and the sentence carries a contrast marker or a
    // positive-outcome token.
    if positive > 0.0 && negative > 0.0 {
        let concession = toks
            .iter()
            .any(|t| CONTRAST_MARKERS.contains(t) || OUTCOME_TOKENS.contains(t));
        if concession {
            negative *= CONTRAST_SOFTENING;
        }
    }

    (positive, negative)
}
