//! Post-aggregation override rules for cases the classifiers systematically
//! get wrong in clinic reviews: treatment-failure phrasing read as polite
//! praise, and recovery stories dragged down by symptom vocabulary.

use tracing::debug;

use super::types::Sentiment;

/// Aggregated confidence is raised to at least this value when a rule fires.
const RESCUE_CONFIDENCE_FLOOR: f64 = 0.55;

/// Strong failure phrasing, matched case-insensitively against the raw text
/// (contractions intact). Both contracted and expanded forms are listed so
/// the match does not depend on the author's apostrophes.
const FAILURE_PHRASES: &[&str] = &[
    "didn't help",
    "did not help",
    "didn't work",
    "did not work",
    "didn't improve",
    "did not improve",
    "no improvement",
    "treatment failed",
    "made it worse",
    "got worse",
    "no relief",
    "waste of time",
    "waste of money",
];

/// Tokens indicating a positive clinical outcome, matched as whole tokens of
/// the cleaned text. Shared with the aspect extractor's contrast handling.
pub(crate) const OUTCOME_TOKENS: &[&str] = &[
    "treated", "improved", "fixed", "resolved", "better", "cured", "recovered",
    "healed", "healing", "recovery", "ok", "okay", "fine", "alright",
];

pub(crate) fn failure_phrase_present(raw: &str) -> bool {
    let lower = raw.replace('\u{2019}', "'").to_lowercase();
    FAILURE_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

pub(crate) fn outcome_token_present(cleaned: &str) -> bool {
    cleaned
        .split_whitespace()
        .any(|token| OUTCOME_TOKENS.contains(&token))
}

/// Apply the two rescue rules, in fixed order, to the aggregated decision.
///
/// Failure rescue: failure phrasing + aggregated `positive` + no outcome
/// token flips to `negative`. Outcome rescue: aggregated `negative` + an
/// outcome token + no failure phrasing flips to `positive`. The rules are
/// mutually exclusive by construction. Either raises confidence to at least
/// 0.55.
pub fn apply(raw: &str, cleaned: &str, label: Sentiment, confidence: f64) -> (Sentiment, f64) {
    let failure = failure_phrase_present(raw);
    let outcome = outcome_token_present(cleaned);

    if failure && label == Sentiment::Positive && !outcome {
        debug!("failure rescue: flipping aggregated positive to negative");
        return (Sentiment::Negative, confidence.max(RESCUE_CONFIDENCE_FLOOR));
    }

    if !failure && label == Sentiment::Negative && outcome {
        debug!("outcome rescue: flipping aggregated negative to positive");
        return (Sentiment::Positive, confidence.max(RESCUE_CONFIDENCE_FLOOR));
    }

    (label, confidence)
}
