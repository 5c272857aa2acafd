//! Built-in lexicon-backed ensemble members.
//!
//! Lightweight stand-ins for external pretrained models, so the engine and
//! its binaries work without any model process. Each one speaks the same
//! label language the adapter decision tables expect, and external
//! classifiers plug in through the identical `Classifier` trait.

use super::adapters::Classifier;
use super::types::{AdapterUnavailable, Verdict};

fn tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

fn count_hits(toks: &[&str], lexicon: &[&str]) -> usize {
    toks.iter().filter(|t| lexicon.contains(*t)).count()
}

// ───────────────────────── star-intensity family ─────────────────────────

const STRONG_POSITIVE: &[&str] = &[
    "excellent", "amazing", "outstanding", "wonderful", "fantastic", "superb",
    "exceptional", "perfect", "best",
];

const MILD_POSITIVE: &[&str] = &[
    "good", "great", "nice", "helpful", "friendly", "clean", "professional",
    "caring", "kind", "happy", "satisfied", "recommend", "recommended",
    "thorough", "attentive",
];

const STRONG_NEGATIVE: &[&str] = &[
    "horrible", "terrible", "awful", "worst", "disgusting", "unacceptable",
    "appalling", "negligent", "traumatic",
];

const MILD_NEGATIVE: &[&str] = &[
    "bad", "poor", "rude", "dirty", "slow", "disappointing", "unhelpful",
    "painful", "worse", "unprofessional", "careless", "crowded",
];

/// Star estimator built on weighted term counts. Emits the phrase labels the
/// adapter decision table decodes ("very positive", "somewhat positive", ...).
pub struct TermIntensityModel;

impl Classifier for TermIntensityModel {
    fn id(&self) -> &str {
        "term-intensity"
    }

    fn classify(&self, text: &str) -> Result<Verdict, AdapterUnavailable> {
        let toks = tokens(text);
        let pos = 2 * count_hits(&toks, STRONG_POSITIVE) + count_hits(&toks, MILD_POSITIVE);
        let neg = 2 * count_hits(&toks, STRONG_NEGATIVE) + count_hits(&toks, MILD_NEGATIVE);
        let net = pos as i64 - neg as i64;

        let label = match net {
            n if n >= 4 => "very positive",
            n if n >= 2 => "positive",
            1 => "somewhat positive",
            0 => "neutral",
            n if n <= -3 => "very negative",
            _ => "negative",
        };
        let score = (0.5 + 0.08 * net.unsigned_abs() as f64).min(0.95);
        Ok(Verdict {
            label: label.to_string(),
            score,
        })
    }
}

const INTENSIFIERS: &[&str] = &["very", "really", "extremely", "absolutely", "totally", "so"];

const POSITIVE_CUES: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "happy", "love",
    "loved", "best", "recommend",
];

const NEGATIVE_CUES: &[&str] = &[
    "bad", "terrible", "horrible", "awful", "worst", "hate", "hated",
    "disappointed", "rude", "never",
];

/// Star estimator keying on intensifiers and exclamation density around a
/// small polarity cue set. Emits digit labels ("4 stars"), exercising the
/// embedded-digit branch of the decision table.
pub struct EmphasisIntensityModel;

impl Classifier for EmphasisIntensityModel {
    fn id(&self) -> &str {
        "emphasis-intensity"
    }

    fn classify(&self, text: &str) -> Result<Verdict, AdapterUnavailable> {
        let toks = tokens(text);
        let pos = count_hits(&toks, POSITIVE_CUES);
        let neg = count_hits(&toks, NEGATIVE_CUES);
        let emphasis = count_hits(&toks, INTENSIFIERS) + text.matches('!').count();

        let star = if pos == neg {
            3
        } else if pos > neg {
            if emphasis > 0 {
                5
            } else {
                4
            }
        } else if emphasis > 0 {
            1
        } else {
            2
        };

        let margin = pos.abs_diff(neg);
        let score = if margin == 0 {
            0.5
        } else {
            (0.55 + 0.1 * margin as f64).min(0.9)
        };
        Ok(Verdict {
            label: format!("{star} stars"),
            score,
        })
    }
}

// ──────────────────────── binary-polarity family ─────────────────────────

const POLARITY_POSITIVE: &[&str] = &[
    "good", "great", "excellent", "love", "amazing", "wonderful", "happy",
    "fantastic", "awesome", "best", "friendly", "helpful", "clean",
    "recommend", "satisfied", "caring", "professional",
];

const POLARITY_NEGATIVE: &[&str] = &[
    "bad", "terrible", "awful", "hate", "horrible", "worst", "sad", "angry",
    "disappointed", "poor", "rude", "dirty", "slow", "painful", "useless",
    "unprofessional",
];

/// Hit-ratio polarity model: confidence is the winning side's share of all
/// sentiment-bearing tokens, 0.5 when nothing matched.
pub struct PolarityLexiconModel;

impl Classifier for PolarityLexiconModel {
    fn id(&self) -> &str {
        "polarity-lexicon"
    }

    fn classify(&self, text: &str) -> Result<Verdict, AdapterUnavailable> {
        let toks = tokens(text);
        let pos = count_hits(&toks, POLARITY_POSITIVE) as f64;
        let neg = count_hits(&toks, POLARITY_NEGATIVE) as f64;
        let total = pos + neg;

        let (label, score) = if total == 0.0 {
            ("positive", 0.5)
        } else if pos >= neg {
            ("positive", pos / total)
        } else {
            ("negative", neg / total)
        };
        Ok(Verdict {
            label: label.to_string(),
            score,
        })
    }
}

const NEGATORS: &[&str] = &["not", "no", "never", "without", "hardly", "barely"];

/// Polarity model with a one-token negation flip: "not good" counts against,
/// "not bad" counts for.
pub struct NegationPolarityModel;

impl Classifier for NegationPolarityModel {
    fn id(&self) -> &str {
        "negation-polarity"
    }

    fn classify(&self, text: &str) -> Result<Verdict, AdapterUnavailable> {
        let toks = tokens(text);
        let mut pos = 0usize;
        let mut neg = 0usize;

        for (i, tok) in toks.iter().enumerate() {
            let negated = i > 0 && NEGATORS.contains(&toks[i - 1]);
            if POLARITY_POSITIVE.contains(tok) {
                if negated {
                    neg += 1;
                } else {
                    pos += 1;
                }
            } else if POLARITY_NEGATIVE.contains(tok) {
                if negated {
                    pos += 1;
                } else {
                    neg += 1;
                }
            }
        }

        let total = (pos + neg) as f64;
        let (label, score) = if total == 0.0 {
            ("positive", 0.5)
        } else if pos >= neg {
            ("positive", pos as f64 / total)
        } else {
            ("negative", neg as f64 / total)
        };
        Ok(Verdict {
            label: label.to_string(),
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::adapters::star_from_label;

    #[test]
    fn term_intensity_grades_strong_praise_high() {
        let verdict = TermIntensityModel
            .classify("excellent care and wonderful friendly staff")
            .unwrap();
        assert_eq!(star_from_label(&verdict.label), 5);
        assert!(verdict.score > 0.5);
    }

    #[test]
    fn term_intensity_is_neutral_without_cues() {
        let verdict = TermIntensityModel
            .classify("i went there on a tuesday")
            .unwrap();
        assert_eq!(verdict.label, "neutral");
        assert!((verdict.score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn emphasis_model_emits_digit_labels() {
        let verdict = EmphasisIntensityModel
            .classify("really great experience!")
            .unwrap();
        assert_eq!(verdict.label, "5 stars");
        let verdict = EmphasisIntensityModel.classify("it was bad").unwrap();
        assert_eq!(verdict.label, "2 stars");
    }

    #[test]
    fn polarity_lexicon_ratio_confidence() {
        let verdict = PolarityLexiconModel
            .classify("great friendly staff but slow")
            .unwrap();
        assert_eq!(verdict.label, "positive");
        assert!((verdict.score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn negation_model_flips_negated_terms() {
        let verdict = NegationPolarityModel.classify("not good at all").unwrap();
        assert_eq!(verdict.label, "negative");
        let verdict = NegationPolarityModel.classify("not bad honestly").unwrap();
        assert_eq!(verdict.label, "positive");
    }
}
