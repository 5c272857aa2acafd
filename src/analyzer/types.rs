//! Core data types for the sentiment engine.
//!
//! Everything here is either part of the wire format (`AnalysisResult` and
//! friends, serialized as lowercase JSON) or a transient vote record that
//! lives for the duration of one `analyze` call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Overall review polarity. Binary by design: the upstream datasets carry no
/// neutral class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which estimator families participate in a call.
///
/// `Combined` runs both families. `Star` decides from the star ensemble
/// alone; `Binary` excludes the star path entirely (no synthetic star vote).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Combined,
    Binary,
    Star,
}

impl Mode {
    /// Parse a mode name. Unrecognized values (including empty) fall back to
    /// `Combined` rather than erroring.
    pub fn parse(name: &str) -> Mode {
        match name.trim().to_lowercase().as_str() {
            "binary" => Mode::Binary,
            "star" => Mode::Star,
            _ => Mode::Combined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Combined => "combined",
            Mode::Binary => "binary",
            Mode::Star => "star",
        }
    }
}

/// Raw output of one underlying classifier: a free-form label plus a
/// confidence in `[0, 1]`. Label decoding happens in the adapter layer.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub label: String,
    pub score: f64,
}

/// One star-intensity opinion after label decoding.
#[derive(Debug, Clone, Copy)]
pub struct StarVote {
    pub star: u8,
    pub confidence: f64,
}

/// One binary-polarity opinion after label decoding.
#[derive(Debug, Clone, Copy)]
pub struct PolarityVote {
    pub label: Sentiment,
    pub confidence: f64,
}

/// An individual classifier call failed. Recovered locally by dropping that
/// adapter's vote from the set; never surfaced to the caller.
#[derive(Debug, Error)]
#[error("classifier '{source_id}' unavailable: {reason}")]
pub struct AdapterUnavailable {
    pub source_id: String,
    pub reason: String,
}

impl AdapterUnavailable {
    pub fn new(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            reason: reason.into(),
        }
    }
}

/// Aspect categories scored independently by the extractor.
///
/// Declaration order is the ranking tie-break order: staff, cleanliness,
/// wait_time, treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    Staff,
    Cleanliness,
    WaitTime,
    Treatment,
}

impl Aspect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::Staff => "staff",
            Aspect::Cleanliness => "cleanliness",
            Aspect::WaitTime => "wait_time",
            Aspect::Treatment => "treatment",
        }
    }
}

/// One ranked aspect-level finding. Ranking strength stays internal to the
/// extractor; only the category and its polarity are emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectFinding {
    pub aspect: Aspect,
    pub sentiment: Sentiment,
}

/// The engine's sole externally visible output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// Confidence in `[0, 1]`, rounded to two decimals.
    pub score: f64,
    /// Star intensity in `1..=5`; 3 when no star estimator participated.
    pub star_rating: u8,
    /// At most four findings, strongest first.
    pub aspects: Vec<AspectFinding>,
}

impl AnalysisResult {
    /// The documented defaults, returned for empty input and total ensemble
    /// failure.
    pub fn neutral() -> Self {
        Self {
            sentiment: Sentiment::Positive,
            score: 0.5,
            star_rating: 3,
            aspects: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parse_recognizes_known_names() {
        assert_eq!(Mode::parse("combined"), Mode::Combined);
        assert_eq!(Mode::parse("binary"), Mode::Binary);
        assert_eq!(Mode::parse("star"), Mode::Star);
        assert_eq!(Mode::parse(" STAR "), Mode::Star);
    }

    #[test]
    fn mode_parse_falls_back_to_combined() {
        assert_eq!(Mode::parse(""), Mode::Combined);
        assert_eq!(Mode::parse("ensemble"), Mode::Combined);
        assert_eq!(Mode::parse("null"), Mode::Combined);
    }

    #[test]
    fn sentiment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"positive\""
        );
        assert_eq!(
            serde_json::to_string(&Sentiment::Negative).unwrap(),
            "\"negative\""
        );
    }

    #[test]
    fn aspect_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Aspect::WaitTime).unwrap(),
            "\"wait_time\""
        );
    }

    #[test]
    fn analysis_result_wire_shape() {
        let result = AnalysisResult {
            sentiment: Sentiment::Negative,
            score: 0.87,
            star_rating: 2,
            aspects: vec![AspectFinding {
                aspect: Aspect::Staff,
                sentiment: Sentiment::Negative,
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sentiment"], "negative");
        assert_eq!(json["score"], 0.87);
        assert_eq!(json["star_rating"], 2);
        assert_eq!(json["aspects"][0]["aspect"], "staff");
    }
}
