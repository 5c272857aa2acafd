//! Uniform adapter layer over opaque classifiers.
//!
//! Each underlying model is consumed through the `Classifier` trait. Adapters
//! truncate input to the model's window, decode its free-form label into a
//! vote, and convert every failure into "vote absent" — an adapter can never
//! abort an analysis.

use tracing::debug;

use super::types::{AdapterUnavailable, PolarityVote, Sentiment, StarVote, Verdict};

/// One opaque classifier capability: given text, a label and a confidence.
///
/// Implementations are constructed once at startup and shared by all calls;
/// they must be immutable after construction.
pub trait Classifier: Send + Sync {
    /// Stable identifier used in logs.
    fn id(&self) -> &str;

    /// Maximum input length, in characters, the underlying model accepts.
    fn max_input_len(&self) -> usize {
        512
    }

    /// Classify `text` (already truncated to `max_input_len`).
    fn classify(&self, text: &str) -> Result<Verdict, AdapterUnavailable>;
}

/// Truncate on a char boundary; slicing by byte offset would panic on
/// multi-byte input.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Decode a star estimator's label into an intensity 1..=5.
///
/// Fixed decision table: explicit "very" phrases first, then plain
/// positive/negative (softened to 4 by a "somewhat" qualifier), then
/// mixed/neutral, then an embedded digit, defaulting to neutral 3.
pub(crate) fn star_from_label(label: &str) -> u8 {
    let label = label.to_lowercase();
    if label.contains("very positive") {
        return 5;
    }
    if label.contains("very negative") {
        return 1;
    }
    if label.contains("positive") {
        return if label.contains("somewhat") { 4 } else { 5 };
    }
    if label.contains("negative") {
        return 2;
    }
    if label.contains("mixed") || label.contains("neutral") {
        return 3;
    }
    if let Some(digit) = label
        .chars()
        .filter_map(|c| c.to_digit(10))
        .find(|d| (1..=5).contains(d))
    {
        return digit as u8;
    }
    3
}

/// Decode a binary estimator's label: anything starting with "pos" is
/// positive, everything else is negative.
pub(crate) fn polarity_from_label(label: &str) -> Sentiment {
    if label.to_lowercase().starts_with("pos") {
        Sentiment::Positive
    } else {
        Sentiment::Negative
    }
}

/// Adapter for the star-intensity family.
pub struct StarAdapter {
    inner: Box<dyn Classifier>,
}

impl StarAdapter {
    pub fn new(inner: Box<dyn Classifier>) -> Self {
        Self { inner }
    }

    pub fn id(&self) -> &str {
        self.inner.id()
    }

    /// Produce this estimator's vote, or `None` if the model failed.
    pub fn vote(&self, text: &str) -> Option<StarVote> {
        let snippet = truncate_chars(text, self.inner.max_input_len());
        match self.inner.classify(snippet) {
            Ok(verdict) => Some(StarVote {
                star: star_from_label(&verdict.label),
                confidence: verdict.score,
            }),
            Err(err) => {
                debug!(adapter = self.inner.id(), %err, "star estimator dropped from vote set");
                None
            }
        }
    }
}

/// Adapter for the binary-polarity family.
pub struct BinaryAdapter {
    inner: Box<dyn Classifier>,
}

impl BinaryAdapter {
    pub fn new(inner: Box<dyn Classifier>) -> Self {
        Self { inner }
    }

    pub fn id(&self) -> &str {
        self.inner.id()
    }

    /// Produce this estimator's vote, or `None` if the model failed.
    pub fn vote(&self, text: &str) -> Option<PolarityVote> {
        let snippet = truncate_chars(text, self.inner.max_input_len());
        match self.inner.classify(snippet) {
            Ok(verdict) => Some(PolarityVote {
                label: polarity_from_label(&verdict.label),
                confidence: verdict.score,
            }),
            Err(err) => {
                debug!(adapter = self.inner.id(), %err, "polarity estimator dropped from vote set");
                None
            }
        }
    }
}
