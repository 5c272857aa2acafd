//! Sentiment aggregation and aspect extraction engine.
//!
//! Pipeline: raw text → normalizer → {star aggregator, polarity aggregator}
//! → override rules → final sentiment; in parallel, raw text → aspect
//! extractor. The orchestrator merges both into one `AnalysisResult`.
//!
//! The engine is stateless per call. The classifier ensemble is injected at
//! construction and immutable afterwards; the analysis mode is an explicit
//! value (a default on the `Analyzer` plus a per-call override), so there is
//! no process-wide mutable flag to race on.

pub mod adapters;
pub mod aggregate;
pub mod aspects;
pub mod models;
pub mod normalize;
pub mod overrides;
pub mod types;

use tracing::debug;

use adapters::{BinaryAdapter, Classifier, StarAdapter};
use models::{
    EmphasisIntensityModel, NegationPolarityModel, PolarityLexiconModel, TermIntensityModel,
};
pub use types::{
    AdapterUnavailable, AnalysisResult, Aspect, AspectFinding, Mode, PolarityVote, Sentiment,
    StarVote, Verdict,
};

/// The review analysis engine. Construct once, share by reference.
pub struct Analyzer {
    star_adapters: Vec<StarAdapter>,
    binary_adapters: Vec<BinaryAdapter>,
    mode: Mode,
}

impl Analyzer {
    /// Build an analyzer over the built-in lexicon ensemble: two
    /// star-intensity estimators and two binary-polarity estimators.
    pub fn new(mode: Mode) -> Self {
        Self::with_adapters(
            mode,
            vec![Box::new(TermIntensityModel), Box::new(EmphasisIntensityModel)],
            vec![
                Box::new(PolarityLexiconModel),
                Box::new(NegationPolarityModel),
            ],
        )
    }

    /// Build an analyzer over an injected classifier collection. Adapter
    /// registration order is the vote order used for tie-breaking.
    pub fn with_adapters(
        mode: Mode,
        star: Vec<Box<dyn Classifier>>,
        binary: Vec<Box<dyn Classifier>>,
    ) -> Self {
        Self {
            star_adapters: star.into_iter().map(StarAdapter::new).collect(),
            binary_adapters: binary.into_iter().map(BinaryAdapter::new).collect(),
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Analyze with the analyzer's default mode.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        self.analyze_with_mode(text, self.mode)
    }

    /// Full analysis pass under an explicit mode.
    ///
    /// Never fails: adapter failures degrade to missing votes, and an empty
    /// ensemble degrades to the documented neutral defaults.
    pub fn analyze_with_mode(&self, text: &str, mode: Mode) -> AnalysisResult {
        let cleaned = normalize::normalize(text);
        if cleaned.is_empty() {
            return AnalysisResult::neutral();
        }

        // The synthetic polarity vote only exists when at least one star
        // estimator actually voted; the (3, 0.5) fallback is for the
        // star_rating field, not extra mass in the polarity decision.
        let mut star_vote: Option<(u8, f64)> = None;
        let mut star_rating = 3u8;
        if mode != Mode::Binary {
            let votes: Vec<StarVote> = self
                .star_adapters
                .iter()
                .filter_map(|adapter| adapter.vote(&cleaned))
                .collect();
            let (star, weight) = aggregate::aggregate_stars(&votes);
            star_rating = star;
            if !votes.is_empty() {
                star_vote = Some((star, weight));
            }
        }

        let binary_votes: Vec<PolarityVote> = if mode == Mode::Star {
            Vec::new()
        } else {
            self.binary_adapters
                .iter()
                .filter_map(|adapter| adapter.vote(&cleaned))
                .collect()
        };

        let (label, confidence) = aggregate::aggregate_polarity(star_vote, &binary_votes);
        let (sentiment, confidence) = overrides::apply(text, &cleaned, label, confidence);

        debug!(
            mode = mode.as_str(),
            sentiment = sentiment.as_str(),
            star_rating,
            "review analyzed"
        );

        AnalysisResult {
            sentiment,
            score: aggregate::round2(confidence),
            star_rating,
            aspects: aspects::extract_aspects(text),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Mode::Combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Test double that records how often it was invoked.
    struct CountingModel {
        label: &'static str,
        score: f64,
        calls: Arc<AtomicUsize>,
    }

    impl CountingModel {
        fn boxed(label: &'static str, score: f64, calls: Arc<AtomicUsize>) -> Box<dyn Classifier> {
            Box::new(Self {
                label,
                score,
                calls,
            })
        }
    }

    impl Classifier for CountingModel {
        fn id(&self) -> &str {
            "counting"
        }

        fn classify(&self, _text: &str) -> Result<Verdict, AdapterUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Verdict {
                label: self.label.to_string(),
                score: self.score,
            })
        }
    }

    struct FailingModel;

    impl Classifier for FailingModel {
        fn id(&self) -> &str {
            "failing"
        }

        fn classify(&self, _text: &str) -> Result<Verdict, AdapterUnavailable> {
            Err(AdapterUnavailable::new("failing", "model offline"))
        }
    }

    #[test]
    fn empty_input_yields_documented_defaults() {
        let result = Analyzer::default().analyze("");
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert!((result.score - 0.5).abs() < f64::EPSILON);
        assert_eq!(result.star_rating, 3);
        assert!(result.aspects.is_empty());
    }

    #[test]
    fn whitespace_only_input_is_treated_as_empty() {
        let result = Analyzer::default().analyze("  \n\t ");
        assert_eq!(result.star_rating, 3);
        assert!((result.score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn score_and_stars_stay_in_range() {
        let analyzer = Analyzer::default();
        let samples = [
            "Absolutely wonderful care, the staff went above and beyond!!",
            "Horrible. Dirty rooms, rude nurses, waited for hours.",
            "It was fine I guess",
            "😡😡😡 worst hospital ever, treatment failed",
            "https://example.com check this out",
        ];
        for text in samples {
            let result = analyzer.analyze(text);
            assert!((0.0..=1.0).contains(&result.score), "score for {text:?}");
            assert!((1..=5).contains(&result.star_rating), "stars for {text:?}");
            assert!(result.aspects.len() <= 4);
        }
    }

    #[test]
    fn star_mode_never_invokes_binary_adapters() {
        let star_calls = Arc::new(AtomicUsize::new(0));
        let binary_calls = Arc::new(AtomicUsize::new(0));
        let analyzer = Analyzer::with_adapters(
            Mode::Star,
            vec![CountingModel::boxed("4 stars", 0.8, star_calls.clone())],
            vec![CountingModel::boxed("positive", 0.9, binary_calls.clone())],
        );

        analyzer.analyze("the staff was friendly");

        assert_eq!(star_calls.load(Ordering::SeqCst), 1);
        assert_eq!(binary_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn binary_mode_never_invokes_star_adapters() {
        let star_calls = Arc::new(AtomicUsize::new(0));
        let binary_calls = Arc::new(AtomicUsize::new(0));
        let analyzer = Analyzer::with_adapters(
            Mode::Binary,
            vec![CountingModel::boxed("4 stars", 0.8, star_calls.clone())],
            vec![CountingModel::boxed("positive", 0.9, binary_calls.clone())],
        );

        let result = analyzer.analyze("the staff was friendly");

        assert_eq!(star_calls.load(Ordering::SeqCst), 0);
        assert_eq!(binary_calls.load(Ordering::SeqCst), 1);
        // No star estimator participated: neutral default rating.
        assert_eq!(result.star_rating, 3);
    }

    #[test]
    fn binary_mode_excludes_synthetic_star_vote() {
        // One binary vote, negative at 0.9. With a synthetic star vote the
        // mass would split; without it the decision is the binary vote alone.
        let analyzer = Analyzer::with_adapters(
            Mode::Binary,
            vec![],
            vec![CountingModel::boxed(
                "negative",
                0.9,
                Arc::new(AtomicUsize::new(0)),
            )],
        );
        let result = analyzer.analyze("some ordinary words");
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert!((result.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn all_adapters_failing_degrades_to_defaults() {
        let analyzer = Analyzer::with_adapters(
            Mode::Combined,
            vec![Box::new(FailingModel)],
            vec![Box::new(FailingModel)],
        );
        let result = analyzer.analyze("unremarkable words here");
        // Both families empty: neutral defaults all the way through.
        assert_eq!(result.star_rating, 3);
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert!((result.score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn failure_rescue_applies_end_to_end() {
        // Binary ensemble votes positive; the failure phrase plus absent
        // outcome tokens must flip the final label.
        let analyzer = Analyzer::with_adapters(
            Mode::Combined,
            vec![],
            vec![CountingModel::boxed(
                "positive",
                0.9,
                Arc::new(AtomicUsize::new(0)),
            )],
        );
        let result = analyzer.analyze("The procedure didn't help at all");
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert!(result.score >= 0.55);
    }

    #[test]
    fn outcome_rescue_applies_end_to_end() {
        let analyzer = Analyzer::with_adapters(
            Mode::Combined,
            vec![],
            vec![CountingModel::boxed(
                "negative",
                0.9,
                Arc::new(AtomicUsize::new(0)),
            )],
        );
        let result = analyzer.analyze("I was worried but I recovered fully");
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert!(result.score >= 0.55);
    }

    #[test]
    fn default_ensemble_reads_clear_reviews_correctly() {
        let analyzer = Analyzer::default();

        let praise = analyzer.analyze(
            "Excellent hospital! The staff was wonderful and caring, \
             and the treatment was very effective.",
        );
        assert_eq!(praise.sentiment, Sentiment::Positive);
        assert!(praise.star_rating >= 4);

        let complaint = analyzer.analyze(
            "Terrible experience. Rude staff, dirty rooms, and the \
             treatment was useless.",
        );
        assert_eq!(complaint.sentiment, Sentiment::Negative);
        assert!(complaint.star_rating <= 2);
    }

    #[test]
    fn score_is_rounded_to_two_decimals() {
        let analyzer = Analyzer::default();
        let result = analyzer.analyze("great friendly staff but slow service");
        assert!((result.score * 100.0 - (result.score * 100.0).round()).abs() < 1e-9);
    }
}
