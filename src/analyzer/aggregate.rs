//! Vote aggregation: star-intensity merging and weighted polarity majority.

use super::types::{PolarityVote, Sentiment, StarVote};

/// Round to two decimals for the wire format.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Merge star-intensity votes into one star value and an ensemble weight.
///
/// Each vote is weighted by its own confidence (0.5 substituted for a zero
/// confidence so a valid vote is never starved). The returned weight,
/// `min(1, total_weight / n)`, measures how confident the *set* of estimators
/// was, not any single one. No votes at all degrades to `(3, 0.5)`.
pub fn aggregate_stars(votes: &[StarVote]) -> (u8, f64) {
    if votes.is_empty() {
        return (3, 0.5);
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for vote in votes {
        let weight = if vote.confidence > 0.0 {
            vote.confidence
        } else {
            0.5
        };
        weighted_sum += vote.star as f64 * weight;
        total_weight += weight;
    }

    let star = (weighted_sum / total_weight).round().clamp(1.0, 5.0) as u8;
    let weight = (total_weight / votes.len() as f64).min(1.0);
    (star, weight)
}

/// Merge the star-derived vote and the binary votes into a final label.
///
/// The synthetic star vote (when present) goes first: `positive` iff
/// star > 3, at weight `max(0.5, star_weight)`. Confidence mass is summed
/// per label; an exact tie resolves to the *first* vote's label at that
/// vote's own confidence — a determinism rule, not a neutral default.
/// Zero votes degrades to `(positive, 0.5)`.
pub fn aggregate_polarity(
    star_vote: Option<(u8, f64)>,
    binary_votes: &[PolarityVote],
) -> (Sentiment, f64) {
    let mut votes: Vec<PolarityVote> = Vec::with_capacity(binary_votes.len() + 1);

    if let Some((star, weight)) = star_vote {
        votes.push(PolarityVote {
            label: if star > 3 {
                Sentiment::Positive
            } else {
                Sentiment::Negative
            },
            confidence: weight.max(0.5),
        });
    }
    votes.extend_from_slice(binary_votes);

    if votes.is_empty() {
        return (Sentiment::Positive, 0.5);
    }

    let positive_mass: f64 = votes
        .iter()
        .filter(|v| v.label == Sentiment::Positive)
        .map(|v| v.confidence)
        .sum();
    let negative_mass: f64 = votes
        .iter()
        .filter(|v| v.label == Sentiment::Negative)
        .map(|v| v.confidence)
        .sum();

    if positive_mass == negative_mass {
        let first = votes[0];
        return (first.label, round2(first.confidence));
    }

    let (label, mass) = if positive_mass > negative_mass {
        (Sentiment::Positive, positive_mass)
    } else {
        (Sentiment::Negative, negative_mass)
    };
    (label, round2(mass / (positive_mass + negative_mass)))
}
