//! Flat-file JSON review store.
//!
//! Single-process, last-write-wins persistence: the whole review list is
//! rewritten on every mutation via a temp file rename, so a crash mid-write
//! cannot truncate the store. No transactions by design — this is a
//! batch-oriented tool, not a service-grade database.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::analyzer::{AnalysisResult, Analyzer, AspectFinding, Sentiment};
use crate::grammar;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to persist store file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// A stored review with its analysis snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub hospital_id: String,
    pub hospital_name: String,
    #[serde(default)]
    pub hospital_address: String,
    pub review_text: String,
    pub timestamp: DateTime<Utc>,
    pub overall_sentiment: Sentiment,
    pub sentiment_score: f64,
    #[serde(default = "default_star_rating")]
    pub star_rating: u8,
    pub aspects: Vec<AspectFinding>,
}

fn default_star_rating() -> u8 {
    3
}

/// Incoming review submission (analysis fields are filled in by the engine).
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    #[serde(default)]
    pub hospital_id: Option<String>,
    pub hospital_name: String,
    #[serde(default)]
    pub hospital_address: String,
    pub review_text: String,
}

pub struct ReviewStore {
    path: PathBuf,
    reviews: Vec<Review>,
}

impl ReviewStore {
    /// Open the store at `path`. A missing file is an empty store, not an
    /// error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let reviews = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        info!(path = %path.display(), count = reviews.len(), "review store opened");
        Ok(Self { path, reviews })
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Append a new review with its analysis and persist.
    ///
    /// Ids are sequential (`max + 1`); a missing hospital id defaults to
    /// `H{id:03}`.
    pub fn add(&mut self, new: NewReview, analysis: &AnalysisResult) -> Result<Review, StoreError> {
        let id = self.reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let review = Review {
            id,
            hospital_id: new.hospital_id.unwrap_or_else(|| format!("H{id:03}")),
            hospital_name: new.hospital_name,
            hospital_address: new.hospital_address,
            review_text: new.review_text,
            timestamp: Utc::now(),
            overall_sentiment: analysis.sentiment,
            sentiment_score: analysis.score,
            star_rating: analysis.star_rating,
            aspects: analysis.aspects.clone(),
        };
        self.reviews.push(review.clone());
        self.save()?;
        Ok(review)
    }

    /// Re-run the analyzer over every stored review, optionally repairing
    /// grammar first. Returns how many reviews were updated. Blank reviews
    /// are skipped.
    pub fn reanalyze_all(
        &mut self,
        analyzer: &Analyzer,
        repair_grammar: bool,
    ) -> Result<usize, StoreError> {
        let mut updated = 0;
        for review in &mut self.reviews {
            if review.review_text.trim().is_empty() {
                warn!(id = review.id, "skipping review with no text");
                continue;
            }
            if repair_grammar {
                review.review_text = grammar::repair(&review.review_text);
            }
            let analysis = analyzer.analyze(&review.review_text);
            review.overall_sentiment = analysis.sentiment;
            review.sentiment_score = analysis.score;
            review.star_rating = analysis.star_rating;
            review.aspects = analysis.aspects;
            updated += 1;
        }
        self.save()?;
        info!(updated, total = self.reviews.len(), "re-analysis complete");
        Ok(updated)
    }

    fn save(&self) -> Result<(), StoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, &self.reviews)?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}
