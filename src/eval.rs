//! Dataset evaluation: compare analyzer predictions against a labeled CSV.
//!
//! A pure consumer of the engine's output. Loads a review/label CSV with
//! flexible column detection, runs the analyzer over each row, and produces
//! accuracy, a binary confusion matrix, and precision/recall/F1, plus the
//! first misclassifications for error analysis.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analyzer::{Analyzer, Mode, Sentiment};

/// Reviews shorter than this are skipped as unusable.
const MIN_REVIEW_LEN: usize = 5;

/// How many misclassifications are kept for analysis.
const MAX_ERRORS: usize = 20;

const REVIEW_COLUMNS: &[&str] = &["reviews", "feedback", "review", "text", "comment", "review_text"];
const LABEL_COLUMNS: &[&str] = &["labels", "sentiment label", "sentiment", "label", "sentiment_label"];

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not find review/label columns (available: {0:?})")]
    ColumnsNotFound(Vec<String>),
}

#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct ConfusionMatrix {
    pub true_positive: u64,
    pub true_negative: u64,
    pub false_positive: u64,
    pub false_negative: u64,
}

impl ConfusionMatrix {
    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[derive(Debug, Serialize)]
pub struct Misclassification {
    pub index: usize,
    /// Truncated for the report; full text stays in the dataset.
    pub review: String,
    pub preprocessed: String,
    pub original_sentiment: Sentiment,
    pub predicted_sentiment: Sentiment,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct EvalReport {
    pub run_id: Uuid,
    pub mode: Mode,
    pub total: u64,
    pub correct: u64,
    pub incorrect: u64,
    pub accuracy: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub errors: Vec<Misclassification>,
}

/// Normalize dataset labels to the binary sentiment space.
/// Handles 0/1, positive/negative, pos/neg, good/bad.
pub fn normalize_label(raw: &str) -> Option<Sentiment> {
    match raw.trim().to_lowercase().as_str() {
        "positive" | "pos" | "1" | "1.0" | "good" => Some(Sentiment::Positive),
        "negative" | "neg" | "0" | "0.0" | "bad" => Some(Sentiment::Negative),
        _ => None,
    }
}

/// Locate the review-text and label columns by header name.
pub fn detect_columns(headers: &csv::StringRecord) -> Result<(usize, usize), EvalError> {
    let mut review_col = None;
    let mut label_col = None;

    for (i, header) in headers.iter().enumerate() {
        let lower = header.trim().to_lowercase();
        if review_col.is_none() && REVIEW_COLUMNS.contains(&lower.as_str()) {
            review_col = Some(i);
        } else if label_col.is_none() && LABEL_COLUMNS.contains(&lower.as_str()) {
            label_col = Some(i);
        }
    }

    match (review_col, label_col) {
        (Some(r), Some(l)) => Ok((r, l)),
        _ => Err(EvalError::ColumnsNotFound(
            headers.iter().map(str::to_string).collect(),
        )),
    }
}

/// Evaluate the analyzer against a labeled CSV dataset.
pub fn evaluate_csv(path: &Path, analyzer: &Analyzer) -> Result<EvalReport, EvalError> {
    let mut reader = csv::Reader::from_path(path)?;
    let (review_col, label_col) = detect_columns(reader.headers()?)?;
    info!(
        dataset = %path.display(),
        review_col,
        label_col,
        mode = analyzer.mode().as_str(),
        "starting evaluation"
    );

    let mut matrix = ConfusionMatrix::default();
    let mut correct = 0u64;
    let mut incorrect = 0u64;
    let mut total = 0u64;
    let mut errors = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let review_text = record.get(review_col).unwrap_or("").trim();
        let raw_label = record.get(label_col).unwrap_or("");

        if review_text.len() < MIN_REVIEW_LEN {
            continue;
        }
        let Some(original) = normalize_label(raw_label) else {
            warn!(index, raw_label, "unrecognized label, skipping row");
            continue;
        };

        total += 1;
        if total % 25 == 0 {
            info!(processed = total, "evaluation progress");
        }

        let prediction = analyzer.analyze(review_text);
        let predicted = prediction.sentiment;

        if predicted == original {
            correct += 1;
            match predicted {
                Sentiment::Positive => matrix.true_positive += 1,
                Sentiment::Negative => matrix.true_negative += 1,
            }
        } else {
            incorrect += 1;
            match predicted {
                Sentiment::Positive => matrix.false_positive += 1,
                Sentiment::Negative => matrix.false_negative += 1,
            }
            if errors.len() < MAX_ERRORS {
                errors.push(Misclassification {
                    index,
                    review: truncate_for_report(review_text),
                    preprocessed: crate::analyzer::normalize::normalize(review_text),
                    original_sentiment: original,
                    predicted_sentiment: predicted,
                    confidence: prediction.score,
                });
            }
        }
    }

    let report = EvalReport {
        run_id: Uuid::new_v4(),
        mode: analyzer.mode(),
        total,
        correct,
        incorrect,
        accuracy: ratio(correct, total),
        precision: matrix.precision(),
        recall: matrix.recall(),
        f1: matrix.f1(),
        confusion_matrix: matrix,
        errors,
    };
    info!(
        total = report.total,
        accuracy = report.accuracy,
        "evaluation finished"
    );
    Ok(report)
}

fn truncate_for_report(text: &str) -> String {
    const LIMIT: usize = 100;
    if text.chars().count() <= LIMIT {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(LIMIT).collect();
        format!("{truncated}...")
    }
}

/// Write the report as a timestamped JSON file in `dir`, returning its path.
pub fn write_report(report: &EvalReport, dir: &Path) -> Result<PathBuf, EvalError> {
    fs::create_dir_all(dir)?;
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("evaluation_results_{timestamp}.json"));
    fs::write(&path, serde_json::to_string_pretty(report)?)?;
    info!(path = %path.display(), "evaluation report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn normalizes_label_variants() {
        assert_eq!(normalize_label("Positive"), Some(Sentiment::Positive));
        assert_eq!(normalize_label(" pos "), Some(Sentiment::Positive));
        assert_eq!(normalize_label("1"), Some(Sentiment::Positive));
        assert_eq!(normalize_label("good"), Some(Sentiment::Positive));
        assert_eq!(normalize_label("neg"), Some(Sentiment::Negative));
        assert_eq!(normalize_label("0"), Some(Sentiment::Negative));
        assert_eq!(normalize_label("mixed"), None);
    }

    #[test]
    fn detects_flexible_column_names() {
        let headers = csv::StringRecord::from(vec!["id", "Feedback", "Sentiment Label"]);
        assert_eq!(detect_columns(&headers).unwrap(), (1, 2));

        let headers = csv::StringRecord::from(vec!["reviews", "labels"]);
        assert_eq!(detect_columns(&headers).unwrap(), (0, 1));
    }

    #[test]
    fn missing_columns_is_an_error() {
        let headers = csv::StringRecord::from(vec!["a", "b"]);
        assert!(matches!(
            detect_columns(&headers),
            Err(EvalError::ColumnsNotFound(_))
        ));
    }

    #[test]
    fn confusion_matrix_metrics() {
        let matrix = ConfusionMatrix {
            true_positive: 8,
            true_negative: 6,
            false_positive: 2,
            false_negative: 4,
        };
        assert!((matrix.precision() - 0.8).abs() < 1e-9);
        assert!((matrix.recall() - 8.0 / 12.0).abs() < 1e-9);
        assert!(matrix.f1() > 0.0 && matrix.f1() < 1.0);
    }

    #[test]
    fn empty_matrix_metrics_are_zero() {
        let matrix = ConfusionMatrix::default();
        assert_eq!(matrix.precision(), 0.0);
        assert_eq!(matrix.recall(), 0.0);
        assert_eq!(matrix.f1(), 0.0);
    }

    #[test]
    fn evaluates_a_small_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("hospital.csv");
        let mut file = fs::File::create(&csv_path).unwrap();
        writeln!(file, "reviews,labels").unwrap();
        writeln!(file, "\"Excellent care, wonderful friendly staff\",1").unwrap();
        writeln!(file, "\"Terrible experience, rude staff, dirty rooms\",0").unwrap();
        writeln!(file, "\"ok\",1").unwrap(); // below min length, skipped
        writeln!(file, "\"The nurses were caring and helpful\",maybe").unwrap(); // bad label

        let analyzer = Analyzer::default();
        let report = evaluate_csv(&csv_path, &analyzer).unwrap();

        assert_eq!(report.total, 2);
        assert_eq!(report.correct, 2);
        assert_eq!(report.incorrect, 0);
        assert!((report.accuracy - 1.0).abs() < 1e-9);
        assert_eq!(report.confusion_matrix.true_positive, 1);
        assert_eq!(report.confusion_matrix.true_negative, 1);
    }

    #[test]
    fn report_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let report = EvalReport {
            run_id: Uuid::new_v4(),
            mode: Mode::Combined,
            total: 0,
            correct: 0,
            incorrect: 0,
            accuracy: 0.0,
            confusion_matrix: ConfusionMatrix::default(),
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            errors: Vec::new(),
        };
        let path = write_report(&report, dir.path()).unwrap();
        assert!(path.exists());
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("confusion_matrix"));
    }

    #[test]
    fn truncates_long_reviews_in_reports() {
        let long = "x".repeat(150);
        let truncated = truncate_for_report(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 103);
    }
}
