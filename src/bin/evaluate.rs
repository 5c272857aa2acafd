//! Evaluate the analyzer against a labeled review dataset.
//!
//! Prints accuracy, a confusion matrix, and precision/recall/F1, and writes
//! a timestamped JSON report next to the dataset.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use careview::analyzer::{Analyzer, Mode};
use careview::config;
use careview::eval::{self, EvalReport};

#[derive(Parser)]
#[command(name = "evaluate", version, about = "Evaluate the analyzer against a labeled review dataset")]
struct Args {
    /// Path to the labeled CSV dataset (review text + sentiment label)
    #[arg(default_value = "original_dataset/hospital.csv")]
    dataset: PathBuf,

    /// Analysis mode for this run; unknown names fall back to combined
    #[arg(long, env = "ANALYSIS_MODE", default_value = "combined")]
    mode: String,

    /// Directory for the JSON results file
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let args = Args::parse();
    let mode = Mode::parse(&args.mode);
    let analyzer = Analyzer::new(mode);

    println!("Hospital Review Model Evaluation");
    println!("Analysis mode: {}", mode.as_str());
    println!();

    let report = match eval::evaluate_csv(&args.dataset, &analyzer) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Evaluation failed: {err}");
            std::process::exit(1);
        }
    };

    print_report(&report);

    match eval::write_report(&report, &args.out_dir) {
        Ok(path) => println!("\nFull results saved to: {}", path.display()),
        Err(err) => {
            eprintln!("Failed to write report: {err}");
            std::process::exit(1);
        }
    }
}

fn print_report(report: &EvalReport) {
    println!("Overall performance:");
    println!("  Total reviews:  {}", report.total);
    println!("  Correct:        {}", report.correct);
    println!("  Incorrect:      {}", report.incorrect);
    println!("  Accuracy:       {:.2}%", report.accuracy * 100.0);

    let m = &report.confusion_matrix;
    println!("\nConfusion matrix:");
    println!("                    Predicted");
    println!("                Positive  Negative");
    println!(
        "  Actual Positive    {:4}      {:4}",
        m.true_positive, m.false_negative
    );
    println!(
        "  Actual Negative    {:4}      {:4}",
        m.false_positive, m.true_negative
    );

    println!("\nDetailed metrics:");
    println!("  Precision: {:.2}%", report.precision * 100.0);
    println!("  Recall:    {:.2}%", report.recall * 100.0);
    println!("  F1 score:  {:.2}%", report.f1 * 100.0);

    if !report.errors.is_empty() {
        println!(
            "\nSample misclassifications (first {}):",
            report.errors.len()
        );
        for (i, error) in report.errors.iter().take(10).enumerate() {
            println!("\n  {}. Review: {}", i + 1, error.review);
            println!("     Original:  {}", error.original_sentiment);
            println!(
                "     Predicted: {} (confidence: {})",
                error.predicted_sentiment, error.confidence
            );
        }
    }
}
