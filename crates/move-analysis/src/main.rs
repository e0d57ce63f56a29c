//! Move analysis CLI
//!
//! Loads a position from FEN or a PGN file, ranks it with the heuristic
//! engine and compares the reference move with any candidate moves.

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use move_analysis::chess_core::Position;
use move_analysis::cli::{parse_args, PositionSource};
use move_analysis::config::{AnalysisConfig, OutputFormat};
use move_analysis::consensus::{Candidate, Comparator, ConsensusReport};
use move_analysis::rationale::{recommend, Recommendation};

#[derive(Serialize)]
struct AnalysisOutput {
    fen: String,
    recommendation: Recommendation,
    consensus_explanation: String,
    report: ConsensusReport,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let config = AnalysisConfig::load()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let input = match &args.source {
        PositionSource::Fen(fen) => fen.clone(),
        PositionSource::PgnFile(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read PGN file {path}"))?,
    };
    let mut position = Position::from_input(&input, args.source.format())?;
    info!(fen = %position.fen(), "Position loaded");

    let recommendation = recommend(&mut position, &config.heuristic_name);
    info!(
        engine = %recommendation.engine_name,
        chess_move = %recommendation.move_text,
        "Heuristic recommendation ready"
    );

    let mut candidates = args.candidates.clone();
    if config.include_heuristic {
        candidates.push(Candidate::new(
            config.heuristic_name.clone(),
            recommendation.move_text.clone(),
        ));
    }

    let reference = args
        .reference
        .clone()
        .unwrap_or_else(|| "Engine not available".to_string());
    let report = Comparator::from_config(&config).compare(&position, &reference, &candidates);

    let output = AnalysisOutput {
        fen: position.fen(),
        consensus_explanation: report.explanation(),
        recommendation,
        report,
    };

    match args.format.unwrap_or(config.output_format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => print_text(&output),
    }
    Ok(())
}

fn print_text(output: &AnalysisOutput) {
    let rec = &output.recommendation;
    let report = &output.report;

    println!("Position: {}", output.fen);
    println!();
    println!("{}: {}", rec.engine_name, rec.move_text);
    println!("  {}", rec.explanation);
    println!();
    println!(
        "{} (reference): {}",
        report.reference.name, report.reference.raw_move
    );
    println!("  {}", report.reference.explanation);
    println!();

    println!("{}", "=".repeat(60));
    for standing in &report.standings {
        println!(
            "#{:<2} {:<24} {:<10} {:>3}",
            standing.rank, standing.name, standing.raw_move, standing.score
        );
    }
    println!("{}", "=".repeat(60));

    for judgment in &report.judgments {
        if judgment.issues.is_empty() {
            continue;
        }
        let issues: Vec<String> = judgment.issues.iter().map(|i| i.to_string()).collect();
        println!("{}: {}", judgment.source_name, issues.join(", "));
    }
    if !report.summary.unavailable.is_empty() {
        println!("Unavailable: {}", report.summary.unavailable.join(", "));
    }
    println!();
    println!("{}", output.consensus_explanation);
}
