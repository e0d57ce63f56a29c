//! Integration tests: multi-source consensus against a reference move.

mod common;

use common::{mv, position, START_FEN};
use move_analysis::consensus::{
    compare, Candidate, CandidateStatus, Comparator, ConsensusKind, Issue, Verdict,
};
use move_analysis::{recommend, AnalysisConfig};

fn candidates(pairs: &[(&str, &str)]) -> Vec<Candidate> {
    pairs.iter().map(|(n, m)| Candidate::new(*n, *m)).collect()
}

#[test]
fn test_scenario_one_illegal_candidate() {
    let pos = position(START_FEN);
    let report = compare(
        &pos,
        "e2e4",
        &candidates(&[("A", "e2e4"), ("B", "e7e5"), ("C", "d2d4")]),
    );

    let [a, b, c] = report.judgments.as_slice() else {
        panic!("expected three judgments");
    };
    assert_eq!((a.status, a.similarity_score), (CandidateStatus::ExactMatch, 100));
    assert_eq!((b.status, b.similarity_score), (CandidateStatus::Illegal, 0));
    assert_eq!(b.issues, vec![Issue::IllegalMove]);
    assert_eq!(c.status, CandidateStatus::LegalAlternative);
    assert!(c.similarity_score >= 30 && c.similarity_score < 100);

    assert_eq!(report.pick.kind, ConsensusKind::Majority);
    assert_eq!(report.pick.chess_move, Some(mv("e2e4")));
    assert_eq!(report.pick.supporters, vec!["Stockfish", "A"]);

    assert_eq!(report.summary.agreeing, vec!["A"]);
    assert_eq!(
        report.summary.verdict,
        Verdict::MixedResults { agreeing: 1, working: 3 }
    );
    let names: Vec<&str> = report.standings.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Stockfish", "A", "C", "B"]);
}

#[test]
fn test_illegal_candidate_does_not_affect_others() {
    let pos = position(START_FEN);
    let base = candidates(&[("A", "d2d4"), ("C", "Nf3")]);
    let mut with_illegal = base.clone();
    with_illegal.insert(1, Candidate::new("B", "e1e8"));

    let clean = compare(&pos, "e2e4", &base);
    let noisy = compare(&pos, "e2e4", &with_illegal);

    assert_eq!(noisy.judgments[0], clean.judgments[0]);
    assert_eq!(noisy.judgments[2], clean.judgments[1]);
    assert_eq!(noisy.judgments[1].status, CandidateStatus::Illegal);
    assert_eq!(noisy.judgments[1].similarity_score, 0);
    assert_eq!(noisy.pick, clean.pick);
}

#[test]
fn test_precedence_order() {
    let pos = position(START_FEN);

    let unanimous = compare(&pos, "e2e4", &candidates(&[("A", "e4"), ("B", "e2e4")]));
    assert_eq!(unanimous.pick.kind, ConsensusKind::Unanimous);
    assert_eq!(unanimous.summary.verdict, Verdict::UnanimousAgreement);

    let majority = compare(
        &pos,
        "e2e4",
        &candidates(&[("A", "d2d4"), ("B", "g1f3"), ("C", "d4")]),
    );
    assert_eq!(majority.pick.kind, ConsensusKind::Majority);
    assert_eq!(majority.pick.chess_move, Some(mv("d2d4")));
    assert_eq!(majority.pick.supporters, vec!["A", "C"]);

    let split = compare(&pos, "e2e4", &candidates(&[("A", "d2d4"), ("B", "g1f3")]));
    assert_eq!(split.pick.kind, ConsensusKind::SplitDecision);
    assert_eq!(split.pick.chess_move, Some(mv("e2e4")));
    assert_eq!(split.summary.verdict, Verdict::AllDifferent);

    let first = compare(
        &pos,
        "Analysis failed: engine crashed",
        &candidates(&[("A", "N/A"), ("B", "g1f3"), ("C", "d2d4")]),
    );
    assert_eq!(first.pick.kind, ConsensusKind::FirstAvailable);
    assert_eq!(first.pick.chess_move, Some(mv("g1f3")));

    let none = compare(&pos, "N/A", &candidates(&[("A", "error"), ("B", "e7e5")]));
    assert_eq!(none.pick.kind, ConsensusKind::NoConsensus);
    assert_eq!(none.explanation(), "No consensus possible");
}

#[test]
fn test_missed_tactics_are_reported() {
    let pos = position("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
    let report = compare(&pos, "Rxd5", &candidates(&[("A", "d1d2"), ("B", "Kf1")]));
    assert_eq!(
        report.reference.explanation,
        "Stockfish recommends this move because it captures queen, controls center."
    );
    for judgment in &report.judgments {
        assert!(
            judgment.issues.contains(&Issue::MissesCapture { piece: "queen" }),
            "{}",
            judgment.source_name
        );
    }
}

#[test]
fn test_heuristic_recommendation_votes() {
    let config = AnalysisConfig::default();
    let mut pos = position(START_FEN);
    let rec = recommend(&mut pos, &config.heuristic_name);

    let report = Comparator::from_config(&config).compare(
        &pos,
        "g1f3",
        &[
            Candidate::new("A", "Nf3"),
            Candidate::new(config.heuristic_name.clone(), rec.move_text.clone()),
        ],
    );
    assert_eq!(report.pick.kind, ConsensusKind::Unanimous);
    assert_eq!(
        report.explanation(),
        "UNANIMOUS CONSENSUS - All 3 sources recommend: g1f3"
    );

    // A terminal position's recommendation counts as unavailable
    let mut mate = position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let rec = recommend(&mut mate, &config.heuristic_name);
    let report = compare(&mate, "N/A", &[Candidate::new("H", rec.move_text)]);
    assert_eq!(report.judgments[0].status, CandidateStatus::Unavailable);
    assert_eq!(report.pick.kind, ConsensusKind::NoConsensus);
}

#[test]
fn test_unavailable_reference_report() {
    let pos = position(START_FEN);
    let report = compare(&pos, "Engine not available", &candidates(&[("A", "d2d4")]));
    let json = serde_json::to_value(&report).unwrap();

    assert!(json["reference"]["parsed_move"].is_null());
    assert_eq!(json["pick"]["kind"], "first_available");
    assert_eq!(json["pick"]["move"], "d2d4");

    let standings = json["standings"].as_array().unwrap();
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0]["name"], "A");
    assert_eq!(standings[0]["rank"], 1);
    assert_eq!(standings[0]["score"], 30);
    assert_eq!(standings[1]["name"], "Stockfish");
    assert_eq!(standings[1]["is_reference"], true);
    assert_eq!(standings[1]["score"], 0);
}
