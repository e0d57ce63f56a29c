//! Agreement summary and the ranked standings table

use serde::Serialize;

use super::{CandidateJudgment, CandidateStatus, ReferenceMove};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disagreement {
    pub name: String,
    pub raw_move: String,
    /// Legal alternative, as opposed to an illegal suggestion
    pub legal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    NoWorkingSources,
    UnanimousAgreement,
    MixedResults { agreeing: usize, working: usize },
    AllDifferent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgreementSummary {
    pub agreeing: Vec<String>,
    pub disagreeing: Vec<Disagreement>,
    pub unavailable: Vec<String>,
    pub verdict: Verdict,
}

pub fn summarize(judgments: &[CandidateJudgment]) -> AgreementSummary {
    let mut agreeing = Vec::new();
    let mut disagreeing = Vec::new();
    let mut unavailable = Vec::new();

    for j in judgments {
        match j.status {
            CandidateStatus::ExactMatch => agreeing.push(j.source_name.clone()),
            CandidateStatus::LegalAlternative | CandidateStatus::Illegal => {
                disagreeing.push(Disagreement {
                    name: j.source_name.clone(),
                    raw_move: j.raw_move.clone(),
                    legal: j.status == CandidateStatus::LegalAlternative,
                })
            }
            CandidateStatus::Unavailable => unavailable.push(j.source_name.clone()),
        }
    }

    let working = agreeing.len() + disagreeing.len();
    let verdict = if working == 0 {
        Verdict::NoWorkingSources
    } else if agreeing.len() == working {
        Verdict::UnanimousAgreement
    } else if !agreeing.is_empty() {
        Verdict::MixedResults {
            agreeing: agreeing.len(),
            working,
        }
    } else {
        Verdict::AllDifferent
    };

    AgreementSummary {
        agreeing,
        disagreeing,
        unavailable,
        verdict,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// 1-based
    pub rank: usize,
    pub name: String,
    pub raw_move: String,
    pub score: u8,
    pub is_reference: bool,
}

/// Every candidate with a move, by similarity. A usable reference heads the
/// table at 100; an unusable one trails it at 0.
pub fn standings(reference: &ReferenceMove, judgments: &[CandidateJudgment]) -> Vec<Standing> {
    let mut ranked: Vec<&CandidateJudgment> = judgments
        .iter()
        .filter(|j| j.status != CandidateStatus::Unavailable)
        .collect();
    ranked.sort_by(|a, b| b.similarity_score.cmp(&a.similarity_score));

    let reference_row = |score| Standing {
        rank: 0,
        name: reference.name.clone(),
        raw_move: reference.raw_move.clone(),
        score,
        is_reference: true,
    };
    let candidates = ranked.into_iter().map(|j| Standing {
        rank: 0,
        name: j.source_name.clone(),
        raw_move: j.raw_move.clone(),
        score: j.similarity_score,
        is_reference: false,
    });

    let mut table: Vec<Standing> = match reference.parsed_move {
        Some(_) => std::iter::once(reference_row(100)).chain(candidates).collect(),
        None => candidates.chain(std::iter::once(reference_row(0))).collect(),
    };
    for (i, standing) in table.iter_mut().enumerate() {
        standing.rank = i + 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::ChessMove;
    use std::str::FromStr;

    fn judged(name: &str, status: CandidateStatus, score: u8) -> CandidateJudgment {
        CandidateJudgment {
            source_name: name.to_string(),
            raw_move: format!("{name}-move"),
            parsed_move: None,
            status,
            issues: Vec::new(),
            similarity_score: score,
        }
    }

    #[test]
    fn test_verdicts() {
        use CandidateStatus::*;
        assert_eq!(summarize(&[]).verdict, Verdict::NoWorkingSources);
        assert_eq!(
            summarize(&[judged("A", Unavailable, 0)]).verdict,
            Verdict::NoWorkingSources
        );
        assert_eq!(
            summarize(&[judged("A", ExactMatch, 100), judged("B", Unavailable, 0)]).verdict,
            Verdict::UnanimousAgreement
        );
        assert_eq!(
            summarize(&[judged("A", ExactMatch, 100), judged("B", Illegal, 0)]).verdict,
            Verdict::MixedResults { agreeing: 1, working: 2 }
        );
        assert_eq!(
            summarize(&[judged("A", LegalAlternative, 60)]).verdict,
            Verdict::AllDifferent
        );
    }

    #[test]
    fn test_disagreements_record_legality() {
        use CandidateStatus::*;
        let summary = summarize(&[judged("A", LegalAlternative, 60), judged("B", Illegal, 0)]);
        assert!(summary.disagreeing[0].legal);
        assert!(!summary.disagreeing[1].legal);
    }

    fn reference(raw: &str, parsed: Option<&str>) -> ReferenceMove {
        ReferenceMove {
            name: "Stockfish".to_string(),
            raw_move: raw.to_string(),
            parsed_move: parsed.map(|uci| ChessMove::from_str(uci).unwrap()),
            explanation: String::new(),
        }
    }

    #[test]
    fn test_standings_order() {
        use CandidateStatus::*;
        let reference = reference("e2e4", Some("e2e4"));
        let table = standings(
            &reference,
            &[
                judged("A", LegalAlternative, 60),
                judged("B", Unavailable, 0),
                judged("C", ExactMatch, 100),
                judged("D", Illegal, 0),
                judged("E", LegalAlternative, 60),
            ],
        );
        let names: Vec<&str> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Stockfish", "C", "A", "E", "D"]);
        let ranks: Vec<usize> = table.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert!(table[0].is_reference);
        assert_eq!(table[0].score, 100);
    }

    #[test]
    fn test_unusable_reference_trails_standings() {
        use CandidateStatus::*;
        let reference = reference("Engine not available", None);
        let table = standings(
            &reference,
            &[judged("A", LegalAlternative, 30), judged("B", Illegal, 0)],
        );
        let names: Vec<&str> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "Stockfish"]);
        assert_eq!(table[0].rank, 1);
        let last = &table[2];
        assert!(last.is_reference);
        assert_eq!((last.rank, last.score), (3, 0));
    }
}
