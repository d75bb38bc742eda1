//! 照合モジュール
//!
//! 1件の3値と相手側ソースの候補リストから Match / Mismatch / Not found を判定する。
//! スプレッドシート→抽出レコード、抽出レコード→スプレッドシートの両方向で個別に呼ぶ。

use crate::normalizer::NormalizedTriple;
use serde::{Deserialize, Serialize};

/// 照合ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Match,
    Mismatch,
    Missing,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 3] = [MatchStatus::Match, MatchStatus::Mismatch, MatchStatus::Missing];

    /// UI・エクスポートに表示するラベル
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Match => "Match",
            MatchStatus::Mismatch => "Mismatch",
            MatchStatus::Missing => "Not found",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 照合結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub status: MatchStatus,
    pub size_match: bool,
    pub color_match: bool,
}

impl MatchResult {
    pub fn missing() -> Self {
        Self {
            status: MatchStatus::Missing,
            size_match: false,
            color_match: false,
        }
    }

    pub fn matched() -> Self {
        Self {
            status: MatchStatus::Match,
            size_match: true,
            color_match: true,
        }
    }

    pub fn label(&self) -> &'static str {
        self.status.label()
    }
}

/// 候補として比較できる型（サイズ・カラーのみ参照）
pub trait Candidate {
    fn size(&self) -> &str;
    fn color(&self) -> &str;
}

impl Candidate for NormalizedTriple {
    fn size(&self) -> &str { &self.size }
    fn color(&self) -> &str { &self.color }
}

impl Candidate for (&str, &str) {
    fn size(&self) -> &str { self.0 }
    fn color(&self) -> &str { self.1 }
}

/// 照合ステータスを判定する
///
/// 1. UPCが空 → Not found
/// 2. 候補が無い → Not found
/// 3. サイズ・カラーが両方一致する候補がある → Match
/// 4. それ以外 → Mismatch（サイズ・カラーの一致はそれぞれ別の候補で判定）
pub fn match_status<C: Candidate>(upc: &str, size: &str, color: &str, candidates: &[C]) -> MatchResult {
    if upc.is_empty() || candidates.is_empty() {
        return MatchResult::missing();
    }

    if candidates.iter().any(|c| c.size() == size && c.color() == color) {
        return MatchResult::matched();
    }

    MatchResult {
        status: MatchStatus::Mismatch,
        size_match: candidates.iter().any(|c| c.size() == size),
        color_match: candidates.iter().any(|c| c.color() == color),
    }
}

/// 正規化済みの3値で照合
pub fn match_triple<C: Candidate>(triple: &NormalizedTriple, candidates: &[C]) -> MatchResult {
    match_status(&triple.upc, &triple.size, &triple.color, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_upc_is_missing() {
        let candidates = [("M", "RED")];
        let result = match_status("", "M", "RED", &candidates);
        assert_eq!(result, MatchResult::missing());
        assert!(!result.size_match);
        assert!(!result.color_match);
    }

    #[test]
    fn test_no_candidates_is_missing() {
        let candidates: [(&str, &str); 0] = [];
        assert_eq!(match_status("123", "M", "RED", &candidates).status, MatchStatus::Missing);
    }

    #[test]
    fn test_exact_match_wins_over_other_candidates() {
        let candidates = [("L", "BLUE"), ("M", "RED"), ("S", "GREEN")];
        let result = match_status("123", "M", "RED", &candidates);
        assert_eq!(result, MatchResult::matched());
    }

    #[test]
    fn test_flags_are_independent_under_mismatch() {
        let candidates = [("M", "RED"), ("L", "BLUE")];
        let result = match_status("123", "M", "BLUE", &candidates);
        assert_eq!(result.status, MatchStatus::Mismatch);
        assert!(result.size_match);
        assert!(result.color_match);
    }

    #[test]
    fn test_mismatch_flags() {
        let candidates = [("M", "RED")];

        let color_wrong = match_status("123", "M", "BLUE", &candidates);
        assert_eq!(color_wrong.status, MatchStatus::Mismatch);
        assert!(color_wrong.size_match);
        assert!(!color_wrong.color_match);

        let both_wrong = match_status("123", "XL", "BLUE", &candidates);
        assert!(!both_wrong.size_match);
        assert!(!both_wrong.color_match);
    }

    #[test]
    fn test_comparison_is_exact() {
        let candidates = [("M", "RED")];
        assert_eq!(match_status("1", "m", "RED", &candidates).status, MatchStatus::Mismatch);
        assert_eq!(match_status("1", "M", "RED ", &candidates).status, MatchStatus::Mismatch);
    }

    #[test]
    fn test_total_over_inputs() {
        let candidate_sets: Vec<Vec<(&str, &str)>> = vec![
            vec![],
            vec![("M", "RED")],
            vec![("S", "RED"), ("M", "BLUE")],
        ];
        for candidates in &candidate_sets {
            for upc in ["", "1"] {
                for (size, color) in [("M", "RED"), ("", ""), ("XL", "BLUE")] {
                    let result = match_status(upc, size, color, candidates);
                    let missing = upc.is_empty() || candidates.is_empty();
                    assert_eq!(result.status == MatchStatus::Missing, missing);
                }
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(MatchStatus::Match.label(), "Match");
        assert_eq!(MatchStatus::Mismatch.label(), "Mismatch");
        assert_eq!(MatchStatus::Missing.label(), "Not found");
        assert_eq!(MatchStatus::Missing.to_string(), "Not found");
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&MatchStatus::Missing).unwrap();
        assert_eq!(json, "\"missing\"");
    }
}
