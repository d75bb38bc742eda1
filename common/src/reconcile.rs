//! 照合処理の統合
//!
//! 1リクエスト分の処理をまとめる:
//! ヘッダー分類 → 正規化 → ソースごとのインデックス構築 → 両方向の照合

use crate::error::Result;
use crate::grid::SpreadsheetGrid;
use crate::header::{classify_headers, ColumnRole, ColumnRoleMap};
use crate::index::{build_index, UpcIndex};
use crate::matcher::{match_triple, MatchResult, MatchStatus};
use crate::normalizer::{normalize_record, normalize_row, NormalizedTriple};
use crate::types::{ExtractionResult, RecordCategory};
use serde::{Deserialize, Serialize};

/// スプレッドシート1行分の照合結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowOutcome {
    pub row: usize,
    pub triple: NormalizedTriple,
    pub care_label: MatchResult,
    pub hang_tag: MatchResult,
}

impl RowOutcome {
    pub fn result(&self, category: RecordCategory) -> MatchResult {
        match category {
            RecordCategory::CareLabel => self.care_label,
            RecordCategory::HangTag => self.hang_tag,
        }
    }
}

/// 抽出レコード1件分の照合結果（相手はスプレッドシート行）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub record: usize,
    pub triple: NormalizedTriple,
    pub result: MatchResult,
}

/// ステータス別件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub matched: usize,
    pub mismatched: usize,
    pub missing: usize,
}

impl StatusCounts {
    pub fn add(&mut self, status: MatchStatus) {
        match status {
            MatchStatus::Match => self.matched += 1,
            MatchStatus::Mismatch => self.mismatched += 1,
            MatchStatus::Missing => self.missing += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.matched + self.mismatched + self.missing
    }
}

impl FromIterator<MatchStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = MatchStatus>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for status in iter {
            counts.add(status);
        }
        counts
    }
}

/// 種別ごとの集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// 抽出レコード数
    pub records: usize,
    /// スプレッドシート行側の判定件数
    pub rows: StatusCounts,
    /// 抽出レコード側の判定件数
    pub record_statuses: StatusCounts,
}

/// 全体の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub rows: usize,
    pub care_label: CategorySummary,
    pub hang_tag: CategorySummary,
}

impl Summary {
    pub fn category(&self, category: RecordCategory) -> &CategorySummary {
        match category {
            RecordCategory::CareLabel => &self.care_label,
            RecordCategory::HangTag => &self.hang_tag,
        }
    }
}

/// 照合レポート
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub roles: ColumnRoleMap,
    pub missing_roles: Vec<ColumnRole>,
    pub rows: Vec<RowOutcome>,
    pub care_labels: Vec<RecordOutcome>,
    pub hang_tags: Vec<RecordOutcome>,
    pub summary: Summary,
}

impl ReconciliationReport {
    pub fn records(&self, category: RecordCategory) -> &[RecordOutcome] {
        match category {
            RecordCategory::CareLabel => &self.care_labels,
            RecordCategory::HangTag => &self.hang_tags,
        }
    }

    /// ステータス列を出すカテゴリ（レコードがあるもの。どちらも無ければ両方）
    pub fn active_categories(&self) -> Vec<RecordCategory> {
        let active: Vec<RecordCategory> = RecordCategory::ALL
            .iter()
            .copied()
            .filter(|c| self.summary.category(*c).records > 0)
            .collect();
        if active.is_empty() {
            RecordCategory::ALL.to_vec()
        } else {
            active
        }
    }
}

/// スプレッドシートと抽出結果を照合する
///
/// 空のスプレッドシートはエラーとし、インデックスは作らない。
pub fn reconcile(grid: &SpreadsheetGrid, extraction: &ExtractionResult) -> Result<ReconciliationReport> {
    grid.ensure_not_empty()?;
    let roles = classify_headers(&grid.headers);
    Ok(reconcile_with_roles(grid, roles, extraction))
}

/// 列の役割を指定して照合する
pub fn reconcile_with_roles(
    grid: &SpreadsheetGrid,
    roles: ColumnRoleMap,
    extraction: &ExtractionResult,
) -> ReconciliationReport {
    let sheet = build_index(&grid.rows, |i, row| normalize_row(i, row, &roles));
    let care = build_index(&extraction.care_labels, normalize_record);
    let hang = build_index(&extraction.hang_tags, normalize_record);

    let rows: Vec<RowOutcome> = sheet
        .triples()
        .iter()
        .enumerate()
        .map(|(row, triple)| RowOutcome {
            row,
            triple: triple.clone(),
            care_label: match_triple(triple, care.get(&triple.upc)),
            hang_tag: match_triple(triple, hang.get(&triple.upc)),
        })
        .collect();

    let care_labels = match_records(&care, &sheet);
    let hang_tags = match_records(&hang, &sheet);

    let summary = Summary {
        rows: rows.len(),
        care_label: CategorySummary {
            records: care_labels.len(),
            rows: rows.iter().map(|r| r.care_label.status).collect(),
            record_statuses: care_labels.iter().map(|r| r.result.status).collect(),
        },
        hang_tag: CategorySummary {
            records: hang_tags.len(),
            rows: rows.iter().map(|r| r.hang_tag.status).collect(),
            record_statuses: hang_tags.iter().map(|r| r.result.status).collect(),
        },
    };

    ReconciliationReport {
        roles,
        missing_roles: roles.missing_roles(),
        rows,
        care_labels,
        hang_tags,
        summary,
    }
}

fn match_records(records: &UpcIndex, sheet: &UpcIndex) -> Vec<RecordOutcome> {
    records
        .triples()
        .iter()
        .enumerate()
        .map(|(record, triple)| RecordOutcome {
            record,
            triple: triple.clone(),
            result: match_triple(triple, sheet.get(&triple.upc)),
        })
        .collect()
}
