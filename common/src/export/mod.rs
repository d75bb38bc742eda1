//! エクスポート用の装飾プラン
//!
//! 照合結果から「どの行・どのセルをどのステータス色にするか」を決める。
//! 実際の色値は `Palette` で差し替え可能で、ファイル形式への書き出しは excel_core が担当する。

#[cfg(feature = "excel")]
pub mod excel_core;

use crate::grid::SpreadsheetGrid;
use crate::matcher::{MatchResult, MatchStatus};
use crate::reconcile::{ReconciliationReport, RecordOutcome};
use crate::types::{RawRecord, RecordCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// スプレッドシートシート名
pub const SPREADSHEET_SHEET_NAME: &str = "Spreadsheet";

/// 抽出レコードシートのステータス列見出し
pub const RECORD_STATUS_HEADER: &str = "Status";

/// 抽出レコードシートの固定列（キー, 見出し）
pub const RECORD_COLUMNS: &[(&str, &str)] = &[
    ("style_number", "Style Number"),
    ("size", "Size"),
    ("color", "Color"),
    ("upc", "UPC"),
];

/// ステータス色（0xRRGGBB）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub matched: u32,
    pub mismatched: u32,
    pub missing: u32,
    /// 不一致フィールドのセル強調色
    pub accent: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            matched: 0xC6EFCE,    // light green
            mismatched: 0xFFC7CE, // light red
            missing: 0xFFEB9C,    // light amber
            accent: 0xFF5B5B,
        }
    }
}

impl Palette {
    pub fn status_color(&self, status: MatchStatus) -> u32 {
        match status {
            MatchStatus::Match => self.matched,
            MatchStatus::Mismatch => self.mismatched,
            MatchStatus::Missing => self.missing,
        }
    }

    pub fn fill_color(&self, fill: Fill) -> Option<u32> {
        match fill {
            Fill::None => None,
            Fill::Status(status) => Some(self.status_color(status)),
            Fill::Accent => Some(self.accent),
        }
    }
}

/// セルの塗り
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fill {
    None,
    Status(MatchStatus),
    Accent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub value: String,
    /// ステータス列のセルは行ではなく自身のステータス色
    pub status: Option<MatchStatus>,
    pub accent: bool,
}

impl StyledCell {
    fn plain(value: String) -> Self {
        Self { value, status: None, accent: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRow {
    pub cells: Vec<StyledCell>,
    pub fill: Option<MatchStatus>,
}

impl StyledRow {
    /// セルの塗り（強調 > 自身のステータス > 行の塗り）
    pub fn cell_fill(&self, column: usize) -> Fill {
        match self.cells.get(column) {
            Some(cell) if cell.accent => Fill::Accent,
            Some(StyledCell { status: Some(status), .. }) => Fill::Status(*status),
            Some(_) => self.fill.map(Fill::Status).unwrap_or(Fill::None),
            None => Fill::None,
        }
    }

    pub fn accented_columns(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.accent)
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<StyledRow>,
}

/// 出力上のサイズ・カラー列位置（強調対象）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldColumns {
    pub size: Option<usize>,
    pub color: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// ヘッダー・値ともに空の列を除外（UPC列以前は常に残す）
    pub drop_empty_columns: bool,
}

/// 複数カテゴリの結果から行の塗りを決める（Mismatch > Not found > Match）
pub fn combined_status(results: &[MatchResult]) -> Option<MatchStatus> {
    if results.is_empty() {
        return None;
    }
    if results.iter().any(|r| r.status == MatchStatus::Mismatch) {
        Some(MatchStatus::Mismatch)
    } else if results.iter().any(|r| r.status == MatchStatus::Missing) {
        Some(MatchStatus::Missing)
    } else {
        Some(MatchStatus::Match)
    }
}

/// 行ごとの結果から装飾済みシートを作る
///
/// `results[i]` は `rows[i]` の結果で、ステータス列（`status_headers`）ごとに1つ。
/// Mismatch の結果はサイズ・カラー列の不一致セルを強調する。
pub fn annotate(
    name: &str,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    results: &[Vec<MatchResult>],
    status_headers: &[&str],
    fields: FieldColumns,
) -> StyledSheet {
    let mut all_headers = headers;
    all_headers.extend(status_headers.iter().map(|h| h.to_string()));

    let styled_rows = rows
        .into_iter()
        .zip(results.iter())
        .map(|(row, row_results)| {
            let mut cells: Vec<StyledCell> = row.into_iter().map(StyledCell::plain).collect();

            for result in row_results.iter().filter(|r| r.status == MatchStatus::Mismatch) {
                if !result.size_match {
                    mark_accent(&mut cells, fields.size);
                }
                if !result.color_match {
                    mark_accent(&mut cells, fields.color);
                }
            }

            cells.extend(row_results.iter().map(|r| StyledCell {
                value: r.label().to_string(),
                status: Some(r.status),
                accent: false,
            }));

            StyledRow {
                cells,
                fill: combined_status(row_results),
            }
        })
        .collect();

    StyledSheet {
        name: name.to_string(),
        headers: all_headers,
        rows: styled_rows,
    }
}

fn mark_accent(cells: &mut [StyledCell], column: Option<usize>) {
    if let Some(cell) = column.and_then(|c| cells.get_mut(c)) {
        cell.accent = true;
    }
}

/// 表示する列番号を返す
///
/// ヘッダーも値もすべて空の列を除く。ただし UPC 列以前の列は常に残す。
pub fn visible_columns(grid: &SpreadsheetGrid, upc_column: Option<usize>) -> Vec<usize> {
    (0..grid.column_count())
        .filter(|&c| {
            let structural = upc_column.map(|u| c <= u).unwrap_or(false);
            structural
                || !grid.headers[c].trim().is_empty()
                || grid.rows.iter().any(|row| !row[c].trim().is_empty())
        })
        .collect()
}

/// スプレッドシート側の装飾シート
pub fn annotate_grid(
    grid: &SpreadsheetGrid,
    report: &ReconciliationReport,
    categories: &[RecordCategory],
    options: ExportOptions,
) -> StyledSheet {
    let columns: Vec<usize> = if options.drop_empty_columns {
        visible_columns(grid, report.roles.upc)
    } else {
        (0..grid.column_count()).collect()
    };

    let position = |source: Option<usize>| source.and_then(|s| columns.iter().position(|&c| c == s));
    let fields = FieldColumns {
        size: position(report.roles.size),
        color: position(report.roles.color),
    };

    let headers = columns.iter().map(|&c| grid.headers[c].clone()).collect();
    let rows = grid
        .rows
        .iter()
        .map(|row| columns.iter().map(|&c| row[c].clone()).collect())
        .collect();
    let results: Vec<Vec<MatchResult>> = report
        .rows
        .iter()
        .map(|outcome| categories.iter().map(|c| outcome.result(*c)).collect())
        .collect();
    let status_headers: Vec<&str> = categories.iter().map(|c| c.label()).collect();

    annotate(SPREADSHEET_SHEET_NAME, headers, rows, &results, &status_headers, fields)
}

/// 抽出レコードに含まれる追加キー（ソート済み）
pub fn extra_keys(records: &[RawRecord]) -> Vec<String> {
    let mut keys = BTreeSet::new();
    for record in records {
        for key in record.extra.keys() {
            keys.insert(key.clone());
        }
    }
    keys.into_iter().collect()
}

/// 抽出レコード側の装飾シート
pub fn annotate_records(
    category: RecordCategory,
    records: &[RawRecord],
    outcomes: &[RecordOutcome],
) -> StyledSheet {
    let extras = extra_keys(records);

    let mut headers: Vec<String> = RECORD_COLUMNS.iter().map(|(_, h)| h.to_string()).collect();
    headers.extend(extras.iter().cloned());

    let rows = records
        .iter()
        .map(|record| {
            RECORD_COLUMNS
                .iter()
                .map(|(key, _)| *key)
                .chain(extras.iter().map(|k| k.as_str()))
                .map(|key| record.display_value(key))
                .collect()
        })
        .collect();
    let results: Vec<Vec<MatchResult>> = outcomes.iter().map(|o| vec![o.result]).collect();

    annotate(
        category.sheet_name(),
        headers,
        rows,
        &results,
        &[RECORD_STATUS_HEADER],
        FieldColumns { size: Some(1), color: Some(2) },
    )
}

/// ワークブック全体（スプレッドシート + カテゴリごとのレコード）
pub fn workbook_sheets(
    grid: &SpreadsheetGrid,
    records: &crate::types::ExtractionResult,
    report: &ReconciliationReport,
    options: ExportOptions,
) -> Vec<StyledSheet> {
    let categories = report.active_categories();
    let mut sheets = vec![annotate_grid(grid, report, &categories, options)];
    for category in RecordCategory::ALL {
        sheets.push(annotate_records(
            category,
            records.records(category),
            report.records(category),
        ));
    }
    sheets
}
