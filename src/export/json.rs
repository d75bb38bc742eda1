//! JSONレポート出力
//!
//! UI・他システム向けに、行・レコードごとの判定とラベルを出力する

use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use upc_validator_common::reconcile::RecordOutcome;
use upc_validator_common::{
    ColumnRole, ColumnRoleMap, ExtractionResult, MatchResult, MatchStatus, RawRecord,
    ReconciliationReport, RecordCategory, Summary,
};

/// ラベル付きの判定結果
#[derive(Debug, Clone, Serialize)]
pub struct LabeledResult {
    pub status: MatchStatus,
    pub label: &'static str,
    pub size_match: bool,
    pub color_match: bool,
}

impl From<MatchResult> for LabeledResult {
    fn from(result: MatchResult) -> Self {
        Self {
            status: result.status,
            label: result.label(),
            size_match: result.size_match,
            color_match: result.color_match,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRow {
    /// スプレッドシート上の行番号（ヘッダー行 = 1）
    pub sheet_row: usize,
    pub upc: String,
    pub size: String,
    pub color: String,
    pub care_label: LabeledResult,
    pub hang_tag: LabeledResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRecord {
    pub index: usize,
    pub upc: String,
    pub size: String,
    pub color: String,
    pub result: LabeledResult,
    pub raw: RawRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub spreadsheet: String,
    pub roles: ColumnRoleMap,
    pub missing_roles: Vec<ColumnRole>,
    pub summary: Summary,
    pub rows: Vec<JsonRow>,
    pub care_labels: Vec<JsonRecord>,
    pub hang_tags: Vec<JsonRecord>,
}

impl JsonReport {
    pub fn new(spreadsheet: &Path, records: &ExtractionResult, report: &ReconciliationReport) -> Self {
        let rows = report
            .rows
            .iter()
            .map(|outcome| JsonRow {
                sheet_row: outcome.row + 2,
                upc: outcome.triple.upc.clone(),
                size: outcome.triple.size.clone(),
                color: outcome.triple.color.clone(),
                care_label: outcome.care_label.into(),
                hang_tag: outcome.hang_tag.into(),
            })
            .collect();

        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            spreadsheet: spreadsheet.display().to_string(),
            roles: report.roles,
            missing_roles: report.missing_roles.clone(),
            summary: report.summary,
            rows,
            care_labels: json_records(records.records(RecordCategory::CareLabel), report.records(RecordCategory::CareLabel)),
            hang_tags: json_records(records.records(RecordCategory::HangTag), report.records(RecordCategory::HangTag)),
        }
    }
}

fn json_records(records: &[RawRecord], outcomes: &[RecordOutcome]) -> Vec<JsonRecord> {
    records
        .iter()
        .zip(outcomes.iter())
        .map(|(raw, outcome)| JsonRecord {
            index: outcome.record,
            upc: outcome.triple.upc.clone(),
            size: outcome.triple.size.clone(),
            color: outcome.triple.color.clone(),
            result: outcome.result.into(),
            raw: raw.clone(),
        })
        .collect()
}

pub fn write_json(report: &JsonReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(output_path, json)?;
    Ok(())
}
