pub mod excel;
pub mod json;

use crate::error::Result;
use std::path::{Path, PathBuf};
use upc_validator_common::export::{workbook_sheets, ExportOptions, Palette};
use upc_validator_common::{ExtractionResult, ReconciliationReport, SpreadsheetGrid};

/// 出力ファイルのパス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub excel: PathBuf,
    pub json: PathBuf,
}

/// 出力先がフォルダ（または拡張子なし）なら `<title>.xlsx` / `<title>.json` を作る
pub fn output_paths(output: &Path, title: &str) -> ExportPaths {
    if output.is_dir() || output.extension().is_none() {
        ExportPaths {
            excel: output.join(format!("{}.xlsx", title)),
            json: output.join(format!("{}.json", title)),
        }
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(title);
        ExportPaths {
            excel: parent.join(format!("{}.xlsx", stem)),
            json: parent.join(format!("{}.json", stem)),
        }
    }
}

/// 照合結果をエクスポートする
///
/// Excel は常に出力し、`with_json` の場合はJSONレポートも出力する。
#[allow(clippy::too_many_arguments)]
pub fn export_report(
    grid: &SpreadsheetGrid,
    records: &ExtractionResult,
    report: &ReconciliationReport,
    spreadsheet_path: &Path,
    paths: &ExportPaths,
    options: ExportOptions,
    palette: &Palette,
    with_json: bool,
) -> Result<()> {
    if let Some(parent) = paths.excel.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    println!("- Excelを生成中...");
    let sheets = workbook_sheets(grid, records, report, options);
    excel::write_excel(&sheets, palette, &paths.excel)?;
    println!("✔ Excel出力: {}", paths.excel.display());

    if with_json {
        println!("- JSONレポートを生成中...");
        let json_report = json::JsonReport::new(spreadsheet_path, records, report);
        json::write_json(&json_report, &paths.json)?;
        println!("✔ JSON出力: {}", paths.json.display());
    }

    Ok(())
}
