//! スプレッドシート読み込みモジュール
//!
//! Excel系（xlsx/xlsm/xlsb/xls/ods）は calamine、CSV は csv クレートでグリッドに変換する。
//! 数値セルは整数に切り捨てた文字列、文字列セルは前後の空白を除去する。

use crate::error::{Result, UpcValidatorError};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;
use upc_validator_common::SpreadsheetGrid;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 対応している拡張子か
pub fn is_supported(path: &Path) -> bool {
    match extension(path).as_deref() {
        Some("csv") => true,
        Some(ext) => WORKBOOK_EXTENSIONS.contains(&ext),
        None => false,
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

/// スプレッドシートを読み込んでグリッドにする
///
/// `sheet` が None の場合は先頭シートを使う（CSVでは無視）。
pub fn read_grid(path: &Path, sheet: Option<&str>) -> Result<SpreadsheetGrid> {
    if !path.exists() {
        return Err(UpcValidatorError::FileNotFound(path.display().to_string()));
    }

    let rows = match extension(path).as_deref() {
        Some("csv") => read_csv_rows(path)?,
        Some(ext) if WORKBOOK_EXTENSIONS.contains(&ext) => read_workbook_rows(path, sheet)?,
        _ => return Err(UpcValidatorError::UnsupportedFormat(path.display().to_string())),
    };

    let grid = grid_from_rows(rows);
    debug!(
        columns = grid.column_count(),
        rows = grid.row_count(),
        "spreadsheet decoded: {}",
        path.display()
    );
    Ok(grid)
}

/// 照合用に読み込む（ヘッダー行・データ行が無ければエラー）
///
/// 抽出コマンドを動かす前に空のスプレッドシートを弾くために使う。
pub fn read_checked_grid(path: &Path, sheet: Option<&str>) -> Result<SpreadsheetGrid> {
    let grid = read_grid(path, sheet)?;
    grid.ensure_not_empty()?;
    Ok(grid)
}

/// ブックのシート名一覧
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    if extension(path).as_deref() == Some("csv") {
        return Ok(Vec::new());
    }
    let workbook = open_workbook_auto(path)
        .map_err(|e| UpcValidatorError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;
    Ok(workbook.sheet_names())
}

fn read_workbook_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| UpcValidatorError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let names = workbook.sheet_names();
    let name = match sheet {
        Some(requested) => names
            .iter()
            .find(|n| n.as_str() == requested)
            .cloned()
            .ok_or_else(|| UpcValidatorError::SheetNotFound(requested.to_string()))?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| UpcValidatorError::SpreadsheetRead("シートがありません".into()))?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| UpcValidatorError::SpreadsheetRead(format!("{}: {}", name, e)))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| UpcValidatorError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| UpcValidatorError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;
        rows.push(record.iter().map(|s| s.trim().to_string()).collect());
    }
    Ok(rows)
}

/// 先頭の空行を読み飛ばし、最初の行をヘッダーにする
pub fn grid_from_rows(rows: Vec<Vec<String>>) -> SpreadsheetGrid {
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .skip_while(|row| row.iter().all(|c| c.is_empty()))
        .collect();
    SpreadsheetGrid::from_rows(rows)
}

/// セル値を文字列に変換
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => if *b { "TRUE".into() } else { "FALSE".into() },
        other => other.to_string().trim().to_string(),
    }
}

/// 数値を整数に切り捨てて表示（小数表記にしない）
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.abs() < 9.0e18 {
        format!("{}", value.trunc() as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12345678901.0), "12345678901");
        assert_eq!(format_number(42.9), "42");
        assert_eq!(format_number(-3.5), "-3");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("  Navy ".into())), "Navy");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Float(190000000001.0)), "190000000001");
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
    }

    #[test]
    fn test_grid_from_rows_skips_leading_blank_rows() {
        let rows = vec![
            vec!["".to_string(), "".to_string()],
            vec!["UPC".to_string(), "Size".to_string()],
            vec!["1".to_string()],
        ];
        let grid = grid_from_rows(rows);
        assert_eq!(grid.headers, vec!["UPC", "Size"]);
        assert_eq!(grid.rows, vec![vec!["1".to_string(), String::new()]]);
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("sheet.XLSX")));
        assert!(is_supported(Path::new("sheet.csv")));
        assert!(!is_supported(Path::new("sheet.pdf")));
        assert!(!is_supported(Path::new("sheet")));
    }
}
