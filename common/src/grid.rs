//! スプレッドシートのグリッド表現
//!
//! デコーダ（calamine / csv）の出力をヘッダー行 + データ行の矩形に揃える。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SpreadsheetGrid {
    /// 各行をヘッダー列数に揃えて作成（不足セルは空文字、超過セルは切り捨て）
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// 先頭行をヘッダーとして扱う
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let headers = rows.remove(0);
        Self::new(headers, rows)
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// セル値を取得（列が無ければ空文字）
    pub fn cell(&self, row: usize, column: Option<usize>) -> &str {
        column
            .and_then(|c| self.rows.get(row).and_then(|r| r.get(c)))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// 照合可能なグリッドか検証する
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.headers.iter().all(|h| h.trim().is_empty()) {
            return Err(Error::EmptySpreadsheet("ヘッダー行がありません".into()));
        }
        if self.rows.is_empty() {
            return Err(Error::EmptySpreadsheet("データ行がありません".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rows_padded_to_header_width() {
        let grid = SpreadsheetGrid::new(
            strings(&["UPC", "Size", "Color"]),
            vec![strings(&["1"]), strings(&["2", "M", "RED", "extra"])],
        );
        assert_eq!(grid.rows[0], strings(&["1", "", ""]));
        assert_eq!(grid.rows[1], strings(&["2", "M", "RED"]));
    }

    #[test]
    fn test_from_rows() {
        let grid = SpreadsheetGrid::from_rows(vec![strings(&["UPC", "Size"]), strings(&["1", "S"])]);
        assert_eq!(grid.headers, strings(&["UPC", "Size"]));
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.cell(0, Some(1)), "S");
        assert_eq!(grid.cell(0, None), "");
        assert_eq!(grid.cell(5, Some(0)), "");
    }

    #[test]
    fn test_empty_grid_is_reported() {
        let no_rows = SpreadsheetGrid::new(strings(&["UPC"]), vec![]);
        assert!(matches!(no_rows.ensure_not_empty(), Err(Error::EmptySpreadsheet(_))));

        let no_headers = SpreadsheetGrid::from_rows(vec![]);
        assert!(matches!(no_headers.ensure_not_empty(), Err(Error::EmptySpreadsheet(_))));

        let ok = SpreadsheetGrid::new(strings(&["UPC"]), vec![strings(&["1"])]);
        assert!(ok.ensure_not_empty().is_ok());
    }
}
