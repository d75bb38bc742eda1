//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// ヘッダー行がない、またはデータ行がないスプレッドシート
    #[error("Empty spreadsheet: {0}")]
    EmptySpreadsheet(String),

    /// ワークブックの書き出し失敗
    #[error("Excel error: {0}")]
    Excel(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_empty_spreadsheet() {
        let error = Error::EmptySpreadsheet("データ行がありません".to_string());
        assert_eq!(format!("{}", error), "Empty spreadsheet: データ行がありません");
    }

    #[test]
    fn test_error_display_excel() {
        let error = Error::Excel("シート名設定エラー".to_string());
        assert_eq!(format!("{}", error), "Excel error: シート名設定エラー");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Excel("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Excel"));
        assert!(debug.contains("テスト"));
    }
}
