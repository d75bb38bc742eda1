//! 外部PDF抽出コマンド連携
//!
//! 設定されたコマンドに PDF パスを引数として渡し、標準出力の JSON を抽出結果として読む。

use crate::error::{Result, UpcValidatorError};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;
use upc_validator_common::ExtractedDocument;

/// 抽出コマンドを実行する
///
/// `command` は空白区切りで分割し、先頭をプログラム、残りを引数とする。
pub async fn run_extractor(command: &str, pdfs: &[PathBuf], timeout_seconds: u64) -> Result<ExtractedDocument> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or(UpcValidatorError::MissingExtractor)?;
    let args: Vec<&str> = parts.collect();

    debug!(program, ?args, files = pdfs.len(), "running extractor");

    let child = Command::new(program)
        .args(&args)
        .args(pdfs)
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(Duration::from_secs(timeout_seconds), child)
        .await
        .map_err(|_| UpcValidatorError::Extractor(format!("タイムアウト（{}秒）", timeout_seconds)))?
        .map_err(|e| UpcValidatorError::Extractor(format!("{} の起動に失敗: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(UpcValidatorError::Extractor(format!(
            "{} が異常終了しました（code {:?}）: {}",
            program,
            output.status.code(),
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    debug!(bytes = stdout.len(), "extractor output received");

    serde_json::from_str(&stdout)
        .map_err(|e| UpcValidatorError::Extractor(format!("出力JSONのパースに失敗: {}", e)))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_run_extractor_reads_stdout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.pdf");
        std::fs::write(&path, r#"{"care_labels": [{"upc": "1", "size": "M"}]}"#).unwrap();

        // cat でファイル内容をそのまま出力させる
        let document = run_extractor("cat", &[path], 10).await.unwrap();
        assert_eq!(document.care_labels.len(), 1);
        assert!(document.hang_tags.is_empty());
    }

    #[tokio::test]
    async fn test_run_extractor_failure() {
        let result = run_extractor("false", &[], 10).await;
        assert!(matches!(result, Err(UpcValidatorError::Extractor(_))));
    }

    #[tokio::test]
    async fn test_run_extractor_missing_program() {
        let result = run_extractor("upc-validator-no-such-extractor", &[], 10).await;
        assert!(matches!(result, Err(UpcValidatorError::Extractor(_))));
    }

    #[tokio::test]
    async fn test_run_extractor_invalid_json() {
        let result = run_extractor("echo not-json", &[], 10).await;
        assert!(matches!(result, Err(UpcValidatorError::Extractor(_))));
    }

    #[tokio::test]
    async fn test_empty_command() {
        let result = run_extractor("   ", &[], 10).await;
        assert!(matches!(result, Err(UpcValidatorError::MissingExtractor)));
    }
}
