//! 抽出レコード入力モジュール
//!
//! 抽出器の出力JSON（ファイル / フォルダ）を読み込み、PDFは外部抽出コマンドに渡す。
//! ファイルごとに parent_info・UPC代替キーで補完してから1つの ExtractionResult にまとめる。

pub mod command;

use crate::config::Config;
use crate::error::{Result, UpcValidatorError};
use std::path::{Path, PathBuf};
use tracing::debug;
use upc_validator_common::{ExtractedDocument, ExtractionResult};
use walkdir::WalkDir;

/// 入力ファイルの分類
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordInputs {
    pub json_files: Vec<PathBuf>,
    pub pdf_files: Vec<PathBuf>,
}

impl RecordInputs {
    pub fn is_empty(&self) -> bool {
        self.json_files.is_empty() && self.pdf_files.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Json,
    Pdf,
}

fn input_kind(path: &Path) -> Option<InputKind> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "json" => Some(InputKind::Json),
        "pdf" => Some(InputKind::Pdf),
        _ => None,
    }
}

/// 引数のファイル・フォルダから入力を収集する
///
/// フォルダは直下のみを対象とし、ファイル名順に並べる。
pub fn collect_inputs(paths: &[PathBuf]) -> Result<RecordInputs> {
    let mut inputs = RecordInputs::default();

    for path in paths {
        if !path.exists() {
            return Err(UpcValidatorError::FileNotFound(path.display().to_string()));
        }

        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .max_depth(1)  // 直下のみ（再帰しない）
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| p.is_file() && input_kind(p).is_some())
                .collect();
            found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

            for file in found {
                push_input(&mut inputs, file);
            }
        } else if input_kind(path).is_some() {
            push_input(&mut inputs, path.clone());
        } else {
            return Err(UpcValidatorError::UnsupportedFormat(path.display().to_string()));
        }
    }

    Ok(inputs)
}

fn push_input(inputs: &mut RecordInputs, path: PathBuf) {
    match input_kind(&path) {
        Some(InputKind::Json) => inputs.json_files.push(path),
        Some(InputKind::Pdf) => inputs.pdf_files.push(path),
        None => {}
    }
}

/// 抽出JSONを1ファイル読み込む
pub fn load_document(path: &Path) -> Result<ExtractedDocument> {
    let content = std::fs::read_to_string(path)?;
    let document: ExtractedDocument = serde_json::from_str(&content)?;
    debug!(
        care_labels = document.care_labels.len(),
        hang_tags = document.hang_tags.len(),
        "loaded {}",
        path.display()
    );
    Ok(document)
}

/// 抽出JSON群を1つの結果にまとめる
pub fn load_json_files(files: &[PathBuf]) -> Result<ExtractionResult> {
    let mut result = ExtractionResult::default();
    for file in files {
        result.merge_document(load_document(file)?);
    }
    Ok(result)
}

/// 入力をすべて読み込む（PDFがあれば抽出コマンドを実行）
pub async fn load_records(paths: &[PathBuf], config: &Config) -> Result<ExtractionResult> {
    let inputs = collect_inputs(paths)?;
    if inputs.is_empty() {
        let joined = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(UpcValidatorError::NoRecordsFound(joined));
    }

    let mut result = load_json_files(&inputs.json_files)?;

    if !inputs.pdf_files.is_empty() {
        let command = config.get_extractor_command()?;
        let document = command::run_extractor(
            &command,
            &inputs.pdf_files,
            config.extractor_timeout_seconds,
        )
        .await?;
        result.merge_document(document);
    }

    Ok(result)
}
