use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpcValidatorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("抽出コマンドが設定されていません。`upc-validator config --set-extractor \"COMMAND\"` で設定してください")]
    MissingExtractor,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式: {0}")]
    UnsupportedFormat(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    SpreadsheetRead(String),

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("抽出レコードが見つかりません: {0}")]
    NoRecordsFound(String),

    #[error("抽出コマンド実行エラー: {0}")]
    Extractor(String),

    #[error("照合エラー: {0}")]
    Engine(#[from] upc_validator_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),
}

pub type Result<T> = std::result::Result<T, UpcValidatorError>;
