use crate::error::{Result, UpcValidatorError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use upc_validator_common::Palette;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// PDF抽出コマンド（PDFパスを引数に追加して実行、標準出力にJSON）
    pub extractor_command: Option<String>,
    pub extractor_timeout_seconds: u64,
    /// 空列を除外してエクスポートする
    pub drop_empty_columns: bool,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extractor_command: None,
            extractor_timeout_seconds: 300,
            drop_empty_columns: true,
            palette: Palette::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| UpcValidatorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("upc-validator").join("config.json"))
    }

    pub fn get_extractor_command(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(command) = std::env::var("UPC_VALIDATOR_EXTRACTOR") {
            if !command.trim().is_empty() {
                return Ok(command);
            }
        }

        self.extractor_command
            .clone()
            .filter(|c| !c.trim().is_empty())
            .ok_or(UpcValidatorError::MissingExtractor)
    }

    pub fn set_extractor_command(&mut self, command: String) -> Result<()> {
        self.extractor_command = Some(command);
        self.save()
    }
}
