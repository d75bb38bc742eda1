//! 抽出レコードの型定義
//!
//! CLIとエンジンで共有される型:
//! - RawRecord: PDF抽出器が返す1件分のメタデータ（ケアラベル / ハングタグ）
//! - ExtractionResult: 抽出器の出力全体
//! - ExtractedDocument: PDF1ファイル分の出力（parent_info付き）

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// 抽出レコードの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCategory {
    CareLabel,
    HangTag,
}

impl RecordCategory {
    pub const ALL: [RecordCategory; 2] = [RecordCategory::CareLabel, RecordCategory::HangTag];

    /// ステータス列の見出し
    pub fn label(&self) -> &'static str {
        match self {
            RecordCategory::CareLabel => "Care Label",
            RecordCategory::HangTag => "Hang Tag",
        }
    }

    /// エクスポート時のシート名
    pub fn sheet_name(&self) -> &'static str {
        match self {
            RecordCategory::CareLabel => "Care Labels",
            RecordCategory::HangTag => "Hang Tags",
        }
    }
}

impl std::fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 抽出器が返す1レコード
///
/// 既知の4フィールド以外のキーは `extra` にそのまま保持し、表示・エクスポートで使う。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub style_number: Option<String>,

    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// UPCが空のときに参照する代替キー（優先順）
const UPC_FALLBACK_KEYS: &[&str] = &["barcode", "upc_candidate"];

/// パススルーから除外するキー（長文の組成表示）
const DROPPED_KEYS: &[&str] = &["composition"];

impl RawRecord {
    /// 親情報とUPC代替キーで欠損フィールドを補完する
    pub fn with_fallbacks(mut self, parent: Option<&ParentInfo>) -> Self {
        if let Some(parent) = parent {
            if is_blank(&self.style_number) {
                self.style_number = parent.style_number.clone();
            }
            if is_blank(&self.color) {
                self.color = parent.color.clone();
            }
        }

        if is_blank(&self.upc) {
            self.upc = UPC_FALLBACK_KEYS
                .iter()
                .filter_map(|key| self.extra.get(*key).and_then(value_to_string))
                .find(|v| !v.trim().is_empty());
        }

        for key in DROPPED_KEYS {
            self.extra.remove(*key);
        }

        self
    }

    /// 表示用の値を取得（既知フィールド → extra の順）
    pub fn display_value(&self, key: &str) -> String {
        let known = match key {
            "style_number" => Some(&self.style_number),
            "size" => Some(&self.size),
            "color" => Some(&self.color),
            "upc" => Some(&self.upc),
            _ => None,
        };

        match known {
            Some(value) => value.clone().unwrap_or_default(),
            None => self
                .extra
                .get(key)
                .and_then(value_to_string)
                .unwrap_or_default(),
        }
    }
}

/// PDF1ファイル分の共通情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentInfo {
    #[serde(default, deserialize_with = "loose_string")]
    pub style_number: Option<String>,

    #[serde(default, deserialize_with = "loose_string")]
    pub color: Option<String>,
}

/// PDF1ファイル分の抽出結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDocument {
    #[serde(default)]
    pub care_labels: Vec<RawRecord>,

    #[serde(default)]
    pub hang_tags: Vec<RawRecord>,

    #[serde(default)]
    pub parent_info: Option<ParentInfo>,
}

/// 抽出器の出力（全PDF分）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default)]
    pub care_labels: Vec<RawRecord>,

    #[serde(default)]
    pub hang_tags: Vec<RawRecord>,
}

impl ExtractionResult {
    /// 1ファイル分の抽出結果を補完しながら追加
    pub fn merge_document(&mut self, document: ExtractedDocument) {
        let parent = document.parent_info.as_ref();
        self.care_labels.extend(
            document.care_labels.into_iter().map(|r| r.with_fallbacks(parent)),
        );
        self.hang_tags.extend(
            document.hang_tags.into_iter().map(|r| r.with_fallbacks(parent)),
        );
    }

    pub fn records(&self, category: RecordCategory) -> &[RawRecord] {
        match category {
            RecordCategory::CareLabel => &self.care_labels,
            RecordCategory::HangTag => &self.hang_tags,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.care_labels.is_empty() && self.hang_tags.is_empty()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// 文字列・数値・null を受け付けて Option<String> にする
fn loose_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_string))
}

/// JSON値を表示用文字列に変換（null は None）
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// 整数値の浮動小数は小数点なしで表示する（UPCが数値で渡されるケース）
fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e18 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_accepts_numbers_and_nulls() {
        let json = r#"{"style_number": "ST-1", "size": null, "color": "Red", "upc": 12345678901.0, "fiber": "cotton"}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.style_number.as_deref(), Some("ST-1"));
        assert_eq!(record.size, None);
        assert_eq!(record.upc.as_deref(), Some("12345678901"));
        assert_eq!(record.extra.get("fiber"), Some(&Value::String("cotton".into())));
    }

    #[test]
    fn test_raw_record_preserves_extra_on_serialize() {
        let json = r#"{"upc": "0123", "page": 3}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["page"], Value::from(3));
        assert_eq!(back["upc"], Value::from("0123"));
        assert!(back.get("size").is_none());
    }

    #[test]
    fn test_fallbacks_from_parent_and_barcode() {
        let json = r#"{"size": "M", "barcode": "", "upc_candidate": "999", "composition": "100% cotton"}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        let parent = ParentInfo {
            style_number: Some("ST-9".into()),
            color: Some("NAVY".into()),
        };

        let merged = record.with_fallbacks(Some(&parent));
        assert_eq!(merged.style_number.as_deref(), Some("ST-9"));
        assert_eq!(merged.color.as_deref(), Some("NAVY"));
        assert_eq!(merged.upc.as_deref(), Some("999"));
        assert!(!merged.extra.contains_key("composition"));
    }

    #[test]
    fn test_fallbacks_keep_existing_values() {
        let record = RawRecord {
            color: Some("RED".into()),
            upc: Some("111".into()),
            ..Default::default()
        };
        let parent = ParentInfo {
            style_number: None,
            color: Some("BLUE".into()),
        };
        let merged = record.with_fallbacks(Some(&parent));
        assert_eq!(merged.color.as_deref(), Some("RED"));
        assert_eq!(merged.upc.as_deref(), Some("111"));
    }

    #[test]
    fn test_merge_document() {
        let json = r#"{
            "care_labels": [{"size": "S", "upc": "1"}],
            "parent_info": {"style_number": "ST-2", "color": "GREEN"}
        }"#;
        let document: ExtractedDocument = serde_json::from_str(json).unwrap();
        let mut result = ExtractionResult::default();
        result.merge_document(document);

        assert_eq!(result.care_labels.len(), 1);
        assert!(result.hang_tags.is_empty());
        assert_eq!(result.care_labels[0].color.as_deref(), Some("GREEN"));
        assert_eq!(result.records(RecordCategory::CareLabel).len(), 1);
    }

    #[test]
    fn test_display_value() {
        let json = r#"{"upc": "42", "page": 2}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.display_value("upc"), "42");
        assert_eq!(record.display_value("size"), "");
        assert_eq!(record.display_value("page"), "2");
        assert_eq!(record.display_value("unknown"), "");
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(RecordCategory::CareLabel.label(), "Care Label");
        assert_eq!(RecordCategory::HangTag.label(), "Hang Tag");
        assert_eq!(RecordCategory::HangTag.sheet_name(), "Hang Tags");
    }
}
