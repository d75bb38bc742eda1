//! ヘッダー分類モジュール
//!
//! スプレッドシートのヘッダー文字列から UPC / サイズ / カラー列を推定する。
//!
//! ## ルール
//! 1. ヘッダーを小文字化し、英数字以外をすべて除去
//! 2. 役割ごとに左の列から走査し、キーワードのいずれかを含む最初の列を採用
//! 3. キーワードの優先順は同じヘッダー内での判定順にのみ影響する

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// UPC列のキーワード（修飾付きの名前を優先）
pub const UPC_KEYWORDS: &[&str] = &["carelabelupc", "careupc", "hangtagupc", "rfidupc", "upc"];

/// サイズ列のキーワード
pub const SIZE_KEYWORDS: &[&str] = &["size"];

/// カラー列のキーワード
pub const COLOR_KEYWORDS: &[&str] = &["color"];

/// 列の役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Upc,
    Size,
    Color,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 3] = [ColumnRole::Upc, ColumnRole::Size, ColumnRole::Color];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::Upc => UPC_KEYWORDS,
            ColumnRole::Size => SIZE_KEYWORDS,
            ColumnRole::Color => COLOR_KEYWORDS,
        }
    }
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColumnRole::Upc => "UPC",
            ColumnRole::Size => "Size",
            ColumnRole::Color => "Color",
        };
        f.pad(name)
    }
}

/// 役割ごとの列番号（None は列が見つからない）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoleMap {
    pub upc: Option<usize>,
    pub size: Option<usize>,
    pub color: Option<usize>,
}

impl ColumnRoleMap {
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Upc => self.upc,
            ColumnRole::Size => self.size,
            ColumnRole::Color => self.color,
        }
    }

    /// 見つからなかった役割の一覧
    pub fn missing_roles(&self) -> Vec<ColumnRole> {
        ColumnRole::ALL
            .iter()
            .copied()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }
}

/// ヘッダーを比較用に正規化（小文字化 + 英数字以外を除去）
pub fn normalize_header(header: &str) -> String {
    lazy_static! {
        static ref NON_ALNUM_RE: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }
    NON_ALNUM_RE.replace_all(&header.to_lowercase(), "").into_owned()
}

/// ヘッダー一覧から列の役割を決定する
pub fn classify_headers<S: AsRef<str>>(headers: &[S]) -> ColumnRoleMap {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h.as_ref())).collect();

    ColumnRoleMap {
        upc: find_column(&normalized, ColumnRole::Upc.keywords()),
        size: find_column(&normalized, ColumnRole::Size.keywords()),
        color: find_column(&normalized, ColumnRole::Color.keywords()),
    }
}

fn find_column(normalized: &[String], keywords: &[&str]) -> Option<usize> {
    normalized
        .iter()
        .position(|header| keywords.iter().any(|keyword| header.contains(keyword)))
}
