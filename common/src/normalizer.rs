//! 正規化モジュール
//!
//! 抽出レコード・スプレッドシート行を `{upc, size, color}` の3値に揃える。
//! 欠損は空文字として扱い、失敗することはない。

use crate::header::ColumnRoleMap;
use crate::types::RawRecord;
use serde::{Deserialize, Serialize};

/// 正規化元への参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum TripleSource {
    /// スプレッドシートのデータ行番号（ヘッダーを除いた0始まり）
    Row(usize),
    /// 抽出レコードの番号（種別内の0始まり）
    Record(usize),
}

/// 正規化済みの3値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTriple {
    pub upc: String,
    pub size: String,
    pub color: String,
    pub source: TripleSource,
}

impl NormalizedTriple {
    pub fn new(upc: Option<&str>, size: Option<&str>, color: Option<&str>, source: TripleSource) -> Self {
        Self {
            upc: normalize_upc(upc),
            size: normalize_value(size),
            color: normalize_value(color),
            source,
        }
    }

    /// 正規化済みの値をもう一度正規化する（結果は変わらない）
    pub fn renormalized(&self) -> Self {
        Self::new(Some(&self.upc), Some(&self.size), Some(&self.color), self.source)
    }
}

/// サイズ・カラー: 前後の空白を除去して大文字化
pub fn normalize_value(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_uppercase()).unwrap_or_default()
}

/// UPC: 前後の空白のみ除去（大文字化・ゼロ埋めはしない）
pub fn normalize_upc(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// 抽出レコードを正規化
pub fn normalize_record(index: usize, record: &RawRecord) -> NormalizedTriple {
    NormalizedTriple::new(
        record.upc.as_deref(),
        record.size.as_deref(),
        record.color.as_deref(),
        TripleSource::Record(index),
    )
}

/// スプレッドシートの1行を正規化（列が無い役割は空文字）
pub fn normalize_row<S: AsRef<str>>(index: usize, row: &[S], roles: &ColumnRoleMap) -> NormalizedTriple {
    let cell = |column: Option<usize>| column.and_then(|c| row.get(c)).map(|s| s.as_ref());

    NormalizedTriple::new(
        cell(roles.upc),
        cell(roles.size),
        cell(roles.color),
        TripleSource::Row(index),
    )
}
