//! UPCインデックス
//!
//! 正規化済みの3値を UPC ごとにまとめる。出現順を保持し、UPCが空のものは登録しない。

use crate::normalizer::NormalizedTriple;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct UpcIndex {
    /// 正規化済みの3値（UPCが空のものも含め、元の順序のまま）
    triples: Vec<NormalizedTriple>,
    entries: HashMap<String, Vec<NormalizedTriple>>,
}

impl UpcIndex {
    /// 正規化済みの3値から構築
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = NormalizedTriple>,
    {
        let triples: Vec<NormalizedTriple> = triples.into_iter().collect();
        let mut entries: HashMap<String, Vec<NormalizedTriple>> = HashMap::new();
        for triple in triples.iter().filter(|t| !t.upc.is_empty()) {
            entries.entry(triple.upc.clone()).or_default().push(triple.clone());
        }
        Self { triples, entries }
    }

    /// UPCに一致する候補（無ければ空スライス）
    pub fn get(&self, upc: &str) -> &[NormalizedTriple] {
        self.entries.get(upc).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// 元の順序の3値（逆方向の照合で使う）
    pub fn triples(&self) -> &[NormalizedTriple] {
        &self.triples
    }

    pub fn contains(&self, upc: &str) -> bool {
        self.entries.contains_key(upc)
    }

    /// 登録されているUPCの種類数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 任意の要素列から射影関数でインデックスを構築
///
/// 射影には要素の位置が渡されるので、`TripleSource` の参照に使える。
pub fn build_index<T, F>(items: &[T], project: F) -> UpcIndex
where
    F: Fn(usize, &T) -> NormalizedTriple,
{
    UpcIndex::from_triples(items.iter().enumerate().map(|(i, item)| project(i, item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{normalize_record, TripleSource};
    use crate::types::RawRecord;

    fn triple(upc: &str, size: &str, index: usize) -> NormalizedTriple {
        NormalizedTriple::new(Some(upc), Some(size), Some("RED"), TripleSource::Row(index))
    }

    #[test]
    fn test_lookup_preserves_encounter_order() {
        let index = UpcIndex::from_triples(vec![
            triple("111", "S", 0),
            triple("222", "M", 1),
            triple("111", "L", 2),
            triple("111", "S", 3),
        ]);

        let found = index.get("111");
        assert_eq!(found.len(), 3);
        let sources: Vec<_> = found.iter().map(|t| t.source).collect();
        assert_eq!(
            sources,
            vec![TripleSource::Row(0), TripleSource::Row(2), TripleSource::Row(3)]
        );
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_empty_upc_is_skipped() {
        let index = UpcIndex::from_triples(vec![triple("", "S", 0), triple("  ", "M", 1)]);
        assert!(index.is_empty());
        assert!(index.get("").is_empty());
    }

    #[test]
    fn test_unknown_upc_returns_empty() {
        let index = UpcIndex::from_triples(vec![triple("111", "S", 0)]);
        assert!(index.get("999").is_empty());
        assert!(!index.contains("999"));
        assert!(index.contains("111"));
    }

    #[test]
    fn test_build_index_with_projection() {
        let records = vec![
            RawRecord { upc: Some("5".into()), ..Default::default() },
            RawRecord::default(),
            RawRecord { upc: Some("5".into()), size: Some("m".into()), ..Default::default() },
        ];
        let index = build_index(&records, normalize_record);

        let found = index.get("5");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].source, TripleSource::Record(0));
        assert_eq!(found[1].source, TripleSource::Record(2));
        assert_eq!(found[1].size, "M");

        // UPCが空の要素も元の順序で残る
        let sources: Vec<_> = index.triples().iter().map(|t| t.source).collect();
        assert_eq!(
            sources,
            vec![TripleSource::Record(0), TripleSource::Record(1), TripleSource::Record(2)]
        );
    }
}
