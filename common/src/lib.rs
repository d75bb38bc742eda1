//! UPC Validator Common Library
//!
//! PDF抽出レコードとスプレッドシートを UPC で突き合わせる照合エンジン。
//! CLIから利用される型とユーティリティ

pub mod types;
pub mod error;
pub mod grid;
pub mod header;
pub mod normalizer;
pub mod index;
pub mod matcher;
pub mod reconcile;
pub mod export;

pub use types::{ExtractedDocument, ExtractionResult, ParentInfo, RawRecord, RecordCategory};
pub use error::{Error, Result};
pub use grid::SpreadsheetGrid;
pub use header::{classify_headers, ColumnRole, ColumnRoleMap};
pub use normalizer::{normalize_record, normalize_row, NormalizedTriple, TripleSource};
pub use index::{build_index, UpcIndex};
pub use matcher::{match_status, MatchResult, MatchStatus};
pub use reconcile::{reconcile, ReconciliationReport, Summary};
pub use export::{ExportOptions, Palette, StyledSheet};
