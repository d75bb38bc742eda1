//! スプレッドシート読み込みの統合テスト

use tempfile::tempdir;
use upc_validator::error::UpcValidatorError;
use upc_validator::spreadsheet;
use upc_validator_common::export::excel_core::generate_excel_buffer;
use upc_validator_common::export::{Palette, StyledCell, StyledRow, StyledSheet};
use upc_validator_common::classify_headers;

fn plain_sheet(name: &str, headers: &[&str], rows: &[&[&str]]) -> StyledSheet {
    StyledSheet {
        name: name.to_string(),
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| StyledRow {
                cells: row
                    .iter()
                    .map(|v| StyledCell { value: v.to_string(), status: None, accent: false })
                    .collect(),
                fill: None,
            })
            .collect(),
    }
}

#[test]
fn test_read_csv_grid() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("sheet.csv");
    std::fs::write(
        &path,
        "Style, Care Label UPC ,UPC,Size,Color\nST-1, 012345 ,999,m,Red\nST-2,012346\n",
    )
    .unwrap();

    let grid = spreadsheet::read_grid(&path, None).expect("CSV読み込み失敗");
    assert_eq!(grid.headers, vec!["Style", "Care Label UPC", "UPC", "Size", "Color"]);
    assert_eq!(grid.row_count(), 2);
    // 先頭ゼロは保持、セルはトリム
    assert_eq!(grid.rows[0][1], "012345");
    // 不足セルは空文字で埋める
    assert_eq!(grid.rows[1], vec!["ST-2", "012346", "", "", ""]);

    let roles = classify_headers(&grid.headers);
    assert_eq!(roles.upc, Some(1));
}

#[test]
fn test_read_xlsx_grid_and_sheet_selection() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("book.xlsx");

    let sheets = vec![
        plain_sheet("Notes", &["Memo"], &[&["ignore"]]),
        plain_sheet("Orders", &["UPC", "Size", "Color"], &[&["012345", "M", "Blue"]]),
    ];
    let buffer = generate_excel_buffer(&sheets, &Palette::default()).expect("Excel生成失敗");
    std::fs::write(&path, buffer).unwrap();

    let names = spreadsheet::sheet_names(&path).expect("シート名取得失敗");
    assert_eq!(names, vec!["Notes", "Orders"]);

    let first = spreadsheet::read_grid(&path, None).expect("xlsx読み込み失敗");
    assert_eq!(first.headers, vec!["Memo"]);

    let orders = spreadsheet::read_grid(&path, Some("Orders")).expect("xlsx読み込み失敗");
    assert_eq!(orders.headers, vec!["UPC", "Size", "Color"]);
    assert_eq!(orders.rows, vec![vec!["012345", "M", "Blue"]]);

    let missing = spreadsheet::read_grid(&path, Some("Nope"));
    assert!(matches!(missing, Err(UpcValidatorError::SheetNotFound(_))));
}
