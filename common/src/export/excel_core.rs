//! Excel生成（共通ライブラリ）
//!
//! 装飾プラン（StyledSheet）を rust_xlsxwriter でワークブックに書き出す

use super::{Fill, Palette, StyledSheet};
use crate::error::{Error, Result};
use crate::matcher::MatchStatus;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

/// 列幅の上限（文字数）
const MAX_COLUMN_WIDTH: f64 = 48.0;

/// 塗りごとのフォーマット
struct FormatSet {
    header: Format,
    plain: Format,
    matched: Format,
    mismatched: Format,
    missing: Format,
    accent: Format,
}

impl FormatSet {
    fn new(palette: &Palette) -> Self {
        let base = Format::new()
            .set_font_size(10.0)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Hair)
            .set_border_color(Color::RGB(0xCCCCCC));

        let header = Format::new()
            .set_bold()
            .set_font_size(10.0)
            .set_font_color(Color::RGB(0x333333))
            .set_background_color(Color::RGB(0xF5F5F5))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(0xAAAAAA));

        let filled = |rgb: u32| base.clone().set_background_color(Color::RGB(rgb));

        Self {
            header,
            plain: base.clone(),
            matched: filled(palette.status_color(MatchStatus::Match)),
            mismatched: filled(palette.status_color(MatchStatus::Mismatch)),
            missing: filled(palette.status_color(MatchStatus::Missing)),
            accent: filled(palette.accent).set_bold(),
        }
    }

    fn for_fill(&self, fill: Fill) -> &Format {
        match fill {
            Fill::None => &self.plain,
            Fill::Status(MatchStatus::Match) => &self.matched,
            Fill::Status(MatchStatus::Mismatch) => &self.mismatched,
            Fill::Status(MatchStatus::Missing) => &self.missing,
            Fill::Accent => &self.accent,
        }
    }
}

fn column_number(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| Error::Excel(format!("列数が多すぎます: {}", index + 1)))
}

fn row_number(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| Error::Excel(format!("行数が多すぎます: {}", index + 1)))
}

/// 1シート分を書き込む
fn write_sheet(worksheet: &mut Worksheet, sheet: &StyledSheet, formats: &FormatSet) -> Result<()> {
    worksheet.set_name(&sheet.name)
        .map_err(|e| Error::Excel(format!("シート名設定エラー: {}", e)))?;

    let mut widths: Vec<usize> = sheet.headers.iter().map(|h| h.chars().count()).collect();

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, column_number(col)?, header, &formats.header)
            .map_err(|e| Error::Excel(format!("ヘッダー書き込みエラー: {}", e)))?;
    }

    for (r, row) in sheet.rows.iter().enumerate() {
        let excel_row = row_number(r + 1)?;

        for (col, cell) in row.cells.iter().enumerate() {
            let format = formats.for_fill(row.cell_fill(col));
            let excel_col = column_number(col)?;

            // UPCの先頭ゼロを保つため値はすべて文字列で書き込む
            if cell.value.is_empty() {
                worksheet.write_blank(excel_row, excel_col, format)
                    .map_err(|e| Error::Excel(format!("セル書き込みエラー: {}", e)))?;
            } else {
                worksheet.write_string_with_format(excel_row, excel_col, &cell.value, format)
                    .map_err(|e| Error::Excel(format!("セル書き込みエラー: {}", e)))?;
            }

            if let Some(width) = widths.get_mut(col) {
                *width = (*width).max(cell.value.chars().count());
            }
        }
    }

    for (col, width) in widths.iter().enumerate() {
        let width = (*width as f64 + 2.0).min(MAX_COLUMN_WIDTH);
        worksheet.set_column_width(column_number(col)?, width)
            .map_err(|e| Error::Excel(format!("列幅設定エラー: {}", e)))?;
    }

    worksheet.set_freeze_panes(1, 0)
        .map_err(|e| Error::Excel(format!("ウィンドウ枠固定エラー: {}", e)))?;

    Ok(())
}

/// Excelをバッファに生成
///
/// # Arguments
/// * `sheets` - 装飾済みシート（順番にワークシートを作成）
/// * `palette` - ステータス色
pub fn generate_excel_buffer(sheets: &[StyledSheet], palette: &Palette) -> Result<Vec<u8>> {
    let formats = FormatSet::new(palette);
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet, &formats)?;
    }

    // バッファに書き出し
    workbook.save_to_buffer()
        .map_err(|e| Error::Excel(format!("Excel保存エラー: {}", e)))
}
