//! Excel生成（CLI版）
//!
//! 共通ライブラリでバッファを生成し、ファイルに保存する

use crate::error::{Result, UpcValidatorError};
use std::path::Path;
use upc_validator_common::export::excel_core::generate_excel_buffer;
use upc_validator_common::export::{Palette, StyledSheet};

pub fn write_excel(sheets: &[StyledSheet], palette: &Palette, output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(sheets, palette).map_err(|e| match e {
        upc_validator_common::Error::Excel(message) => UpcValidatorError::ExcelGeneration(message),
        other => other.into(),
    })?;

    std::fs::write(output_path, buffer)
        .map_err(|e| UpcValidatorError::ExcelGeneration(format!("保存エラー: {}: {}", output_path.display(), e)))?;

    Ok(())
}
