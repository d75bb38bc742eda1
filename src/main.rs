use clap::Parser;
use upc_validator::{cli, config, error, export, extractor, logging, spreadsheet};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use upc_validator_common::{
    classify_headers, reconcile, ColumnRole, ColumnRoleMap, ExportOptions, RecordCategory,
    ReconciliationReport, SpreadsheetGrid,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Validate { spreadsheet, records, sheet, output, title, json, keep_empty_columns } => {
            println!("🏷  upc-validator - UPC照合\n");

            // 1. スプレッドシート読み込み
            println!("[1/4] スプレッドシートを読み込み中...");
            let grid = spreadsheet::read_checked_grid(&spreadsheet, sheet.as_deref())?;
            println!("✔ {}列 × {}行\n", grid.column_count(), grid.row_count());

            // 2. 抽出レコード読み込み
            println!("[2/4] 抽出レコードを読み込み中...");
            let extraction = extractor::load_records(&records, &config).await?;
            println!(
                "✔ ケアラベル {}件 / ハングタグ {}件\n",
                extraction.care_labels.len(),
                extraction.hang_tags.len()
            );

            // 3. 照合
            println!("[3/4] 照合中...");
            let report = reconcile(&grid, &extraction)?;
            report_missing_roles(&grid, &report.roles);
            print_summary(&report);
            println!();

            // 4. エクスポート
            println!("[4/4] エクスポート中...");
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let paths = export::output_paths(&output_dir, &title);
            let options = ExportOptions {
                drop_empty_columns: config.drop_empty_columns && !keep_empty_columns,
            };
            export::export_report(
                &grid,
                &extraction,
                &report,
                &spreadsheet,
                &paths,
                options,
                &config.palette,
                json,
            )?;

            println!("\n✅ 照合完了");
        }

        Commands::Inspect { spreadsheet, sheet } => {
            println!("🔍 upc-validator - 列検出\n");

            let sheets = spreadsheet::sheet_names(&spreadsheet)?;
            if !sheets.is_empty() {
                println!("シート: {}", sheets.join(", "));
            }

            let grid = spreadsheet::read_grid(&spreadsheet, sheet.as_deref())?;
            let roles = classify_headers(&grid.headers);
            for role in ColumnRole::ALL {
                match roles.get(role) {
                    Some(col) => println!("  {:<6} → {}列目 \"{}\"", role, col + 1, grid.headers[col]),
                    None => println!("  {:<6} → 見つかりません", role),
                }
            }
            println!("データ行: {}", grid.row_count());
        }

        Commands::Extract { pdfs, output } => {
            println!("📄 upc-validator - PDF抽出\n");

            let inputs = extractor::collect_inputs(&pdfs)?;
            if inputs.pdf_files.is_empty() {
                return Err(error::UpcValidatorError::NoRecordsFound(
                    pdfs.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "),
                ));
            }

            println!("- {}件のPDFを抽出中...", inputs.pdf_files.len());
            let command = config.get_extractor_command()?;
            let document = extractor::command::run_extractor(
                &command,
                &inputs.pdf_files,
                config.extractor_timeout_seconds,
            )
            .await?;

            let mut result = upc_validator_common::ExtractionResult::default();
            result.merge_document(document);
            write_records(&result, &output)?;
            println!(
                "✔ ケアラベル {}件 / ハングタグ {}件 → {}",
                result.care_labels.len(),
                result.hang_tags.len(),
                output.display()
            );
        }

        Commands::Config { set_extractor, show } => {
            let mut config = config;

            if let Some(command) = set_extractor {
                config.set_extractor_command(command)?;
                println!("✔ 抽出コマンドを設定しました");
            }

            if show {
                println!("設定:");
                println!(
                    "  抽出コマンド: {}",
                    config.extractor_command.as_deref().unwrap_or("未設定")
                );
                println!("  タイムアウト: {}秒", config.extractor_timeout_seconds);
                println!("  空列の除外: {}", if config.drop_empty_columns { "有効" } else { "無効" });
                println!(
                    "  色: 一致 #{:06X} / 不一致 #{:06X} / 未検出 #{:06X} / 強調 #{:06X}",
                    config.palette.matched,
                    config.palette.mismatched,
                    config.palette.missing,
                    config.palette.accent
                );
            }
        }
    }

    Ok(())
}

/// 見つからなかった列を警告（照合は続行し、その項目は空として扱う）
fn report_missing_roles(grid: &SpreadsheetGrid, roles: &ColumnRoleMap) {
    debug!(?roles, headers = ?grid.headers, "column roles detected");
    for role in roles.missing_roles() {
        warn!(%role, "column not found");
        println!("⚠ {}列が見つかりません（空として照合します）", role);
    }
}

fn print_summary(report: &ReconciliationReport) {
    println!("✔ {}行を照合", report.summary.rows);
    for category in RecordCategory::ALL {
        let summary = report.summary.category(category);
        println!(
            "  {:<10} 行: 一致 {} / 不一致 {} / 未検出 {}  レコード({}件): 一致 {} / 不一致 {} / 未検出 {}",
            category.label(),
            summary.rows.matched,
            summary.rows.mismatched,
            summary.rows.missing,
            summary.records,
            summary.record_statuses.matched,
            summary.record_statuses.mismatched,
            summary.record_statuses.missing,
        );
    }
}

fn write_records(result: &upc_validator_common::ExtractionResult, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(output, json)?;
    Ok(())
}
