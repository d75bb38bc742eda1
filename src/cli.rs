use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "upc-validator")]
#[command(about = "ケアラベル・ハングタグとスプレッドシートのUPC照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// スプレッドシートと抽出レコードを照合してExcelを出力
    Validate {
        /// スプレッドシート（xlsx/xls/ods/csv）
        #[arg(required = true)]
        spreadsheet: PathBuf,

        /// 抽出JSON・PDF・フォルダ（複数指定可）
        #[arg(short, long, required = true, num_args = 1..)]
        records: Vec<PathBuf>,

        /// 対象シート名（省略時は先頭シート）
        #[arg(long)]
        sheet: Option<String>,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力ファイル名（ディレクトリ指定時）
        #[arg(short, long, default_value = "upc-validation")]
        title: String,

        /// JSONレポートも出力
        #[arg(long)]
        json: bool,

        /// 空列も残す（設定の drop_empty_columns を無効化）
        #[arg(long)]
        keep_empty_columns: bool,
    },

    /// ヘッダーから検出した列の役割を表示
    Inspect {
        /// スプレッドシート（xlsx/xls/ods/csv）
        #[arg(required = true)]
        spreadsheet: PathBuf,

        /// 対象シート名（省略時は先頭シート）
        #[arg(long)]
        sheet: Option<String>,
    },

    /// PDFから抽出コマンドでレコードを抽出してJSONに保存
    Extract {
        /// PDFファイルまたはフォルダ
        #[arg(required = true, num_args = 1..)]
        pdfs: Vec<PathBuf>,

        /// 出力JSONファイル
        #[arg(short, long, default_value = "records.json")]
        output: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 抽出コマンドを設定
        #[arg(long)]
        set_extractor: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
