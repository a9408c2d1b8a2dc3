//! 欠落語彙TSVへCEFR/品詞/タグを補完するユーティリティ
//!
//! このバイナリは、compareが出力した欠落TSVを読み込み、参照テーブルの索引、
//! 頻度ランク、語尾ヒューリスティクスでメタデータを埋めた固定5列のTSVを
//! 出力します。頻度リストがローカルに無い場合は、最初に一度だけ
//! ダウンロードしてキャッシュします。

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use vocab::fetch;
use vocab::utils::{read_table, write_tsv_row};
use vocab::{EnrichedRow, Enricher, FrequencyClassifier, Normalizer, RankThresholds, ReferenceIndex};

use clap::Parser;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(
    name = "enrich",
    version,
    about = "Fills CEFR/POS/tags for a TSV generated by the compare tool"
)]
struct Args {
    /// Missing-vocab TSV (e.g., data/missing-from-...tsv).
    #[clap(long)]
    input: PathBuf,

    /// Output path.
    ///
    /// Defaults to data/<input stem>-enriched.tsv.
    #[clap(long)]
    output: Option<PathBuf>,

    /// Additional TSV files to mine for CEFR/POS data.
    ///
    /// May be repeated. Defaults to scanning data/*.tsv.
    #[clap(long = "reference")]
    references: Vec<PathBuf>,

    /// Path where the Spanish frequency list should live.
    ///
    /// If the file is missing it will be downloaded automatically.
    /// Defaults to es_full_frequency.txt in the user data directory.
    #[clap(long)]
    frequency: Option<PathBuf>,
}

/// 補完処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
enum EnrichError {
    /// 入力ファイルが読めない
    #[error("Failed to read {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 出力ファイルが書けない
    #[error("Failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 頻度リストの置き場所が決定できない
    #[error("Could not determine a directory for the frequency list; pass --frequency")]
    NoFrequencyPath,

    /// 頻度リストのダウンロード失敗
    ///
    /// 補完を始める前に実行を中断します。
    #[error("Failed to download the frequency list: {0}")]
    Download(#[from] vocab::errors::DownloadError),

    /// ライブラリのエラー
    #[error(transparent)]
    Vocab(#[from] vocab::errors::VocabError),
}

/// メイン関数
///
/// コマンドライン引数をパースし、補完処理を実行します。
///
/// # 戻り値
///
/// 実行が成功した場合は`Ok(())`、失敗した場合は対応する`EnrichError`を返します。
fn main() -> Result<(), EnrichError> {
    run(Args::parse())
}

/// 補完コマンドを実行する
///
/// 頻度リストを確保し、参照索引と頻度分類器を構築したうえで、
/// 入力TSVの各行を補完して出力します。
///
/// # 引数
///
/// * `args` - コマンドライン引数
///
/// # エラー
///
/// 頻度リストの取得、入力の読み込み、出力の書き込みに失敗した場合、
/// `EnrichError`を返します。
fn run(args: Args) -> Result<(), EnrichError> {
    let frequency_path = match &args.frequency {
        Some(path) => path.clone(),
        None => fetch::default_frequency_path().ok_or(EnrichError::NoFrequencyPath)?,
    };

    if !frequency_path.is_file() {
        println!(
            "Frequency data missing at {}. Downloading from {} ...",
            frequency_path.display(),
            fetch::FREQUENCY_URL
        );
    }
    fetch::ensure_frequency_file(&frequency_path)?;

    let reference_paths = if args.references.is_empty() {
        scan_default_references()
    } else {
        args.references.clone()
    };
    let reference = ReferenceIndex::from_files(&reference_paths, &Normalizer::new());

    let frequency_file =
        File::open(&frequency_path).map_err(|source| EnrichError::Input {
            path: frequency_path.clone(),
            source,
        })?;
    let classifier = FrequencyClassifier::from_reader(frequency_file, RankThresholds::default())?;

    let input_file = File::open(&args.input).map_err(|source| EnrichError::Input {
        path: args.input.clone(),
        source,
    })?;
    let (header, rows) = read_table(input_file).map_err(|source| EnrichError::Input {
        path: args.input.clone(),
        source,
    })?;

    let enricher = Enricher::new(&reference, &classifier);
    let enriched = enricher.enrich_rows(&header, &rows)?;

    let target = resolve_output_path(args.output.as_deref(), &args.input);
    write_output(&target, &enriched).map_err(|source| EnrichError::Output {
        path: target.clone(),
        source,
    })?;

    println!("Wrote {} rows to {}", enriched.len(), target.display());
    Ok(())
}

/// data/以下のTSVを既定の参照テーブルとして列挙する
///
/// ディレクトリが無い場合は空になります。走査順を決定的にするため、
/// パスはソートされます。
fn scan_default_references() -> Vec<PathBuf> {
    let mut paths = vec![];
    if let Ok(entries) = fs::read_dir("data") {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "tsv") {
                paths.push(path);
            }
        }
    }
    paths.sort();
    paths
}

/// 出力先のパスを決定する
///
/// 明示されない場合は`data/<入力の語幹>-enriched.<拡張子>`を使います。
fn resolve_output_path(explicit: Option<&Path>, input: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("input");
    let suffix = input.extension().and_then(|s| s.to_str()).unwrap_or("tsv");
    Path::new("data").join(format!("{stem}-enriched.{suffix}"))
}

/// 補完結果を固定ヘッダ付きのTSVへ書き出す
fn write_output(target: &Path, rows: &[EnrichedRow]) -> io::Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(target)?;
    let mut wtr = BufWriter::new(file);
    write_tsv_row(&mut wtr, &EnrichedRow::HEADER)?;
    for row in rows {
        write_tsv_row(&mut wtr, &row.fields())?;
    }
    wtr.flush()?;
    Ok(())
}
