//! 語彙TSVを正準リストと比較するユーティリティ
//!
//! このバイナリは、外部の語彙TSVを正準のwords.tsvと照合し、
//! 正準リストに欠けている行を元の列構成のまま新しいTSVへ書き出します。
//! 実行の最後に、読み込み統計と欠落行数の要約ブロックを表示します。

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use vocab::utils::write_tsv_row;
use vocab::{missing_rows, EntryList, LoadStats, Normalizer, WordSet};

use chrono::Local;
use clap::Parser;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(
    name = "compare",
    version,
    about = "Compares a vocabulary TSV against the canonical word list and reports missing rows"
)]
struct Args {
    /// Path to the TSV file treated as canonical.
    #[clap(long, default_value = "data/words.tsv")]
    mine: PathBuf,

    /// Path to the TSV file whose words should exist in --mine.
    #[clap(long)]
    other: PathBuf,

    /// Path for the TSV containing missing rows.
    ///
    /// Defaults to data/missing-from-<other>-<timestamp>.tsv.
    #[clap(long)]
    output: Option<PathBuf>,

    /// Treat accented and unaccented characters as the same.
    #[clap(long)]
    ignore_accents: bool,

    /// Keep punctuation at both ends of words instead of stripping it
    /// before comparison.
    #[clap(long)]
    keep_punctuation: bool,

    /// Keep duplicate words from the other file instead of collapsing
    /// to the first occurrence.
    #[clap(long)]
    keep_duplicates: bool,

    /// Do not print the summary block.
    #[clap(long)]
    no_summary: bool,
}

/// 比較処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
enum CompareError {
    /// 入力ファイルが読めない
    ///
    /// 必須の入力が欠けている場合は致命的で、出力ファイルは書かれません。
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

    /// 語彙リストの読み込みエラー
    #[error(transparent)]
    Vocab(#[from] vocab::errors::VocabError),
}

/// メイン関数
///
/// コマンドライン引数をパースし、比較処理を実行します。
///
/// # 戻り値
///
/// 実行が成功した場合は`Ok(())`、失敗した場合は対応する`CompareError`を返します。
fn main() -> Result<(), CompareError> {
    run(Args::parse())
}

/// 比較コマンドを実行する
///
/// 正準リストと比較対象リストを読み込み、欠落行を出力ファイルへ書き出して
/// 要約を表示します。
///
/// # 引数
///
/// * `args` - コマンドライン引数
///
/// # エラー
///
/// 入力の読み込みや出力の書き込みに失敗した場合、`CompareError`を返します。
fn run(args: Args) -> Result<(), CompareError> {
    let normalizer = Normalizer::new()
        .ignore_accents(args.ignore_accents)
        .strip_punctuation(!args.keep_punctuation);

    let mine_file = File::open(&args.mine).map_err(|source| CompareError::Input {
        path: args.mine.clone(),
        source,
    })?;
    let mine = WordSet::from_reader(mine_file, &normalizer)?;

    let other_file = File::open(&args.other).map_err(|source| CompareError::Input {
        path: args.other.clone(),
        source,
    })?;
    let other = EntryList::from_reader(other_file, &normalizer, args.keep_duplicates)?;

    let missing = missing_rows(&mine, &other);

    let target = resolve_output_path(args.output.as_deref(), &args.other);
    write_missing(&target, other.header(), &missing).map_err(|source| CompareError::Output {
        path: target.clone(),
        source,
    })?;

    if !args.no_summary {
        print_summary(&args, mine.stats(), other.stats(), missing.len(), &target);
    }

    Ok(())
}

/// 出力先のパスを決定する
///
/// 明示されない場合は`data/missing-from-<stem>-<timestamp>.tsv`を使います。
/// `<stem>`は比較対象ファイルの語幹をファイル名に安全な形へ変換したものです。
fn resolve_output_path(explicit: Option<&Path>, other: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let stem = other.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    Path::new("data").join(format!("missing-from-{}-{timestamp}.tsv", sanitize_stem(stem)))
}

/// ファイル名に使えない文字の並びを`-`へ置き換える
///
/// 英数字と`.`、`_`、`-`以外の文字の連続は1つの`-`にまとめられ、
/// 両端の`-`は取り除かれます。結果が空なら`other`になります。
fn sanitize_stem(stem: &str) -> String {
    let mut safe = String::with_capacity(stem.len());
    let mut pending_dash = false;
    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            if pending_dash && !safe.is_empty() {
                safe.push('-');
            }
            pending_dash = false;
            safe.push(ch);
        } else {
            pending_dash = true;
        }
    }
    let trimmed = safe.trim_matches('-');
    if trimmed.is_empty() {
        "other".to_string()
    } else {
        trimmed.to_string()
    }
}

/// 欠落行をTSVへ書き出す
///
/// ヘッダは比較対象ファイルのものがそのまま先頭に書かれます。
/// 必要なら出力先の親ディレクトリを作成します。
fn write_missing(target: &Path, header: &[String], rows: &[&[String]]) -> io::Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(target)?;
    let mut wtr = BufWriter::new(file);
    if !header.is_empty() {
        write_tsv_row(&mut wtr, header)?;
    }
    for row in rows {
        write_tsv_row(&mut wtr, row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 要約ブロックを標準出力へ表示する
fn print_summary(
    args: &Args,
    mine_stats: &LoadStats,
    other_stats: &LoadStats,
    missing: usize,
    target: &Path,
) {
    println!("Comparison summary");
    println!("------------------");
    print_file_stats("Mine file:", &args.mine, mine_stats);
    println!();
    print_file_stats("Other file:", &args.other, other_stats);
    println!();
    println!("Missing rows written: {missing}");
    println!("Output file:          {}", target.display());
}

/// 1ファイル分の読み込み統計を表示する
fn print_file_stats(label: &str, path: &Path, stats: &LoadStats) {
    println!("{label:<18}{}", path.display());
    println!(
        "  Rows read:      {} (header skipped: {})",
        stats.rows_read, stats.header_skipped
    );
    println!("  Unique words:   {}", stats.unique_words);
    println!("  Duplicates:     {}", stats.duplicates);
    println!("  Malformed rows: {}", stats.malformed_rows);
}
