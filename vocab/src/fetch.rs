//! 頻度リストのダウンロード機能
//!
//! このモジュールは、ローカルに存在しない頻度リストを一度だけ取得して
//! キャッシュする機能を提供します。取得は実行ごとに高々1回のブロッキング
//! 操作で、リトライは行われません。

#![cfg(feature = "download")]
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::errors::DownloadError;

/// 頻度リストの取得元URL。
///
/// hermitdave/FrequencyWordsのスペイン語全量リスト(2018年版)です。
pub const FREQUENCY_URL: &str =
    "https://raw.githubusercontent.com/hermitdave/FrequencyWords/master/content/2018/es/es_full.txt";

/// キャッシュされる頻度リストのファイル名。
pub const FREQUENCY_FILENAME: &str = "es_full_frequency.txt";

/// 既定のデータディレクトリのパス。
///
/// ユーザー固有のローカルデータディレクトリ内の`vocab`サブディレクトリを指します。
/// 各プラットフォームでの標準的なデータディレクトリ:
/// - Linux: `$XDG_DATA_HOME/vocab` または `$HOME/.local/share/vocab`
/// - macOS: `$HOME/Library/Application Support/vocab`
/// - Windows: `{FOLDERID_LocalAppData}/vocab`
pub static DEFAULT_DATA_DIR: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    let path = dirs::data_local_dir()?.join("vocab");
    fs::create_dir_all(&path).ok()?;

    Some(path)
});

/// 既定の頻度リストのパスを返します。
///
/// # 戻り値
///
/// データディレクトリが決定できない場合は`None`。
pub fn default_frequency_path() -> Option<PathBuf> {
    DEFAULT_DATA_DIR
        .as_ref()
        .map(|dir| dir.join(FREQUENCY_FILENAME))
}

/// 頻度リストがローカルに存在することを保証します。
///
/// ファイルが既に存在する場合は何もしません。存在しない場合は
/// [`FREQUENCY_URL`]からダウンロードし、同じディレクトリの一時ファイルを
/// 経由して原子的に指定パスへ保存します。以降の実行はキャッシュを使います。
///
/// # 引数
///
/// * `path` - 頻度リストを置くパス
///
/// # 戻り値
///
/// 成功時は`Ok(())`
///
/// # エラー
///
/// ダウンロードや保存に失敗した場合にエラーを返します。
/// 失敗は致命的であり、呼び出し側は処理を中断する必要があります。
pub fn ensure_frequency_file(path: &Path) -> Result<(), DownloadError> {
    if path.is_file() {
        return Ok(());
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut response = reqwest::blocking::get(FREQUENCY_URL)?;
    if !response.status().is_success() {
        return Err(DownloadError::HttpStatus(response.status()));
    }

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    response.copy_to(&mut temp_file)?;
    temp_file.persist(path)?;

    Ok(())
}
