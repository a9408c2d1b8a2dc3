//! エラー型の定義
//!
//! このモジュールは、vocabライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt;

/// vocab専用のResult型
///
/// エラー型としてデフォルトで[`VocabError`]を使用します。
pub type Result<T, E = VocabError> = std::result::Result<T, E>;

/// vocabのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 入出力エラー
    ///
    /// [`std::io::Error`]のエラーバリアント。
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// ダウンロードエラー
    ///
    /// [`DownloadError`]のエラーバリアント。
    /// `download`フィーチャーが有効な場合のみ利用可能です。
    #[cfg(feature = "download")]
    #[error(transparent)]
    Download(#[from] DownloadError),
}

impl VocabError {
    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }
}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// ダウンロード関連のエラー
///
/// `download`フィーチャーが有効な場合のみ利用可能です。
/// 頻度リストのダウンロード中に発生する可能性のあるエラーを表現します。
#[cfg(feature = "download")]
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// ネットワークリクエストの失敗
    #[error("Network request failed")]
    Request(#[from] reqwest::Error),

    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTPステータスエラー
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// パスの永続化エラー
    #[error(transparent)]
    PathPersist(#[from] tempfile::PersistError),
}
