//! # vocab
//!
//! 個人のスペイン語語彙コーパスを整合・補完するためのコアライブラリです。
//!
//! ## 概要
//!
//! このライブラリは、出自の異なる2つの語彙リストを「同じ単語」という単一の
//! 概念へ照合する正規化・比較エンジンと、欠落した分類メタデータ
//! (品詞・CEFRレベル・タグ)を参照索引と頻度ランクから再構成する
//! 補完エンジンを提供します。
//!
//! 単語の同一性は正規化キーのみで判定されます。キーの導出は純粋かつ決定的で、
//! 2つの単語が同じであることと、そのキーが等しいことは同値です。
//!
//! ## 主な機能
//!
//! - **単語正規化**: 大文字小文字・両端の句読点・アクセントの違いを吸収した比較キーの導出
//! - **集合比較**: 正準リストに欠けている行の順序保存抽出
//! - **参照索引**: 複数の参照テーブルを first-wins / fill-gaps 規則で統合した索引
//! - **頻度分類**: 頻度ランクの閾値表によるCEFR風レベルの推定
//! - **補完**: 参照→ヒューリスティクス→空欄の明示的なフォールバック連鎖
//!
//! ## 使用例
//!
//! ```
//! use vocab::{missing_rows, EntryList, Normalizer, WordSet};
//!
//! let mine = "word\tdefinition\nperro\tdog\n";
//! let other = "word\tdefinition\nPerro.\tdog\ngato\tcat\n";
//!
//! let normalizer = Normalizer::new().strip_punctuation(true);
//! let canonical = WordSet::from_reader(mine.as_bytes(), &normalizer)?;
//! let entries = EntryList::from_reader(other.as_bytes(), &normalizer, false)?;
//!
//! let missing = missing_rows(&canonical, &entries);
//! assert_eq!(1, missing.len());
//! assert_eq!("gato", missing[0][0]);
//! # Ok::<(), vocab::errors::VocabError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

/// 正準集合との比較
pub mod compare;

/// メタデータ補完エンジン
pub mod enrich;

/// エラー型の定義
pub mod errors;

/// 頻度リストのダウンロード
///
/// `download`フィーチャーが有効な場合のみ利用可能です。
#[cfg_attr(docsrs, doc(cfg(feature = "download")))]
pub mod fetch;

/// 頻度ランクによるレベル分類
pub mod frequency;

/// 単語正規化
pub mod normalizer;

/// 参照テーブルの索引
pub mod reference;

/// 内部ユーティリティ関数
pub mod utils;

/// 語彙リストの読み込み
pub mod wordlist;


// Re-exports
pub use compare::missing_rows;
pub use enrich::{EnrichedRow, Enricher};
pub use frequency::{CefrLevel, FrequencyClassifier, RankThresholds};
pub use normalizer::Normalizer;
pub use reference::{ReferenceEntry, ReferenceIndex};
pub use wordlist::{EntryList, LoadStats, WordSet};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
