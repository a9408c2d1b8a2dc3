//! 語彙リストの読み込みモジュール
//!
//! このモジュールは、タブ区切りの語彙リストから正規化キーの集合
//! ([`WordSet`])と、元の行を保持した順序付きリスト([`EntryList`])を
//! 構築します。どちらの読み込みも1回の走査で統計情報を集計します。

use std::io::{BufRead, BufReader, Read};

use hashbrown::HashSet;

use crate::errors::Result;
use crate::normalizer::Normalizer;
use crate::utils::parse_tsv_row;

/// 1回の読み込み操作に付随する統計情報。
///
/// 読み込み開始時に作成され、入力を消費し終えた時点で確定します。
/// 不正行や重複は集計のみされ、行単位で報告されることはありません。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    /// 読み込んだ行数(ヘッダ行を含む)
    pub rows_read: usize,

    /// ヘッダ行をスキップしたかどうか
    pub header_skipped: bool,

    /// 単語フィールドが空、または正規化結果が空だった行数
    pub malformed_rows: usize,

    /// 既出キーの再出現回数
    pub duplicates: usize,

    /// 一意なキーの数
    pub unique_words: usize,
}

/// 正規化キーの集合(正準リスト)。
pub struct WordSet {
    keys: HashSet<String>,
    stats: LoadStats,
}

impl WordSet {
    /// 指定されたリーダーから正準の単語集合を読み込みます。
    ///
    /// 先頭行は常にヘッダとして扱われ、データにはなりません。
    /// 最初のフィールドが無い行と、正規化結果が空になる行は不正行として
    /// 集計されスキップされます。キーの再挿入は重複として集計されます。
    ///
    /// # 引数
    ///
    /// * `rdr` - 語彙リストのリーダー
    /// * `normalizer` - キー導出に使う正規化器
    ///
    /// # 戻り値
    ///
    /// 読み込まれた単語集合
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、I/Oエラーが返されます。
    pub fn from_reader<R>(rdr: R, normalizer: &Normalizer) -> Result<Self>
    where
        R: Read,
    {
        let buf = BufReader::new(rdr);
        let mut stats = LoadStats::default();
        let mut keys = HashSet::new();

        for (idx, line) in buf.lines().enumerate() {
            let line = line?;
            stats.rows_read += 1;
            if idx == 0 {
                stats.header_skipped = true;
                continue;
            }
            let row = parse_tsv_row(&line);
            let word = match row.first() {
                Some(w) if !w.trim().is_empty() => w,
                _ => {
                    stats.malformed_rows += 1;
                    continue;
                }
            };
            let key = normalizer.key(word);
            if key.is_empty() {
                stats.malformed_rows += 1;
                continue;
            }
            if !keys.insert(key) {
                stats.duplicates += 1;
            }
        }

        stats.unique_words = keys.len();
        Ok(Self { keys, stats })
    }

    /// キーが集合に含まれるかを判定します。
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// 一意なキーの数を返します。
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// 集合が空かどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// 読み込み統計を返します。
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}

/// 比較対象リストの表現。
///
/// 各行をキーと元のフィールド列のペアとして入力順に保持し、
/// 再出力のためにヘッダ行もそのまま保持します。
pub struct EntryList {
    header: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
    stats: LoadStats,
}

impl EntryList {
    /// 指定されたリーダーから比較対象リストを読み込みます。
    ///
    /// 先頭行はヘッダとして取り込まれます。既定では同じキーの最初の出現のみが
    /// 保持され、以降の出現は重複として集計のうえ破棄されます。
    /// `keep_duplicates`が真の場合、すべての出現が元の順序で保持されます
    /// (重複の集計は変わりません)。
    ///
    /// # 引数
    ///
    /// * `rdr` - 語彙リストのリーダー
    /// * `normalizer` - キー導出に使う正規化器
    /// * `keep_duplicates` - 重複行を保持するかどうか
    ///
    /// # 戻り値
    ///
    /// 読み込まれたリスト
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、I/Oエラーが返されます。
    pub fn from_reader<R>(rdr: R, normalizer: &Normalizer, keep_duplicates: bool) -> Result<Self>
    where
        R: Read,
    {
        let buf = BufReader::new(rdr);
        let mut stats = LoadStats::default();
        let mut rows: Vec<(String, Vec<String>)> = vec![];
        let mut seen: HashSet<String> = HashSet::new();
        let mut header = vec![];

        for (idx, line) in buf.lines().enumerate() {
            let line = line?;
            stats.rows_read += 1;
            if idx == 0 {
                header = parse_tsv_row(&line);
                stats.header_skipped = true;
                continue;
            }
            let row = parse_tsv_row(&line);
            let word = match row.first() {
                Some(w) if !w.trim().is_empty() => w,
                _ => {
                    stats.malformed_rows += 1;
                    continue;
                }
            };
            let key = normalizer.key(word);
            if key.is_empty() {
                stats.malformed_rows += 1;
                continue;
            }

            if seen.contains(&key) {
                stats.duplicates += 1;
                if !keep_duplicates {
                    continue;
                }
            } else {
                seen.insert(key.clone());
            }

            rows.push((key, row));
        }

        stats.unique_words = seen.len();
        Ok(Self { header, rows, stats })
    }

    /// 取り込んだヘッダ行を返します。
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// (キー, 元の行)のペアを入力順で返します。
    pub fn rows(&self) -> &[(String, Vec<String>)] {
        &self.rows
    }

    /// 保持している行数を返します。
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// リストが空かどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 読み込み統計を返します。
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_word_set() {
        let data = "word\tdefinition\nperro\tdog\nGato.\tcat\n\t\nperro\tdog again\n";
        let normalizer = Normalizer::new().strip_punctuation(true);
        let set = WordSet::from_reader(data.as_bytes(), &normalizer).unwrap();

        assert!(set.contains("perro"));
        assert!(set.contains("gato"));
        assert!(!set.contains("word"));
        assert_eq!(2, set.len());

        let stats = set.stats();
        assert_eq!(5, stats.rows_read);
        assert!(stats.header_skipped);
        assert_eq!(1, stats.malformed_rows);
        assert_eq!(1, stats.duplicates);
        assert_eq!(2, stats.unique_words);
    }

    #[test]
    fn test_header_is_never_data() {
        // ヘッダ行の内容はスキーマに一致する必要がなく、常にスキップされる
        let data = "perro\tdog\ngato\tcat\n";
        let set = WordSet::from_reader(data.as_bytes(), &Normalizer::new()).unwrap();
        assert!(!set.contains("perro"));
        assert!(set.contains("gato"));
    }

    #[test]
    fn test_punctuation_only_word_is_malformed() {
        let data = "word\n...\n";
        let normalizer = Normalizer::new().strip_punctuation(true);
        let set = WordSet::from_reader(data.as_bytes(), &normalizer).unwrap();
        assert_eq!(0, set.len());
        assert_eq!(1, set.stats().malformed_rows);
    }

    #[test]
    fn test_load_entry_list_collapses_duplicates() {
        let data = "word\tdefinition\ngato\tcat\nGATO\tcat again\nperro\tdog\n";
        let normalizer = Normalizer::new();
        let list = EntryList::from_reader(data.as_bytes(), &normalizer, false).unwrap();

        assert_eq!(&["word", "definition"], list.header());
        assert_eq!(2, list.len());
        assert_eq!("gato", list.rows()[0].0);
        assert_eq!(&["gato", "cat"], list.rows()[0].1.as_slice());
        assert_eq!("perro", list.rows()[1].0);

        let stats = list.stats();
        assert_eq!(1, stats.duplicates);
        assert_eq!(2, stats.unique_words);
    }

    #[test]
    fn test_load_entry_list_keep_duplicates() {
        let data = "word\tdefinition\ngato\tcat\nGATO\tcat again\n";
        let normalizer = Normalizer::new();
        let list = EntryList::from_reader(data.as_bytes(), &normalizer, true).unwrap();

        assert_eq!(2, list.len());
        assert_eq!(&["gato", "cat"], list.rows()[0].1.as_slice());
        assert_eq!(&["GATO", "cat again"], list.rows()[1].1.as_slice());
        assert_eq!(1, list.stats().duplicates);
        assert_eq!(1, list.stats().unique_words);
    }
}
