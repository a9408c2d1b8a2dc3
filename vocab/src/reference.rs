//! 参照テーブルの索引モジュール
//!
//! このモジュールは、複数の参照テーブルをキー→メタデータの単一の索引へ
//! 統合します。テーブルは供給された順に畳み込まれ、フィールド単位の
//! fill-preference規則で競合が解決されます。構築後の索引は読み取り専用です。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use hashbrown::HashMap;

use crate::normalizer::Normalizer;
use crate::utils::parse_tsv_row;

/// 単語列として認識されるヘッダ表記。
pub(crate) const SPANISH_ALIASES: &[&str] = &["spanish", "word", "palabra"];

/// 定義列として認識されるヘッダ表記。
pub(crate) const ENGLISH_ALIASES: &[&str] = &["english", "definition", "meaning"];

/// 品詞列として認識されるヘッダ表記。
pub(crate) const POS_COLUMN_ALIASES: &[&str] = &["pos", "part of speech", "speech"];

/// CEFR列として認識されるヘッダ表記。
pub(crate) const CEFR_ALIASES: &[&str] = &["cefr", "level"];

/// タグ列として認識されるヘッダ表記。
pub(crate) const TAGS_ALIASES: &[&str] = &["tags", "tag"];

/// ヘッダ文字列を比較用に正規化します(両端空白とBOMの除去・小文字化)。
pub(crate) fn normalize_header(value: &str) -> String {
    value.trim().trim_start_matches('\u{feff}').to_lowercase()
}

/// 別名集合に一致する列の位置をヘッダから探します。
pub(crate) fn find_column(header: &[String], aliases: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|col| aliases.contains(&normalize_header(col).as_str()))
}

/// 1つの参照テーブルで解決された列配置。
///
/// 列の解決はテーブルごとに一度だけ行われ、行の処理では再解決されません。
struct ColumnLayout {
    spanish: usize,
    pos: usize,
    cefr: usize,
    tags: Option<usize>,
}

impl ColumnLayout {
    /// ヘッダ行から列配置を解決します。
    ///
    /// 単語・品詞・CEFRの3列がすべて認識できない場合は`None`を返し、
    /// テーブル全体が索引への寄与から除外されます。タグ列は任意です。
    fn resolve(header: &[String]) -> Option<Self> {
        Some(Self {
            spanish: find_column(header, SPANISH_ALIASES)?,
            pos: find_column(header, POS_COLUMN_ALIASES)?,
            cefr: find_column(header, CEFR_ALIASES)?,
            tags: find_column(header, TAGS_ALIASES),
        })
    }
}

/// キーごとの既知メタデータ(品詞・CEFRレベル・タグ)。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceEntry {
    /// 参照テーブルに現れた元の単語表記
    pub spanish: String,

    /// 品詞(未知の場合は空文字列)
    pub pos: String,

    /// CEFRレベル(未知の場合は空文字列)
    pub cefr: String,

    /// タグ(未知の場合は空文字列)
    pub tags: String,
}

impl ReferenceEntry {
    /// 空のフィールドだけを候補の値で埋めます。
    ///
    /// 既に値を持つフィールドは後続テーブルの値で上書きされません。
    /// 品詞も含め、最初に非空の値を供給した候補が勝ちます。
    fn fill_from(&mut self, candidate: &ReferenceEntry) {
        if self.pos.is_empty() && !candidate.pos.is_empty() {
            self.pos = candidate.pos.clone();
        }
        if self.cefr.is_empty() && !candidate.cefr.is_empty() {
            self.cefr = candidate.cefr.clone();
        }
        if self.tags.is_empty() && !candidate.tags.is_empty() {
            self.tags = candidate.tags.clone();
        }
    }
}

/// 複数の参照テーブルを統合したキー→メタデータの索引。
///
/// 構築は供給順のテーブル列に対する明示的な畳み込みであり、
/// 一度埋まったフィールドが後から退行することはありません。
#[derive(Default)]
pub struct ReferenceIndex {
    entries: HashMap<String, ReferenceEntry>,
}

impl ReferenceIndex {
    /// 空の索引を作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 参照テーブルのファイル群を供給順に読み込んで索引を構築します。
    ///
    /// 開けないファイルや必須列を欠くテーブルは黙ってスキップされます。
    /// 参照索引は最善努力であり、テーブルの欠落は致命的ではありません。
    ///
    /// # 引数
    ///
    /// * `paths` - 参照テーブルのパス列
    /// * `normalizer` - キー導出に使う正規化器
    pub fn from_files<P>(paths: &[P], normalizer: &Normalizer) -> Self
    where
        P: AsRef<Path>,
    {
        let mut index = Self::new();
        for path in paths {
            if let Ok(file) = File::open(path.as_ref()) {
                index.add_table(file, normalizer);
            }
        }
        index
    }

    /// 1つの参照テーブルを索引へ畳み込みます。
    ///
    /// ヘッダ行の列は別名集合と照合され、単語・品詞・CEFRの3列が
    /// 認識できないテーブルは寄与しません。単語フィールドが空の行は
    /// スキップされます。既存エントリに対しては空のフィールドのみが
    /// 埋められます。
    ///
    /// # 引数
    ///
    /// * `rdr` - テーブルのリーダー
    /// * `normalizer` - キー導出に使う正規化器
    pub fn add_table<R>(&mut self, mut rdr: R, normalizer: &Normalizer)
    where
        R: Read,
    {
        let mut bytes = vec![];
        if rdr.read_to_end(&mut bytes).is_err() {
            return;
        }
        let text = String::from_utf8_lossy(&bytes);
        let mut lines = text.lines();

        let header = match lines.next() {
            Some(line) => parse_tsv_row(line),
            None => return,
        };
        let layout = match ColumnLayout::resolve(&header) {
            Some(layout) => layout,
            None => return,
        };

        for line in lines {
            let row = parse_tsv_row(line);
            let word = match row.get(layout.spanish) {
                Some(w) if !w.trim().is_empty() => w.trim(),
                _ => continue,
            };
            let key = normalizer.key(word);
            if key.is_empty() {
                continue;
            }

            let field = |idx: usize| row.get(idx).map(|s| s.trim().to_string()).unwrap_or_default();
            let candidate = ReferenceEntry {
                spanish: word.to_string(),
                pos: field(layout.pos),
                cefr: field(layout.cefr),
                tags: layout.tags.map(field).unwrap_or_default(),
            };

            self.entries
                .entry(key)
                .and_modify(|existing| existing.fill_from(&candidate))
                .or_insert(candidate);
        }
    }

    /// キーに対応するエントリを取得します。
    pub fn get(&self, key: &str) -> Option<&ReferenceEntry> {
        self.entries.get(key)
    }

    /// 索引に含まれるエントリの数を返します。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 索引が空かどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
