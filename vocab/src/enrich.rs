//! メタデータ補完エンジンのモジュール
//!
//! このモジュールは、欠落行の品詞・CEFRレベル・タグを、参照索引の照会、
//! 頻度分類、語尾ヒューリスティクスの明示的なフォールバック連鎖で解決します。
//! 各ステップは`Option`を返し、最初に値を返したステップが勝ちます。
//! どの行も落とされず、入力1行につき必ず固定5フィールドの出力行が
//! 1つ生成されます。

mod pos;

use crate::errors::{Result, VocabError};
use crate::frequency::FrequencyClassifier;
use crate::normalizer::Normalizer;
use crate::reference::{
    find_column, ReferenceEntry, ReferenceIndex, ENGLISH_ALIASES, POS_COLUMN_ALIASES,
    SPANISH_ALIASES,
};

/// 補完結果の固定5フィールド行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRow {
    /// スペイン語の単語(入力の表記のまま)
    pub spanish: String,

    /// 英語の定義(入力に無ければ空文字列)
    pub english: String,

    /// 解決された品詞(信号が無ければ空文字列)
    pub pos: String,

    /// 解決されたCEFRレベル
    pub cefr: String,

    /// 解決されたタグ(現状は参照由来のみ)
    pub tags: String,
}

impl EnrichedRow {
    /// 補完出力の固定ヘッダ。
    pub const HEADER: [&'static str; 5] = ["spanish", "english", "pos", "cefr", "tags"];

    /// フィールドを出力順で返します。
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.spanish,
            &self.english,
            &self.pos,
            &self.cefr,
            &self.tags,
        ]
    }
}

/// 欠落行へメタデータを補完するエンリッチャ。
///
/// 参照索引と頻度分類器への参照を保持します。どちらも構築後は
/// 読み取り専用で、補完中に変更されることはありません。
pub struct Enricher<'a> {
    reference: &'a ReferenceIndex,
    classifier: &'a FrequencyClassifier,
    normalizer: Normalizer,
}

impl<'a> Enricher<'a> {
    /// エンリッチャを作成します。
    ///
    /// # 引数
    ///
    /// * `reference` - 参照索引
    /// * `classifier` - 頻度分類器
    pub fn new(reference: &'a ReferenceIndex, classifier: &'a FrequencyClassifier) -> Self {
        Self {
            reference,
            classifier,
            normalizer: Normalizer::new(),
        }
    }

    /// ヘッダ付きの欠落行集合を補完します。
    ///
    /// ヘッダから単語・定義・品詞の列位置を解決し、各行を
    /// フォールバック連鎖で固定5フィールドの行へ変換します。
    /// 出力の順序は入力の順序を保ち、行数も一致します。
    ///
    /// # 引数
    ///
    /// * `header` - 入力のヘッダ行
    /// * `rows` - 補完対象の行
    ///
    /// # 戻り値
    ///
    /// 補完された行のベクター
    ///
    /// # エラー
    ///
    /// ヘッダに単語列が見つからない場合、
    /// [`VocabError::InvalidFormat`]を返します。
    pub fn enrich_rows(&self, header: &[String], rows: &[Vec<String>]) -> Result<Vec<EnrichedRow>> {
        let word_idx = find_column(header, SPANISH_ALIASES).ok_or_else(|| {
            VocabError::invalid_format("header", "The input TSV must include a word column")
        })?;
        let def_idx = find_column(header, ENGLISH_ALIASES);
        let pos_idx = find_column(header, POS_COLUMN_ALIASES);

        let mut enriched = Vec::with_capacity(rows.len());
        for row in rows {
            enriched.push(self.enrich_row(row, word_idx, def_idx, pos_idx));
        }
        Ok(enriched)
    }

    /// 1行を補完します。
    fn enrich_row(
        &self,
        row: &[String],
        word_idx: usize,
        def_idx: Option<usize>,
        pos_idx: Option<usize>,
    ) -> EnrichedRow {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map_or("", |s| s.trim());
        let word = cell(Some(word_idx));
        let english = cell(def_idx);
        let source_pos = cell(pos_idx);

        let key = self.normalizer.key(word);
        let entry = self.reference.get(&key);

        let pos = resolve_pos(entry, source_pos, word, english);
        let cefr = resolve_cefr(entry, word, self.classifier);
        let tags = resolve_tags(entry, word, english, &pos);

        EnrichedRow {
            spanish: word.to_string(),
            english: english.to_string(),
            pos,
            cefr,
            tags,
        }
    }
}

/// 品詞のフォールバック連鎖。
///
/// 参照エントリ → 入力の品詞フィールド → 定義の表層形 → 語尾の順に試し、
/// どれも一致しなければ空文字列のままにします。
fn resolve_pos(
    entry: Option<&ReferenceEntry>,
    source_pos: &str,
    word: &str,
    english: &str,
) -> String {
    pos_from_reference(entry)
        .or_else(|| pos::canonical(source_pos).map(str::to_string))
        .or_else(|| pos::from_definition(english).map(str::to_string))
        .or_else(|| pos::from_suffix(word).map(str::to_string))
        .unwrap_or_default()
}

/// 参照エントリの品詞を正準形へ対応付けて返します。
///
/// 別名表に無い表記は参照の値をそのまま信頼します。
fn pos_from_reference(entry: Option<&ReferenceEntry>) -> Option<String> {
    let pos = entry?.pos.trim();
    if pos.is_empty() {
        return None;
    }
    Some(pos::canonical(pos).map_or_else(|| pos.to_string(), str::to_string))
}

/// CEFRレベルのフォールバック連鎖。参照エントリ → 頻度分類の順です。
fn resolve_cefr(entry: Option<&ReferenceEntry>, word: &str, classifier: &FrequencyClassifier) -> String {
    entry
        .map(|e| e.cefr.trim())
        .filter(|cefr| !cefr.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| classifier.classify(word).name().to_string())
}

/// タグのフォールバック連鎖。参照エントリ → タグ推定フックの順です。
fn resolve_tags(entry: Option<&ReferenceEntry>, word: &str, english: &str, pos: &str) -> String {
    entry
        .map(|e| e.tags.trim())
        .filter(|tags| !tags.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| infer_tags(word, english, pos))
}

/// タグ推定のフック。
///
/// 現状は常に空文字列を返します。MWUやドメインタグの照合を後から
/// 差し込むための、空の結果を安定して返す拡張点です。
fn infer_tags(_word: &str, _english: &str, _pos: &str) -> String {
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::RankThresholds;
    use crate::utils::read_table;

    fn header_of(line: &str) -> Vec<String> {
        line.split('\t').map(str::to_string).collect()
    }

    fn rows_of(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_missing_word_column_is_an_error() {
        let reference = ReferenceIndex::new();
        let classifier = FrequencyClassifier::empty();
        let enricher = Enricher::new(&reference, &classifier);

        let result = enricher.enrich_rows(&header_of("foo\tbar"), &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_reference_entry_wins_over_heuristics() {
        let mut reference = ReferenceIndex::new();
        reference.add_table(
            "word\tpos\tcefr\ttags\nhablar\tverbo\tA1.2\tcommunication\n".as_bytes(),
            &Normalizer::new(),
        );
        let classifier = FrequencyClassifier::empty();
        let enricher = Enricher::new(&reference, &classifier);

        let rows = rows_of(&[&["hablar", "to speak"]]);
        let enriched = enricher
            .enrich_rows(&header_of("word\tdefinition"), &rows)
            .unwrap();

        assert_eq!(1, enriched.len());
        assert_eq!("verb", enriched[0].pos);
        assert_eq!("A1.2", enriched[0].cefr);
        assert_eq!("communication", enriched[0].tags);
    }

    #[test]
    fn test_unknown_reference_pos_is_kept_verbatim() {
        let mut reference = ReferenceIndex::new();
        reference.add_table(
            "word\tpos\tcefr\ngato\tgerundio\tA2.1\n".as_bytes(),
            &Normalizer::new(),
        );
        let classifier = FrequencyClassifier::empty();
        let enricher = Enricher::new(&reference, &classifier);

        let rows = rows_of(&[&["gato"]]);
        let enriched = enricher.enrich_rows(&header_of("word"), &rows).unwrap();
        assert_eq!("gerundio", enriched[0].pos);
    }

    #[test]
    fn test_source_pos_is_alias_mapped() {
        let reference = ReferenceIndex::new();
        let classifier = FrequencyClassifier::empty();
        let enricher = Enricher::new(&reference, &classifier);

        let rows = rows_of(&[&["azul", "blue", "Adjetivo"]]);
        let enriched = enricher
            .enrich_rows(&header_of("word\tdefinition\tpos"), &rows)
            .unwrap();
        assert_eq!("adj", enriched[0].pos);
    }

    #[test]
    fn test_definition_heuristic_implies_verb() {
        let reference = ReferenceIndex::new();
        let classifier = FrequencyClassifier::empty();
        let enricher = Enricher::new(&reference, &classifier);

        // "soñar"は"-ar"でも動詞だが、定義が先に一致する
        let rows = rows_of(&[&["soñar", "to dream"]]);
        let enriched = enricher
            .enrich_rows(&header_of("word\tdefinition"), &rows)
            .unwrap();
        assert_eq!("verb", enriched[0].pos);
    }

    #[test]
    fn test_no_signal_leaves_pos_blank() {
        let reference = ReferenceIndex::new();
        let classifier = FrequencyClassifier::empty();
        let enricher = Enricher::new(&reference, &classifier);

        let rows = rows_of(&[&["azul", "blue"]]);
        let enriched = enricher
            .enrich_rows(&header_of("word\tdefinition"), &rows)
            .unwrap();
        assert_eq!("", enriched[0].pos);
        assert_eq!("B2.2", enriched[0].cefr);
        assert_eq!("", enriched[0].tags);
    }

    #[test]
    fn test_every_row_produces_exactly_one_output_row() {
        let reference = ReferenceIndex::new();
        let classifier = FrequencyClassifier::empty();
        let enricher = Enricher::new(&reference, &classifier);

        let (header, rows) =
            read_table("word\tdefinition\nperro\tdog\n\ngato\tcat\nsilla\tchair\n".as_bytes())
                .unwrap();
        let enriched = enricher.enrich_rows(&header, &rows).unwrap();

        assert_eq!(rows.len(), enriched.len());
        assert_eq!("perro", enriched[0].spanish);
        assert_eq!("gato", enriched[1].spanish);
        assert_eq!("silla", enriched[2].spanish);
    }

    #[test]
    fn test_hablar_end_to_end_without_reference() {
        let reference = ReferenceIndex::new();
        let mut lines = String::new();
        for rank in 1..=300 {
            if rank == 200 {
                lines.push_str("hablar 1000\n");
            } else {
                lines.push_str(&format!("palabra{rank} 1000\n"));
            }
        }
        let classifier =
            FrequencyClassifier::from_reader(lines.as_bytes(), RankThresholds::DEFAULT).unwrap();
        let enricher = Enricher::new(&reference, &classifier);

        let rows = rows_of(&[&["hablar"]]);
        let enriched = enricher.enrich_rows(&header_of("word"), &rows).unwrap();

        assert_eq!("verb", enriched[0].pos);
        assert_eq!("A1.1", enriched[0].cefr);
        assert_eq!("", enriched[0].tags);
    }
}
