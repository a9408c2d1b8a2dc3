//! 正準集合との比較モジュール
//!
//! このモジュールは、比較対象リストの行を正準集合への所属で仕分けます。
//! 正規化は読み込み時に完了しているため、ここではキーの集合所属のみを
//! 判定します。

use crate::wordlist::{EntryList, WordSet};

/// 正準集合に存在しない行を抽出します。
///
/// 出力の順序は入力リストの順序を保ちます。この関数は純粋な
/// 集合所属フィルタであり、入力が整形済みであること以外の
/// 失敗モードを持ちません。
///
/// # 引数
///
/// * `canonical` - 正準のキー集合
/// * `other` - 比較対象リスト
///
/// # 戻り値
///
/// 正準集合にキーが無い行のスライスのベクター
pub fn missing_rows<'a>(canonical: &WordSet, other: &'a EntryList) -> Vec<&'a [String]> {
    other
        .rows()
        .iter()
        .filter(|(key, _)| !canonical.contains(key))
        .map(|(_, row)| row.as_slice())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::Normalizer;

    #[test]
    fn test_missing_preserves_order_and_collapses_duplicates() {
        let normalizer = Normalizer::new().ignore_accents(true).strip_punctuation(true);
        let mine = "word\nperro\n";
        let other = "word\tdefinition\nPerro.\tdog\ngato\tcat\nGATO\tcat\n";

        let canonical = WordSet::from_reader(mine.as_bytes(), &normalizer).unwrap();
        let entries = EntryList::from_reader(other.as_bytes(), &normalizer, false).unwrap();

        let missing = missing_rows(&canonical, &entries);
        assert_eq!(1, missing.len());
        assert_eq!(&["gato", "cat"], missing[0]);
    }

    #[test]
    fn test_round_trip_has_no_missing_rows() {
        let data = "word\tdefinition\nperro\tdog\ngato\tcat\nsilla\tchair\n";
        let normalizer = Normalizer::new().strip_punctuation(true);

        let canonical = WordSet::from_reader(data.as_bytes(), &normalizer).unwrap();
        let entries = EntryList::from_reader(data.as_bytes(), &normalizer, false).unwrap();

        assert!(missing_rows(&canonical, &entries).is_empty());
    }

    #[test]
    fn test_all_missing_when_canonical_is_empty() {
        let normalizer = Normalizer::new();
        let canonical = WordSet::from_reader("word\n".as_bytes(), &normalizer).unwrap();
        let entries =
            EntryList::from_reader("word\nperro\ngato\n".as_bytes(), &normalizer, false).unwrap();

        let missing = missing_rows(&canonical, &entries);
        assert_eq!(2, missing.len());
        assert_eq!(&["perro"], missing[0]);
        assert_eq!(&["gato"], missing[1]);
    }
}
