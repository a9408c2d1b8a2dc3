//! 単語を比較キーへ正規化するモジュール
//!
//! このモジュールは、生の単語文字列から比較・照合に使う正規化キーを
//! 導出します。キーは語彙リスト間で単語の同一性を判定する唯一の単位です。

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 両端から取り除く句読点の既定集合。
///
/// ASCII句読点に加えて、スペイン語の逆疑問符・逆感嘆符を含みます。
/// 語中の句読点(複合句のピリオド等)には適用されません。
pub const STRIP_CHARS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~\u{bf}\u{a1}";

/// 単語からキーを導出する正規化器。
///
/// 正規化は次の順で行われます:
///
/// 1. 両端の空白を除去する
/// 2. 句読点除去が有効なら、[`STRIP_CHARS`]と空白を両端からのみ除去する
/// 3. Unicodeの小文字変換を適用する(全角文字にも対応)
/// 4. アクセント無視が有効なら、正準分解(NFD)して結合記号を落とす。
///    無効なら正準合成(NFC)へ揃える
///
/// キーの導出は入力と2つのフラグのみの純粋関数で、冪等です。
/// 結果が空文字列になった単語は使用不能として扱ってください。
///
/// # 使用例
///
/// ```
/// use vocab::Normalizer;
///
/// let normalizer = Normalizer::new().ignore_accents(true).strip_punctuation(true);
/// assert_eq!("cafe", normalizer.key("Café."));
/// assert_eq!("cafe", normalizer.key("  cafe"));
/// assert_eq!("cafe", normalizer.key("CAFÉ"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    ignore_accents: bool,
    strip_punctuation: bool,
}

impl Normalizer {
    /// 既定の正規化器を作成します。
    ///
    /// アクセント無視・句読点除去はどちらも無効です。
    pub const fn new() -> Self {
        Self {
            ignore_accents: false,
            strip_punctuation: false,
        }
    }

    /// アクセント付き文字とアクセント無し文字を同一視するかを設定します。
    pub const fn ignore_accents(mut self, yes: bool) -> Self {
        self.ignore_accents = yes;
        self
    }

    /// 両端の句読点を除去するかを設定します。
    pub const fn strip_punctuation(mut self, yes: bool) -> Self {
        self.strip_punctuation = yes;
        self
    }

    /// 生の単語文字列から比較キーを導出します。
    ///
    /// # 引数
    ///
    /// * `raw` - 生の単語文字列
    ///
    /// # 戻り値
    ///
    /// 正規化されたキー。空文字列は「使用不能」を意味し、
    /// 呼び出し側は該当行を不正行として扱う必要があります。
    pub fn key(&self, raw: &str) -> String {
        let mut text = raw.trim();
        if self.strip_punctuation {
            text = text.trim_matches(|c: char| c.is_whitespace() || STRIP_CHARS.contains(c));
        }
        let lowered: String = text.chars().flat_map(char::to_lowercase).collect();
        if self.ignore_accents {
            lowered.nfd().filter(|c| !is_combining_mark(*c)).collect()
        } else {
            lowered.nfc().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_normalizers() -> [Normalizer; 4] {
        [
            Normalizer::new(),
            Normalizer::new().ignore_accents(true),
            Normalizer::new().strip_punctuation(true),
            Normalizer::new().ignore_accents(true).strip_punctuation(true),
        ]
    }

    #[test]
    fn test_key_is_idempotent() {
        let words = ["  Café. ", "¿qué?", "HABLAR", "p. ej.", "año", "Ｃａｆé"];
        for normalizer in all_normalizers() {
            for word in words {
                let once = normalizer.key(word);
                assert_eq!(once, normalizer.key(&once));
            }
        }
    }

    #[test]
    fn test_case_accent_punctuation_invariance() {
        let normalizer = Normalizer::new().ignore_accents(true).strip_punctuation(true);
        assert_eq!(normalizer.key("Café"), normalizer.key("cafe"));
        assert_eq!(normalizer.key("Café"), normalizer.key("CAFÉ."));
        assert_eq!("cafe", normalizer.key("CAFÉ."));
    }

    #[test]
    fn test_accents_preserved_by_default() {
        let normalizer = Normalizer::new();
        assert_eq!("café", normalizer.key("Café"));
        assert_ne!(normalizer.key("café"), normalizer.key("cafe"));
    }

    #[test]
    fn test_decomposed_input_matches_precomposed() {
        // 「é」の合成形(U+00E9)と分解形(e + U+0301)は同じキーになる
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.key("caf\u{e9}"), normalizer.key("cafe\u{301}"));
    }

    #[test]
    fn test_interior_punctuation_is_preserved() {
        let normalizer = Normalizer::new().strip_punctuation(true);
        assert_eq!("p. ej", normalizer.key("p. ej."));
        assert_eq!("sin embargo", normalizer.key("¡sin embargo!"));
    }

    #[test]
    fn test_punctuation_kept_when_disabled() {
        let normalizer = Normalizer::new();
        assert_eq!("café.", normalizer.key("Café."));
    }

    #[test]
    fn test_unusable_words_normalize_to_empty() {
        let normalizer = Normalizer::new().strip_punctuation(true);
        assert_eq!("", normalizer.key("   "));
        assert_eq!("", normalizer.key("..."));
        assert_eq!("", normalizer.key("¡¿?!"));
    }

    #[test]
    fn test_fullwidth_case_folding() {
        let normalizer = Normalizer::new();
        assert_eq!("ｃａｆｅ", normalizer.key("ＣＡＦＥ"));
    }
}
