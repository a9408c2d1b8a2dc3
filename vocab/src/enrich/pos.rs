//! 品詞の別名表と語尾ヒューリスティクス
//!
//! このモジュールは、品詞表記を正準形へ対応付ける別名表と、
//! 定義や語尾から品詞を推定するヒューリスティクスを提供します。
//! 推定は最善努力であり、正しさは保証されません。

/// 品詞の別名から正準表記への対応表。
const POS_ALIASES: &[(&str, &str)] = &[
    ("adjective", "adj"),
    ("adj", "adj"),
    ("adjetivo", "adj"),
    ("adverb", "adv"),
    ("adv", "adv"),
    ("adverbio", "adv"),
    ("verb", "verb"),
    ("verbo", "verb"),
    ("noun", "noun"),
    ("sustantivo", "noun"),
    ("name", "noun"),
    ("proper noun", "noun"),
    ("preposition", "prep"),
    ("prep", "prep"),
    ("pronoun", "pron"),
    ("pron", "pron"),
    ("pronombre", "pron"),
    ("determiner", "det"),
    ("det", "det"),
    ("article", "det"),
    ("conjunction", "conj"),
    ("conj", "conj"),
    ("connector", "connector"),
    ("expression", "phrase"),
    ("phrase", "phrase"),
    ("interjection", "interj"),
    ("interj", "interj"),
    ("number", "num"),
    ("numeral", "num"),
];

/// 名詞を示す語尾。
const NOUN_SUFFIXES: &[&str] = &["ción", "sión", "dad", "tad", "aje", "umbre", "ez"];

/// 動詞の不定形語尾。
const VERB_SUFFIXES: &[&str] = &["ar", "er", "ir"];

/// 品詞表記を正準形へ対応付けます。
///
/// 照合は両端空白の除去と小文字化のうえで行われます。
/// 別名表に無い表記は`None`になります。
pub(crate) fn canonical(value: &str) -> Option<&'static str> {
    let normalized = value.trim().to_lowercase();
    POS_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canon)| *canon)
}

/// 定義の表層形から品詞を推定します。
///
/// "to "で始まる英語定義は動詞を示します。
pub(crate) fn from_definition(english: &str) -> Option<&'static str> {
    english.to_lowercase().starts_with("to ").then_some("verb")
}

/// 語尾から品詞を推定します。
///
/// *-mente*は副詞、名詞性の派生語尾は名詞、不定形語尾は動詞を示します。
/// 判定はこの順で行われます。
pub(crate) fn from_suffix(word: &str) -> Option<&'static str> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return None;
    }
    if word.ends_with("mente") {
        return Some("adv");
    }
    if NOUN_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
        return Some("noun");
    }
    if VERB_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
        return Some("verb");
    }
    None
}
