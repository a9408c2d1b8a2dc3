//! 頻度ランクによるCEFRレベル分類モジュール
//!
//! このモジュールは、頻度順の単語リストからキー→ランクの対応を構築し、
//! 固定の閾値表でランクをCEFR風の難易度レベルへ対応付けます。
//! 頻度情報が無い単語は、最も確信度の低い上級バケットへ分類されます。

use std::fmt;
use std::io::{BufRead, BufReader, Read};

use hashbrown::HashMap;

use crate::errors::Result;
use crate::normalizer::Normalizer;

/// CEFR風の難易度レベル。
///
/// 最も基礎的なA1.1から、頻度情報が無い場合の既定値となるB2.2までの
/// 8段階です。`Ord`は基礎的なレベルほど小さくなるように定義されています。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CefrLevel {
    /// 入門前半
    A1_1,
    /// 入門後半
    A1_2,
    /// 初級前半
    A2_1,
    /// 初級後半
    A2_2,
    /// 中級前半
    B1_1,
    /// 中級後半
    B1_2,
    /// 中上級前半
    B2_1,
    /// 中上級後半(頻度情報が無い場合の既定値)
    B2_2,
}

impl CefrLevel {
    /// レベルのラベルを取得します。
    pub fn name(&self) -> &'static str {
        match self {
            Self::A1_1 => "A1.1",
            Self::A1_2 => "A1.2",
            Self::A2_1 => "A2.1",
            Self::A2_2 => "A2.2",
            Self::B1_1 => "B1.1",
            Self::B1_2 => "B1.2",
            Self::B2_1 => "B2.1",
            Self::B2_2 => "B2.2",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// ランク閾値の設定。
///
/// 7つの閾値が、B2.2を除く7つのレベルに昇順で対応します。
/// 各閾値は上限込みで、昇順に評価され、最初に一致した閾値が勝ちます。
/// どの閾値にも収まらないランクは[`CefrLevel::B2_2`]になります。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankThresholds(pub [usize; 7]);

impl RankThresholds {
    /// 既定の閾値。
    pub const DEFAULT: Self = Self([500, 1500, 3000, 6000, 10000, 15000, 22000]);

    /// ランクをレベルへ対応付けます。
    ///
    /// # 引数
    ///
    /// * `rank` - 1始まりの頻度ランク
    ///
    /// # 戻り値
    ///
    /// ランクに対応するレベル
    pub fn level_for(&self, rank: usize) -> CefrLevel {
        const LEVELS: [CefrLevel; 7] = [
            CefrLevel::A1_1,
            CefrLevel::A1_2,
            CefrLevel::A2_1,
            CefrLevel::A2_2,
            CefrLevel::B1_1,
            CefrLevel::B1_2,
            CefrLevel::B2_1,
        ];
        for (threshold, level) in self.0.iter().zip(LEVELS) {
            if rank <= *threshold {
                return level;
            }
        }
        CefrLevel::B2_2
    }
}

impl Default for RankThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// 頻度リストから構築されるレベル分類器。
///
/// 構築後は読み取り専用で、1回の実行を通して共有されます。
pub struct FrequencyClassifier {
    ranks: HashMap<String, usize>,
    thresholds: RankThresholds,
    normalizer: Normalizer,
}

impl FrequencyClassifier {
    /// 頻度情報を持たない空の分類器を作成します。
    ///
    /// この分類器では、すべての単語が[`CefrLevel::B2_2`]に分類されます。
    pub fn empty() -> Self {
        Self {
            ranks: HashMap::new(),
            thresholds: RankThresholds::DEFAULT,
            normalizer: Normalizer::new(),
        }
    }

    /// 頻度リストを読み込んで分類器を構築します。
    ///
    /// 各行は空白区切りで、先頭トークンが単語です。1始まりの行位置が
    /// その単語のランクになります。空行とトークンの無い行はスキップされます
    /// (行位置は消費します)。同じキーの再出現は無視され、最初に現れた
    /// ランクが保持されます。
    ///
    /// # 引数
    ///
    /// * `rdr` - 頻度リストのリーダー
    /// * `thresholds` - ランク閾値の設定
    ///
    /// # 戻り値
    ///
    /// 構築された分類器
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、I/Oエラーが返されます。
    pub fn from_reader<R>(rdr: R, thresholds: RankThresholds) -> Result<Self>
    where
        R: Read,
    {
        let normalizer = Normalizer::new();
        let buf = BufReader::new(rdr);
        let mut ranks = HashMap::new();

        for (idx, line) in buf.lines().enumerate() {
            let line = line?;
            let word = match line.split_whitespace().next() {
                Some(word) => word,
                None => continue,
            };
            let key = normalizer.key(word);
            if key.is_empty() {
                continue;
            }
            ranks.entry(key).or_insert(idx + 1);
        }

        Ok(Self {
            ranks,
            thresholds,
            normalizer,
        })
    }

    /// 単語を難易度レベルへ分類します。
    ///
    /// 単語は内部で正規化されます。頻度情報が無い場合、または単語が
    /// 頻度リストに無い場合は[`CefrLevel::B2_2`]を返します。
    ///
    /// # 引数
    ///
    /// * `word` - 分類する単語
    ///
    /// # 戻り値
    ///
    /// 推定された難易度レベル
    pub fn classify(&self, word: &str) -> CefrLevel {
        if self.ranks.is_empty() {
            return CefrLevel::B2_2;
        }
        match self.ranks.get(&self.normalizer.key(word)) {
            Some(&rank) => self.thresholds.level_for(rank),
            None => CefrLevel::B2_2,
        }
    }

    /// 単語の頻度ランクを取得します。
    pub fn rank(&self, word: &str) -> Option<usize> {
        self.ranks.get(&self.normalizer.key(word)).copied()
    }

    /// 頻度リストに含まれる一意なキーの数を返します。
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// 頻度情報が空かどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
