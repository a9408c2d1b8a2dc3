//! ユーティリティ関数を提供するモジュール
//!
//! このモジュールには、タブ区切り行の解析と書き出しのヘルパーが含まれています。
//! 引用符で囲まれたフィールド(タブや改行を含むフィールド)も正しく扱います。

use std::io::{self, BufRead, BufReader, Read, Write};

use csv_core::ReadFieldResult;

/// タブ区切りの行を解析してフィールドのベクターに分割する
///
/// この関数は、TSV形式の文字列を解析し、各フィールドを個別の文字列として
/// 抽出します。ダブルクォートで囲まれたフィールドや、フィールド内のタブも
/// 正しく処理します。
///
/// # 引数
///
/// * `row` - 解析するTSV形式の文字列
///
/// # 戻り値
///
/// 解析されたフィールドを格納する文字列のベクター
///
/// # 例
///
/// ```
/// # use vocab::utils::parse_tsv_row;
/// let fields = parse_tsv_row("perro\tdog");
/// assert_eq!(fields, vec!["perro", "dog"]);
///
/// let fields_with_quote = parse_tsv_row("perro\t\"dog,\thound\"");
/// assert_eq!(fields_with_quote, vec!["perro", "dog,\thound"]);
/// ```
pub fn parse_tsv_row(row: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut rdr = csv_core::ReaderBuilder::new().delimiter(b'\t').build();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        let end = match result {
            ReadFieldResult::InputEmpty => true,
            ReadFieldResult::Field { .. } => false,
            ReadFieldResult::End => true,
            _ => unreachable!(),
        };
        fields.push(std::str::from_utf8(&output[..nout]).unwrap().to_string());
        if end {
            break;
        }
        bytes = &bytes[nin..];
    }
    fields
}

/// フィールド列を1行のTSVレコードとして書き出す
///
/// 各フィールドは必要に応じてダブルクォートで囲まれ、タブ区切りで
/// 連結された後、行終端が書き込まれます。
///
/// # 引数
///
/// * `wtr` - 書き込み先のWriterオブジェクト
/// * `fields` - 書き込むフィールド列
///
/// # 戻り値
///
/// * `Ok(())` - 書き込みに成功した場合
/// * `Err(std::io::Error)` - 書き込み中にI/Oエラーが発生した場合
pub fn write_tsv_row<W, T>(mut wtr: W, fields: &[T]) -> io::Result<()>
where
    W: Write,
    T: AsRef<str>,
{
    let mut output = [0; 4096];
    let mut writer = csv_core::WriterBuilder::new().delimiter(b'\t').build();
    for (i, field) in fields.iter().enumerate() {
        if i != 0 {
            let (result, nout) = writer.delimiter(&mut output);
            assert_eq!(result, csv_core::WriteResult::InputEmpty);
            wtr.write_all(&output[..nout])?;
        }
        let mut data = field.as_ref().as_bytes();
        loop {
            let (result, nin, nout) = writer.field(data, &mut output);
            wtr.write_all(&output[..nout])?;
            if result == csv_core::WriteResult::InputEmpty {
                break;
            }
            data = &data[nin..];
        }
    }
    let (result, nout) = writer.terminator(&mut output);
    assert_eq!(result, csv_core::WriteResult::InputEmpty);
    wtr.write_all(&output[..nout])?;
    Ok(())
}

/// TSV全体を読み込み、ヘッダ行とデータ行に分割する
///
/// 先頭行をヘッダとして取り出し、残りをデータ行として返します。
/// 空行はスキップされます。入力が空の場合、ヘッダもデータも空になります。
///
/// # 引数
///
/// * `rdr` - TSVのリーダー
///
/// # 戻り値
///
/// `(ヘッダ行, データ行のベクター)` のタプル
///
/// # エラー
///
/// 読み込みに失敗した場合、I/Oエラーが返されます。
pub fn read_table<R>(rdr: R) -> io::Result<(Vec<String>, Vec<Vec<String>>)>
where
    R: Read,
{
    let buf = BufReader::new(rdr);
    let mut header = vec![];
    let mut rows = vec![];
    for (idx, line) in buf.lines().enumerate() {
        let line = line?;
        if idx == 0 {
            header = parse_tsv_row(&line);
            continue;
        }
        if line.is_empty() {
            continue;
        }
        rows.push(parse_tsv_row(&line));
    }
    Ok((header, rows))
}
