use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ImputrsError, Result};
use crate::na::{DataValue, NA};
use crate::series::NASeries;
use crate::DataFrame;

/// JSON出力形式
pub enum JsonOrient {
    /// レコード形式 [{col1:val1, col2:val2}, ...]
    Records,
    /// 列形式 {col1: [val1, val2, ...], col2: [...]}
    Columns,
}

/// JSONファイルからDataFrameを読み込む
///
/// JSONのnullは欠損値として読み込まれます。
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let file = File::open(path.as_ref()).map_err(ImputrsError::Io)?;
    let reader = BufReader::new(file);

    // JSONを解析
    let json_value: Value = serde_json::from_reader(reader).map_err(ImputrsError::Json)?;

    match json_value {
        Value::Array(array) => read_records_array(array),
        Value::Object(map) => read_column_oriented(map),
        _ => Err(ImputrsError::Format(
            "JSONはオブジェクトまたは配列である必要があります".to_string(),
        )),
    }
}

// JSON値を1セルに変換する
fn parse_cell(value: Value) -> Result<NA<DataValue>> {
    serde_json::from_value(value).map_err(ImputrsError::Json)
}

// レコード指向JSONから読み込む
fn read_records_array(array: Vec<Value>) -> Result<DataFrame> {
    let mut df = DataFrame::new();

    // 空配列の場合は空のDataFrameを返す
    if array.is_empty() {
        return Ok(df);
    }

    // 全てのキーを収集（列順を安定させるためソート）
    let mut all_keys = std::collections::BTreeSet::new();
    for item in &array {
        if let Value::Object(map) = item {
            for key in map.keys() {
                all_keys.insert(key.clone());
            }
        } else {
            return Err(ImputrsError::Format(
                "配列の各要素はオブジェクトである必要があります".to_string(),
            ));
        }
    }

    // 列データを収集
    let mut columns: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    for key in &all_keys {
        let mut values = Vec::with_capacity(array.len());

        for item in &array {
            if let Value::Object(map) = item {
                match map.get(key) {
                    Some(value) => values.push(parse_cell(value.clone())?),
                    // キーが存在しない場合は欠損とする
                    None => values.push(NA::NA),
                }
            }
        }

        columns.insert(key.clone(), values);
    }

    // 列をDataFrameに追加
    for key in all_keys {
        if let Some(values) = columns.remove(&key) {
            let series = NASeries::new(values, Some(key.clone()))?;
            df.add_column(key, series)?;
        }
    }

    Ok(df)
}

// 列指向JSONから読み込む
fn read_column_oriented(map: Map<String, Value>) -> Result<DataFrame> {
    let mut df = DataFrame::new();

    // 各列を処理
    for (key, value) in map {
        if let Value::Array(array) = value {
            let mut values = Vec::with_capacity(array.len());
            for item in array {
                values.push(parse_cell(item)?);
            }

            let series = NASeries::new(values, Some(key.clone()))?;
            df.add_column(key, series)?;
        } else {
            return Err(ImputrsError::Format(format!(
                "列 '{}' は配列である必要があります",
                key
            )));
        }
    }

    Ok(df)
}

/// DataFrameをJSONファイルに書き込む
///
/// 欠損値はnullとして書き出されます。
pub fn write_json<P: AsRef<Path>>(df: &DataFrame, path: P, orient: JsonOrient) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(ImputrsError::Io)?;
    let writer = BufWriter::new(file);

    let json_value = match orient {
        JsonOrient::Records => to_records_json(df)?,
        JsonOrient::Columns => to_column_json(df)?,
    };

    serde_json::to_writer_pretty(writer, &json_value).map_err(ImputrsError::Json)?;

    Ok(())
}

// DataFrameをレコード指向JSONに変換
fn to_records_json(df: &DataFrame) -> Result<Value> {
    let mut records = Vec::new();

    // 各行のデータを処理
    for row_idx in 0..df.row_count() {
        let mut record = serde_json::Map::new();

        // 各列の値を取得して追加
        for col_name in df.column_names() {
            let cell = df.column(col_name).and_then(|series| series.get(row_idx));
            let value = match cell {
                Some(na) => serde_json::to_value(na).map_err(ImputrsError::Json)?,
                None => Value::Null,
            };
            record.insert(col_name.clone(), value);
        }

        records.push(Value::Object(record));
    }

    Ok(Value::Array(records))
}

// DataFrameを列指向JSONに変換
fn to_column_json(df: &DataFrame) -> Result<Value> {
    let mut columns = serde_json::Map::new();

    // 各列を処理
    for col_name in df.column_names() {
        let values = match df.column(col_name) {
            Some(series) => serde_json::to_value(series.values()).map_err(ImputrsError::Json)?,
            None => Value::Array(Vec::new()),
        };

        columns.insert(col_name.clone(), values);
    }

    Ok(Value::Object(columns))
}
