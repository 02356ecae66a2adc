use csv::{ReaderBuilder, Writer};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crate::error::{ImputrsError, Result};
use crate::na::{DataValue, NA};
use crate::series::NASeries;
use crate::DataFrame;

// 欠損とみなす文字列表現
fn parse_cell(s: &str) -> NA<DataValue> {
    match s {
        "" | "NA" | "NaN" | "null" => NA::NA,
        _ => NA::Value(DataValue::infer(s)),
    }
}

/// CSVファイルからDataFrameを読み込む
///
/// 空のセルおよび "NA" / "NaN" / "null" は欠損値として読み込まれます。
pub fn read_csv<P: AsRef<Path>>(path: P, has_header: bool) -> Result<DataFrame> {
    let file = File::open(path.as_ref()).map_err(ImputrsError::Io)?;

    // CSVリーダーを設定
    let mut rdr = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut df = DataFrame::new();

    // ヘッダー行を取得
    let headers: Vec<String> = if has_header {
        rdr.headers()
            .map_err(ImputrsError::Csv)?
            .iter()
            .map(|h| h.to_string())
            .collect()
    } else {
        // ヘッダーがない場合は、最初の行から"column_0", "column_1"などとする
        let mut records = rdr.records().peekable();
        let width = match records.peek() {
            Some(Ok(record)) => record.len(),
            Some(Err(_)) => {
                return Err(ImputrsError::Format(
                    "CSVの先頭行を読み取れません".to_string(),
                ))
            }
            None => return Ok(DataFrame::new()),
        };
        let headers: Vec<String> = (0..width).map(|i| format!("column_{}", i)).collect();

        // ヘッダーなしの場合は残りの行をここで処理する
        let mut columns: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
        for header in &headers {
            columns.insert(header.clone(), Vec::new());
        }
        for result in records {
            let record = result.map_err(ImputrsError::Csv)?;
            append_record(&headers, &mut columns, &record);
        }
        for header in headers {
            if let Some(values) = columns.remove(&header) {
                let series = NASeries::new(values, Some(header.clone()))?;
                df.add_column(header, series)?;
            }
        }
        return Ok(df);
    };

    // データを列ごとに収集
    let mut columns: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    for header in &headers {
        columns.insert(header.clone(), Vec::new());
    }

    // 各行を処理
    for result in rdr.records() {
        let record = result.map_err(ImputrsError::Csv)?;
        append_record(&headers, &mut columns, &record);
    }

    // 列をDataFrameに追加
    for header in headers {
        if let Some(values) = columns.remove(&header) {
            let series = NASeries::new(values, Some(header.clone()))?;
            df.add_column(header, series)?;
        }
    }

    Ok(df)
}

// 1レコード分のセルを列バッファに追加する
fn append_record(
    headers: &[String],
    columns: &mut HashMap<String, Vec<NA<DataValue>>>,
    record: &csv::StringRecord,
) {
    for (i, header) in headers.iter().enumerate() {
        let cell = match record.get(i) {
            // 行の長さが足りない場合は欠損とする
            Some(s) => parse_cell(s),
            None => NA::NA,
        };
        if let Some(buffer) = columns.get_mut(header) {
            buffer.push(cell);
        }
    }
}

/// DataFrameをCSVファイルに書き込む
///
/// 欠損値は空のセルとして書き出されます。
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(ImputrsError::Io)?;
    let mut wtr = Writer::from_writer(file);

    // ヘッダー行を書き込む
    wtr.write_record(df.column_names())
        .map_err(ImputrsError::Csv)?;

    // 各行のデータを書き込む
    for i in 0..df.row_count() {
        let mut row = Vec::new();

        for col_name in df.column_names() {
            let cell = df
                .column(col_name)
                .and_then(|series| series.get(i))
                .and_then(|v| v.value());
            match cell {
                Some(value) => row.push(value.to_string()),
                None => row.push(String::new()),
            }
        }

        wtr.write_record(&row).map_err(ImputrsError::Csv)?;
    }

    wtr.flush().map_err(ImputrsError::Io)?;
    Ok(())
}
