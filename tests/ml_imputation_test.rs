//! 欠損値補完の基本的なテスト

use std::collections::HashMap;

use imputrs::error::ImputrsError;
use imputrs::ml::imputation::{MeanImputer, ModeImputer};
use imputrs::ml::pipeline::{Pipeline, Transformer};
use imputrs::{DataFrame, DataValue, NASeries, NA};

// テストデータの準備を行うヘルパー関数
fn float_cells(values: Vec<Option<f64>>) -> Vec<NA<DataValue>> {
    values
        .into_iter()
        .map(|opt| NA::from(opt.map(DataValue::Float64)))
        .collect()
}

fn string_cells(values: Vec<Option<&str>>) -> Vec<NA<DataValue>> {
    values
        .into_iter()
        .map(|opt| NA::from(opt.map(|s| DataValue::String(s.to_string()))))
        .collect()
}

// 典型例: 各列に1つずつ欠損セルを持つ6行3列の表
fn sample_frame() -> DataFrame {
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert(
        "a".to_string(),
        float_cells(vec![None, Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(5.0)]),
    );
    data.insert(
        "b".to_string(),
        float_cells(vec![Some(1.0), None, Some(3.0), Some(4.0), Some(5.0), Some(4.0)]),
    );
    data.insert(
        "c".to_string(),
        float_cells(vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(3.0)]),
    );
    DataFrame::from_map(data).unwrap()
}

fn float_cell(v: f64) -> NA<DataValue> {
    NA::Value(DataValue::Float64(v))
}

#[test]
fn test_mode_imputer_learns_expected_modes() {
    let df = sample_frame();
    let mut imputer = ModeImputer::new();
    imputer.fit(&df).unwrap();

    let modes = imputer.modes().unwrap();
    // a: 5が2回で最頻値
    assert_eq!(modes["a"], float_cell(5.0));
    // b: 4が2回で最頻値
    assert_eq!(modes["b"], float_cell(4.0));
    // c: 全ての値が1回ずつ -> 昇順で最初の1が選ばれる
    assert_eq!(modes["c"], float_cell(1.0));
}

#[test]
fn test_mode_imputer_fills_missing_cells() {
    let df = sample_frame();
    let mut imputer = ModeImputer::new();
    imputer.fit(&df).unwrap();
    let result = imputer.transform(&df).unwrap();

    // 欠損セルだけが最頻値で埋まる
    assert_eq!(result.column("a").unwrap().get(0), Some(&float_cell(5.0)));
    assert_eq!(result.column("b").unwrap().get(1), Some(&float_cell(4.0)));
    assert_eq!(result.column("c").unwrap().get(2), Some(&float_cell(1.0)));

    // その他のセルは変化しない
    assert_eq!(result.column("a").unwrap().get(1), Some(&float_cell(2.0)));
    assert_eq!(result.column("b").unwrap().get(5), Some(&float_cell(4.0)));
    assert_eq!(result.column("c").unwrap().get(0), Some(&float_cell(1.0)));

    // 形状と列名は同一
    assert_eq!(result.row_count(), df.row_count());
    assert_eq!(result.column_names(), df.column_names());

    // 入力は変更されない
    assert!(df.column("a").unwrap().get(0).unwrap().is_na());
}

#[test]
fn test_mode_imputer_idempotent_on_complete_data() {
    // 欠損のないデータでは変換は恒等写像
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert(
        "x".to_string(),
        float_cells(vec![Some(1.0), Some(2.0), Some(2.0)]),
    );
    data.insert(
        "y".to_string(),
        string_cells(vec![Some("p"), Some("q"), Some("p")]),
    );
    let df = DataFrame::from_map(data).unwrap();

    let mut imputer = ModeImputer::new();
    let result = imputer.fit_transform(&df).unwrap();

    for name in df.column_names() {
        let before = df.column(name).unwrap();
        let after = result.column(name).unwrap();
        assert_eq!(before.values(), after.values());
    }
}

#[test]
fn test_mode_imputer_tie_break_is_deterministic() {
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert(
        "t".to_string(),
        float_cells(vec![Some(3.0), Some(1.0), Some(2.0), None]),
    );
    let df = DataFrame::from_map(data).unwrap();

    // 繰り返し学習しても同じ値が選ばれる
    for _ in 0..5 {
        let mut imputer = ModeImputer::new();
        imputer.fit(&df).unwrap();
        assert_eq!(imputer.modes().unwrap()["t"], float_cell(1.0));
    }
}

#[test]
fn test_mode_imputer_all_missing_column() {
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert(
        "full".to_string(),
        float_cells(vec![Some(1.0), Some(1.0), None]),
    );
    data.insert("empty".to_string(), float_cells(vec![None, None, None]));
    let df = DataFrame::from_map(data).unwrap();

    let mut imputer = ModeImputer::new();
    imputer.fit(&df).unwrap();

    // 全て欠損の列の最頻値は未定義
    assert_eq!(imputer.modes().unwrap()["empty"], NA::NA);

    // 変換後も欠損のまま残る（エラーにはならない）
    let result = imputer.transform(&df).unwrap();
    assert_eq!(result.column("empty").unwrap().na_count(), 3);
    assert_eq!(result.column("full").unwrap().na_count(), 0);
}

#[test]
fn test_mode_imputer_transform_before_fit() {
    let df = sample_frame();
    let imputer = ModeImputer::new();

    let result = imputer.transform(&df);
    assert!(matches!(result, Err(ImputrsError::NotFitted(_))));
}

#[test]
fn test_mode_imputer_unknown_column_is_schema_error() {
    let df = sample_frame();
    let mut imputer = ModeImputer::new();
    imputer.fit(&df).unwrap();

    // fit時に存在しなかった列dを含む表
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert("a".to_string(), float_cells(vec![None]));
    data.insert("d".to_string(), float_cells(vec![Some(1.0)]));
    let other = DataFrame::from_map(data).unwrap();

    let result = imputer.transform(&other);
    match result {
        Err(ImputrsError::ColumnNotFound(name)) => assert_eq!(name, "d"),
        other => panic!("スキーマエラーになるはず: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_mode_imputer_empty_fit_is_usage_error() {
    // 列が空の場合
    let mut imputer = ModeImputer::new();
    let empty = DataFrame::new();
    assert!(matches!(
        imputer.fit(&empty),
        Err(ImputrsError::EmptyData(_))
    ));
    assert!(imputer.modes().is_none());

    // 行が空の場合
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert("a".to_string(), Vec::new());
    let zero_rows = DataFrame::from_map(data).unwrap();
    assert!(matches!(
        imputer.fit(&zero_rows),
        Err(ImputrsError::EmptyData(_))
    ));
    assert!(imputer.modes().is_none());
}

#[test]
fn test_mode_imputer_failed_fit_keeps_previous_modes() {
    let df = sample_frame();
    let mut imputer = ModeImputer::new();
    imputer.fit(&df).unwrap();

    let empty = DataFrame::new();
    assert!(imputer.fit(&empty).is_err());

    // 失敗したfitは学習済みの表を壊さない
    let modes = imputer.modes().unwrap();
    assert_eq!(modes.len(), 3);
    assert_eq!(modes["a"], float_cell(5.0));
}

#[test]
fn test_mode_imputer_refit_replaces_modes() {
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert(
        "v".to_string(),
        float_cells(vec![Some(1.0), Some(1.0), Some(2.0)]),
    );
    let first = DataFrame::from_map(data).unwrap();

    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert(
        "v".to_string(),
        float_cells(vec![Some(2.0), Some(2.0), Some(1.0)]),
    );
    let second = DataFrame::from_map(data).unwrap();

    let mut imputer = ModeImputer::new();
    imputer.fit(&first).unwrap();
    assert_eq!(imputer.modes().unwrap()["v"], float_cell(1.0));

    // 再学習で表全体が置き換わる
    imputer.fit(&second).unwrap();
    assert_eq!(imputer.modes().unwrap()["v"], float_cell(2.0));
}

#[test]
fn test_mode_imputer_fit_transform_equivalence() {
    let df = sample_frame();

    let mut fitted = ModeImputer::new();
    fitted.fit(&df).unwrap();
    let separate = fitted.transform(&df).unwrap();

    let mut chained = ModeImputer::new();
    let combined = chained.fit_transform(&df).unwrap();

    for name in df.column_names() {
        assert_eq!(
            separate.column(name).unwrap().values(),
            combined.column(name).unwrap().values()
        );
    }
}

#[test]
fn test_mode_imputer_categorical_column() {
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert(
        "color".to_string(),
        string_cells(vec![Some("red"), None, Some("blue"), Some("red")]),
    );
    let df = DataFrame::from_map(data).unwrap();

    let mut imputer = ModeImputer::new();
    let result = imputer.fit_transform(&df).unwrap();

    assert_eq!(
        result.column("color").unwrap().get(1),
        Some(&NA::Value(DataValue::String("red".to_string())))
    );
}

#[test]
fn test_mean_imputer_fills_numeric_columns() {
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert(
        "n".to_string(),
        float_cells(vec![Some(1.0), Some(2.0), None, Some(3.0)]),
    );
    data.insert(
        "s".to_string(),
        string_cells(vec![Some("a"), Some("b"), None, Some("a")]),
    );
    let df = DataFrame::from_map(data).unwrap();

    let mut imputer = MeanImputer::new();
    let result = imputer.fit_transform(&df).unwrap();

    // 数値列は平均(2.0)で埋まる
    assert_eq!(result.column("n").unwrap().get(2), Some(&float_cell(2.0)));

    // 数値を持たない列の平均は未定義のため、欠損が残る
    assert_eq!(imputer.means().unwrap()["s"], NA::NA);
    assert_eq!(result.column("s").unwrap().na_count(), 1);
}

#[test]
fn test_mean_imputer_int_column_fills_with_float() {
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert(
        "i".to_string(),
        vec![
            NA::Value(DataValue::Int64(1)),
            NA::Value(DataValue::Int64(2)),
            NA::NA,
        ],
    );
    let df = DataFrame::from_map(data).unwrap();

    let mut imputer = MeanImputer::new();
    let result = imputer.fit_transform(&df).unwrap();

    assert_eq!(result.column("i").unwrap().get(2), Some(&float_cell(1.5)));
}

#[test]
fn test_mean_imputer_errors() {
    let imputer = MeanImputer::new();
    let df = sample_frame();
    assert!(matches!(
        imputer.transform(&df),
        Err(ImputrsError::NotFitted(_))
    ));

    let mut imputer = MeanImputer::new();
    assert!(matches!(
        imputer.fit(&DataFrame::new()),
        Err(ImputrsError::EmptyData(_))
    ));
}

#[test]
fn test_pipeline_with_imputers() {
    let df = sample_frame();

    let mut pipeline = Pipeline::new();
    pipeline.add_transformer(ModeImputer::new());

    let result = pipeline.fit_transform(&df).unwrap();
    for name in result.column_names() {
        assert_eq!(result.column(name).unwrap().na_count(), 0);
    }

    // 学習済みパイプラインは別のデータにも適用できる
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert("a".to_string(), float_cells(vec![None, Some(9.0)]));
    data.insert("b".to_string(), float_cells(vec![Some(9.0), None]));
    data.insert("c".to_string(), float_cells(vec![None, None]));
    let other = DataFrame::from_map(data).unwrap();

    let applied = pipeline.transform(&other).unwrap();
    assert_eq!(applied.column("a").unwrap().get(0), Some(&float_cell(5.0)));
    assert_eq!(applied.column("b").unwrap().get(1), Some(&float_cell(4.0)));
    assert_eq!(applied.column("c").unwrap().get(0), Some(&float_cell(1.0)));
}
