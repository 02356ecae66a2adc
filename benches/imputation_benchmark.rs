use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;

use imputrs::ml::imputation::ModeImputer;
use imputrs::ml::pipeline::Transformer;
use imputrs::{DataFrame, DataValue, NA};

// 10,000行 x 3列、約1割の欠損を含むテストデータを作る
fn build_frame(rows: usize) -> DataFrame {
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();

    let ints: Vec<NA<DataValue>> = (0..rows)
        .map(|i| {
            if i % 10 == 0 {
                NA::NA
            } else {
                NA::Value(DataValue::Int64((i % 7) as i64))
            }
        })
        .collect();
    let floats: Vec<NA<DataValue>> = (0..rows)
        .map(|i| {
            if i % 13 == 0 {
                NA::NA
            } else {
                NA::Value(DataValue::Float64((i % 5) as f64 / 2.0))
            }
        })
        .collect();
    let strings: Vec<NA<DataValue>> = (0..rows)
        .map(|i| {
            if i % 17 == 0 {
                NA::NA
            } else {
                NA::Value(DataValue::String(format!("cat_{}", i % 4)))
            }
        })
        .collect();

    data.insert("ints".to_string(), ints);
    data.insert("floats".to_string(), floats);
    data.insert("strings".to_string(), strings);

    DataFrame::from_map(data).unwrap()
}

fn bench_mode_imputer(c: &mut Criterion) {
    let df = build_frame(10_000);

    c.bench_function("mode_imputer_fit", |b| {
        b.iter(|| {
            let mut imputer = ModeImputer::new();
            imputer.fit(black_box(&df)).unwrap();
            imputer
        })
    });

    let mut fitted = ModeImputer::new();
    fitted.fit(&df).unwrap();

    c.bench_function("mode_imputer_transform", |b| {
        b.iter(|| fitted.transform(black_box(&df)).unwrap())
    });

    c.bench_function("mode_imputer_fit_transform", |b| {
        b.iter(|| {
            let mut imputer = ModeImputer::new();
            imputer.fit_transform(black_box(&df)).unwrap()
        })
    });
}

criterion_group!(benches, bench_mode_imputer);
criterion_main!(benches);
