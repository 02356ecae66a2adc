use std::collections::HashMap;

use imputrs::error::Result;
use imputrs::ml::imputation::ModeImputer;
use imputrs::ml::pipeline::Transformer;
use imputrs::na::{DataValue, NA};
use imputrs::DataFrame;

// 最頻値補完のデモ
//
// 各列に1つずつ欠損セルを持つ小さな表を作り、学習した最頻値で埋める
fn main() -> Result<()> {
    let mut data: HashMap<String, Vec<NA<DataValue>>> = HashMap::new();
    data.insert(
        "a".to_string(),
        to_cells(vec![None, Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(5.0)]),
    );
    data.insert(
        "b".to_string(),
        to_cells(vec![Some(1.0), None, Some(3.0), Some(4.0), Some(5.0), Some(4.0)]),
    );
    data.insert(
        "c".to_string(),
        to_cells(vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(3.0)]),
    );

    let df = DataFrame::from_map(data)?;
    println!("=== 補完前 ===");
    println!("{}", df);

    let mut imputer = ModeImputer::new();
    imputer.fit(&df)?;

    if let Some(modes) = imputer.modes() {
        println!("=== 学習した最頻値 ===");
        let mut names: Vec<&String> = modes.keys().collect();
        names.sort();
        for name in names {
            println!("{}: {}", name, modes[name]);
        }
        println!();
    }

    let imputed = imputer.transform(&df)?;
    println!("=== 補完後 ===");
    println!("{}", imputed);

    Ok(())
}

fn to_cells(values: Vec<Option<f64>>) -> Vec<NA<DataValue>> {
    values
        .into_iter()
        .map(|opt| NA::from(opt.map(DataValue::Float64)))
        .collect()
}
