//! 欠損値補完モジュール
//!
//! 学習データから列ごとの統計量を計算し、欠損セルをその値で埋める
//! 変換器を提供します。

use std::collections::HashMap;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::ml::pipeline::Transformer;
use crate::na::{DataValue, NA};

/// 欠損値を列の最頻値で補完する変換器
///
/// fit で各列の最頻値を学習し、transform で欠損セルを学習した
/// 最頻値に置き換えます。最頻値が複数ある場合は正準順序（昇順）で
/// 最初の値が選ばれます。
///
/// 全てのセルが欠損している列では最頻値が定義できないため、
/// その列の欠損セルは transform 後もそのまま残ります。
pub struct ModeImputer {
    /// 各列の最頻値（fit成功後に設定）
    modes: Option<HashMap<String, NA<DataValue>>>,
}

impl ModeImputer {
    /// 新しいModeImputerを作成
    pub fn new() -> Self {
        ModeImputer { modes: None }
    }

    /// 学習した最頻値の表を取得（未学習の場合はNone）
    pub fn modes(&self) -> Option<&HashMap<String, NA<DataValue>>> {
        self.modes.as_ref()
    }
}

impl Default for ModeImputer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for ModeImputer {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        // 空のデータでは最頻値が定義できない。既存の学習結果は変更しない
        if df.column_count() == 0 || df.row_count() == 0 {
            return Err(Error::EmptyData(
                "行または列が空のDataFrameには適合できません".to_string(),
            ));
        }

        let mut modes = HashMap::new();
        for name in df.column_names() {
            let series = df
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            modes.insert(name.clone(), series.mode());
        }

        // 表全体を一括で置き換える
        self.modes = Some(modes);
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let modes = self
            .modes
            .as_ref()
            .ok_or_else(|| Error::NotFitted("ModeImputer".to_string()))?;

        // 出力を作る前に全列の存在を確認する
        for name in df.column_names() {
            if !modes.contains_key(name) {
                return Err(Error::ColumnNotFound(name.clone()));
            }
        }

        let mut result = df.clone();

        for name in df.column_names() {
            let series = df
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;

            match modes.get(name) {
                Some(NA::Value(mode)) => {
                    let filled = series.fillna(mode.clone())?;
                    result.replace_column(name.clone(), filled)?;
                }
                // 最頻値が未定義の列は欠損セルを残したまま通す
                Some(NA::NA) => {
                    if series.has_na() {
                        log::warn!("列 '{}' の最頻値が未定義のため、欠損値を残します", name);
                    }
                }
                None => return Err(Error::ColumnNotFound(name.clone())),
            }
        }

        Ok(result)
    }
}

/// 欠損値を列の平均値で補完する変換器
///
/// 数値（Int64 / Float64）セルのみを対象に平均を計算し、欠損セルを
/// Float64の平均値で埋めます。数値セルを一つも持たない列では平均が
/// 定義できないため、その列は変更されません。
pub struct MeanImputer {
    /// 各列の平均値（fit成功後に設定）
    means: Option<HashMap<String, NA<f64>>>,
}

impl MeanImputer {
    /// 新しいMeanImputerを作成
    pub fn new() -> Self {
        MeanImputer { means: None }
    }

    /// 学習した平均値の表を取得（未学習の場合はNone）
    pub fn means(&self) -> Option<&HashMap<String, NA<f64>>> {
        self.means.as_ref()
    }
}

impl Default for MeanImputer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for MeanImputer {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        if df.column_count() == 0 || df.row_count() == 0 {
            return Err(Error::EmptyData(
                "行または列が空のDataFrameには適合できません".to_string(),
            ));
        }

        let mut means = HashMap::new();
        for name in df.column_names() {
            let series = df
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;

            // 数値セルだけを集める
            let numbers: Vec<f64> = series
                .values()
                .iter()
                .filter_map(|v| v.value())
                .filter_map(|v| v.as_f64())
                .collect();

            let mean = if numbers.is_empty() {
                NA::NA
            } else {
                NA::Value(numbers.iter().sum::<f64>() / numbers.len() as f64)
            };
            means.insert(name.clone(), mean);
        }

        self.means = Some(means);
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let means = self
            .means
            .as_ref()
            .ok_or_else(|| Error::NotFitted("MeanImputer".to_string()))?;

        for name in df.column_names() {
            if !means.contains_key(name) {
                return Err(Error::ColumnNotFound(name.clone()));
            }
        }

        let mut result = df.clone();

        for name in df.column_names() {
            let series = df
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;

            match means.get(name) {
                Some(NA::Value(mean)) => {
                    let filled = series.fillna(DataValue::Float64(*mean))?;
                    result.replace_column(name.clone(), filled)?;
                }
                Some(NA::NA) => {
                    if series.has_na() {
                        log::warn!("列 '{}' の平均値が未定義のため、欠損値を残します", name);
                    }
                }
                None => return Err(Error::ColumnNotFound(name.clone())),
            }
        }

        Ok(result)
    }
}
