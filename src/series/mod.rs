//! 一次元データ構造（Series）を提供するモジュール
//!
//! 全ての列は欠損値を持ちうるため、NA対応のNASeriesを唯一のSeries型とします。

mod na_series;

pub use self::na_series::NASeries;
