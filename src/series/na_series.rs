use num_traits::NumCast;
use std::cmp::PartialOrd;
use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

use crate::error::{ImputrsError, Result};
use crate::index::RangeIndex;
use crate::na::NA;

/// 欠損値をサポートするSeries構造体
#[derive(Debug, Clone)]
pub struct NASeries<T>
where
    T: Debug + Clone,
{
    /// Seriesのデータ値（NA型でラップ）
    values: Vec<NA<T>>,

    /// インデックスラベル
    index: RangeIndex,

    /// 名前（オプション）
    name: Option<String>,
}

impl<T> NASeries<T>
where
    T: Debug + Clone,
{
    /// 新しいNASeriesをベクトルから作成
    pub fn new(values: Vec<NA<T>>, name: Option<String>) -> Result<Self> {
        let len = values.len();
        let index = RangeIndex::from_range(0..len)?;

        Ok(NASeries {
            values,
            index,
            name,
        })
    }

    /// 通常のベクトルから作成（NAを含まない）
    pub fn from_vec(values: Vec<T>, name: Option<String>) -> Result<Self> {
        let na_values = values.into_iter().map(NA::Value).collect();
        Self::new(na_values, name)
    }

    /// Optionベクトルから作成（Noneを含む可能性あり）
    pub fn from_options(values: Vec<Option<T>>, name: Option<String>) -> Result<Self> {
        let na_values = values
            .into_iter()
            .map(|opt| match opt {
                Some(v) => NA::Value(v),
                None => NA::NA,
            })
            .collect();
        Self::new(na_values, name)
    }

    /// NASeriesの長さを取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// NASeriesが空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 位置から値を取得
    pub fn get(&self, pos: usize) -> Option<&NA<T>> {
        self.values.get(pos)
    }

    /// 値の配列を取得
    pub fn values(&self) -> &[NA<T>] {
        &self.values
    }

    /// 名前を取得
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// インデックスを取得
    pub fn index(&self) -> &RangeIndex {
        &self.index
    }

    /// 名前を設定
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// 名前を設定（可変参照）
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// NAの個数を取得
    pub fn na_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_na()).count()
    }

    /// 値が存在する個数を取得
    pub fn value_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_value()).count()
    }

    /// NAを含むかどうか
    pub fn has_na(&self) -> bool {
        self.values.iter().any(|v| v.is_na())
    }

    /// 各要素がNAかどうかのブール配列を取得
    pub fn is_na(&self) -> Vec<bool> {
        self.values.iter().map(|v| v.is_na()).collect()
    }

    /// NAを除去したSeriesを返す
    pub fn dropna(&self) -> Result<Self> {
        let filtered_values: Vec<NA<T>> = self
            .values
            .iter()
            .filter(|v| v.is_value())
            .cloned()
            .collect();

        Self::new(filtered_values, self.name.clone())
    }

    /// NAを指定した値で埋める
    pub fn fillna(&self, fill_value: T) -> Result<Self> {
        let filled_values: Vec<NA<T>> = self
            .values
            .iter()
            .map(|v| match v {
                NA::Value(_) => v.clone(),
                NA::NA => NA::Value(fill_value.clone()),
            })
            .collect();

        Self::new(filled_values, self.name.clone())
    }
}

// 全順序を持つ型のNASeriesに対する特化実装
impl<T> NASeries<T>
where
    T: Debug + Clone + Ord,
{
    /// 最頻値を計算（NAは無視）
    ///
    /// 最頻値が複数ある場合は、正準順序（昇順）で最初の値を返します。
    /// 値が一つも存在しない列では最頻値が定義できないため、NAを返します。
    pub fn mode(&self) -> NA<T> {
        let mut values: Vec<&T> = self
            .values
            .iter()
            .filter_map(|v| v.value())
            .collect();

        if values.is_empty() {
            return NA::NA;
        }

        // ソートして同値の連続区間を数える。昇順走査で「より大きい」ときだけ
        // 更新するため、同数のときは小さい値が勝つ
        values.sort();

        let mut best = values[0];
        let mut best_count = 0;
        let mut i = 0;
        while i < values.len() {
            let mut j = i;
            while j < values.len() && values[j] == values[i] {
                j += 1;
            }
            if j - i > best_count {
                best_count = j - i;
                best = values[i];
            }
            i = j;
        }

        NA::Value(best.clone())
    }
}

// 数値型のNASeriesに対する特化実装
impl<T> NASeries<T>
where
    T: Debug
        + Clone
        + Copy
        + Sum<T>
        + PartialOrd
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + NumCast
        + Default,
{
    /// 合計を計算（NAは無視）
    pub fn sum(&self) -> NA<T> {
        let values: Vec<T> = self
            .values
            .iter()
            .filter_map(|v| match v {
                NA::Value(val) => Some(*val),
                NA::NA => None,
            })
            .collect();

        if values.is_empty() {
            NA::NA
        } else {
            NA::Value(values.into_iter().sum())
        }
    }

    /// 平均を計算（NAは無視）
    pub fn mean(&self) -> NA<T> {
        let values: Vec<T> = self
            .values
            .iter()
            .filter_map(|v| match v {
                NA::Value(val) => Some(*val),
                NA::NA => None,
            })
            .collect();

        if values.is_empty() {
            return NA::NA;
        }

        let sum: T = values.iter().copied().sum();
        let count: T = match num_traits::cast(values.len()) {
            Some(n) => n,
            None => return NA::NA,
        };

        NA::Value(sum / count)
    }

    /// 最小値を計算（NAは無視）
    pub fn min(&self) -> NA<T> {
        let values: Vec<T> = self
            .values
            .iter()
            .filter_map(|v| match v {
                NA::Value(val) => Some(*val),
                NA::NA => None,
            })
            .collect();

        if values.is_empty() {
            return NA::NA;
        }

        let min = values
            .iter()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .cloned();

        match min {
            Some(v) => NA::Value(v),
            None => NA::NA,
        }
    }

    /// 最大値を計算（NAは無視）
    pub fn max(&self) -> NA<T> {
        let values: Vec<T> = self
            .values
            .iter()
            .filter_map(|v| match v {
                NA::Value(val) => Some(*val),
                NA::NA => None,
            })
            .collect();

        if values.is_empty() {
            return NA::NA;
        }

        let max = values
            .iter()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .cloned();

        match max {
            Some(v) => NA::Value(v),
            None => NA::NA,
        }
    }
}

// 長さの一致チェックに使うヘルパー
impl<T> NASeries<T>
where
    T: Debug + Clone,
{
    /// 期待する長さと一致するか確認する
    pub(crate) fn check_len(&self, expected: usize) -> Result<()> {
        if self.len() != expected {
            return Err(ImputrsError::InconsistentRowCount {
                expected,
                found: self.len(),
            });
        }
        Ok(())
    }
}
