//! DataFrame: 列指向の2次元データ構造
//!
//! 名前付きの列（NASeries）を挿入順に保持します。全ての列は同じ行数を持ち、
//! 各セルは欠損（NA）でありえます。

use std::collections::HashMap;
use std::fmt;

use crate::error::{ImputrsError, Result};
use crate::na::{DataValue, NA};
use crate::series::NASeries;

/// DataFrame構造体: 列指向の2次元データ構造
#[derive(Debug, Clone)]
pub struct DataFrame {
    /// 列データ
    columns: HashMap<String, NASeries<DataValue>>,

    /// 列の順序を保持
    column_order: Vec<String>,

    /// 行数
    row_count: usize,
}

impl DataFrame {
    /// 新しい空のDataFrameを作成
    pub fn new() -> Self {
        DataFrame {
            columns: HashMap::new(),
            column_order: Vec::new(),
            row_count: 0,
        }
    }

    /// 列名と値のマップからDataFrameを作成
    ///
    /// HashMapのキー順は保証されないため、列順を安定させるために
    /// 列名をソートして追加します。
    pub fn from_map(data: HashMap<String, Vec<NA<DataValue>>>) -> Result<Self> {
        let mut df = DataFrame::new();

        let mut names: Vec<String> = data.keys().cloned().collect();
        names.sort();

        for name in names {
            let values = match data.get(&name) {
                Some(v) => v.clone(),
                None => continue,
            };
            let series = NASeries::new(values, Some(name.clone()))?;
            df.add_column(name, series)?;
        }

        Ok(df)
    }

    /// 列を追加する
    pub fn add_column(&mut self, name: String, series: NASeries<DataValue>) -> Result<()> {
        if self.contains_column(&name) {
            return Err(ImputrsError::DuplicateColumnName(name));
        }

        // 最初の列が行数を決める
        if self.column_order.is_empty() {
            self.row_count = series.len();
        } else {
            series.check_len(self.row_count)?;
        }

        let series = series.with_name(name.clone());
        self.column_order.push(name.clone());
        self.columns.insert(name, series);
        Ok(())
    }

    /// 既存の列を置き換える
    pub fn replace_column(&mut self, name: String, series: NASeries<DataValue>) -> Result<()> {
        if !self.contains_column(&name) {
            return Err(ImputrsError::ColumnNotFound(name));
        }

        series.check_len(self.row_count)?;

        let series = series.with_name(name.clone());
        self.columns.insert(name, series);
        Ok(())
    }

    /// 列を取得する
    pub fn column(&self, name: &str) -> Option<&NASeries<DataValue>> {
        self.columns.get(name)
    }

    /// 列が存在するかどうか
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// 列名の一覧を取得（挿入順）
    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }

    /// 列数を取得
    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// 列が一つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.column_order.is_empty()
    }
}

impl Default for DataFrame {
    fn default() -> Self {
        Self::new()
    }
}

// Display実装: 列ごとに幅を揃えて表形式で出力する
impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Empty DataFrame");
        }

        // 各列の表示幅を計算
        let mut widths = Vec::with_capacity(self.column_count());
        for name in &self.column_order {
            let mut width = name.len();
            if let Some(series) = self.columns.get(name) {
                for value in series.values() {
                    width = width.max(value.to_string().len());
                }
            }
            widths.push(width);
        }

        // ヘッダー行
        for (name, width) in self.column_order.iter().zip(&widths) {
            write!(f, "{:>width$}  ", name, width = width)?;
        }
        writeln!(f)?;

        // データ行
        for row in 0..self.row_count {
            for (name, width) in self.column_order.iter().zip(&widths) {
                match self.columns.get(name).and_then(|s| s.get(row)) {
                    Some(value) => write!(f, "{:>width$}  ", value.to_string(), width = width)?,
                    None => write!(f, "{:>width$}  ", "", width = width)?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
