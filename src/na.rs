use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};

/// 欠損値（NA, Not Available）を表現する型
///
/// 欠損を数値のセンチネル（NaNなど）で暗黙に表すのではなく、
/// 型システムで明示的に表現します。
#[derive(Clone, Copy)]
pub enum NA<T> {
    /// 値が存在する場合
    Value(T),
    /// 値が存在しない場合
    NA,
}

impl<T> NA<T> {
    /// 値があるかどうかをチェック
    pub fn is_na(&self) -> bool {
        match self {
            NA::Value(_) => false,
            NA::NA => true,
        }
    }

    /// 値があるかどうかをチェック
    pub fn is_value(&self) -> bool {
        !self.is_na()
    }

    /// 値を取得（存在する場合）
    pub fn value(&self) -> Option<&T> {
        match self {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }

    /// 値を取得（存在する場合）、存在しない場合はデフォルト値を返す
    pub fn value_or<'a>(&'a self, default: &'a T) -> &'a T {
        match self {
            NA::Value(v) => v,
            NA::NA => default,
        }
    }

    /// 値を変換する
    pub fn map<U, F>(&self, f: F) -> NA<U>
    where
        F: FnOnce(&T) -> U,
    {
        match self {
            NA::Value(v) => NA::Value(f(v)),
            NA::NA => NA::NA,
        }
    }
}

// From実装：T型からNA<T>への自動変換
impl<T> From<T> for NA<T> {
    fn from(value: T) -> Self {
        NA::Value(value)
    }
}

// From実装：Option<T>からNA<T>への自動変換
impl<T> From<Option<T>> for NA<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => NA::Value(v),
            None => NA::NA,
        }
    }
}

// Into実装：NA<T>からOption<T>への自動変換
impl<T> From<NA<T>> for Option<T> {
    fn from(na: NA<T>) -> Self {
        match na {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }
}

// Debug実装
impl<T: Debug> Debug for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{:?}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

// Display実装
impl<T: Display> Display for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

// PartialEq実装
impl<T: PartialEq> PartialEq for NA<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NA::Value(a), NA::Value(b)) => a == b,
            (NA::NA, NA::NA) => true,
            _ => false,
        }
    }
}

// Eq実装（T: Eqの場合）
impl<T: Eq> Eq for NA<T> {}

// PartialOrd実装
impl<T: PartialOrd> PartialOrd for NA<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (NA::Value(a), NA::Value(b)) => a.partial_cmp(b),
            (NA::NA, NA::NA) => Some(Ordering::Equal),
            (NA::NA, _) => Some(Ordering::Less), // NAは常に他の値より小さいと定義
            (_, NA::NA) => Some(Ordering::Greater),
        }
    }
}

// Ord実装（T: Ordの場合）
impl<T: Ord> Ord for NA<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NA::Value(a), NA::Value(b)) => a.cmp(b),
            (NA::NA, NA::NA) => Ordering::Equal,
            (NA::NA, _) => Ordering::Less,
            (_, NA::NA) => Ordering::Greater,
        }
    }
}

// Serialize実装：NAはnullとして書き出す
impl<T: Serialize> Serialize for NA<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            NA::Value(v) => serializer.serialize_some(v),
            NA::NA => serializer.serialize_none(),
        }
    }
}

// Deserialize実装：nullはNAとして読み込む
impl<'de, T: Deserialize<'de>> Deserialize<'de> for NA<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(NA::from)
    }
}

/// セルの値を表す動的型
///
/// 数値・カテゴリ・混在のいずれの列も表現できるようにします。
/// JSONでは素の値（5, 2.5, "a", true）として読み書きされます。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    /// 真偽値
    Boolean(bool),
    /// 64ビット整数
    Int64(i64),
    /// 64ビット浮動小数点数
    Float64(f64),
    /// 文字列
    String(String),
}

impl DataValue {
    /// 文字列から型を推測して値を作成
    pub fn infer(s: &str) -> DataValue {
        if let Ok(i) = s.parse::<i64>() {
            return DataValue::Int64(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return DataValue::Float64(f);
        }
        match s {
            "true" | "True" => DataValue::Boolean(true),
            "false" | "False" => DataValue::Boolean(false),
            _ => DataValue::String(s.to_string()),
        }
    }

    /// 数値として取得（数値型以外はNone）
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Int64(i) => Some(*i as f64),
            DataValue::Float64(f) => Some(*f),
            _ => None,
        }
    }

    // 型の順位（正準順序の第一キー）
    fn type_rank(&self) -> u8 {
        match self {
            DataValue::Boolean(_) => 0,
            DataValue::Int64(_) => 1,
            DataValue::Float64(_) => 2,
            DataValue::String(_) => 3,
        }
    }
}

// Display実装
impl Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::Int64(i) => write!(f, "{}", i),
            DataValue::Float64(v) => write!(f, "{}", v),
            DataValue::String(s) => write!(f, "{}", s),
        }
    }
}

// 正準順序: 型の順位 → 値の昇順。浮動小数点はtotal_cmpで全順序にする
impl Ord for DataValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DataValue::Boolean(a), DataValue::Boolean(b)) => a.cmp(b),
            (DataValue::Int64(a), DataValue::Int64(b)) => a.cmp(b),
            (DataValue::Float64(a), DataValue::Float64(b)) => a.total_cmp(b),
            (DataValue::String(a), DataValue::String(b)) => a.cmp(b),
            (a, b) => a.type_rank().cmp(&b.type_rank()),
        }
    }
}

impl PartialOrd for DataValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// PartialEq/EqはOrdと整合させる
impl PartialEq for DataValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DataValue {}
