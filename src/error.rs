use thiserror::Error;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("入出力エラー")]
    Io(#[source] std::io::Error),

    #[error("CSVエラー")]
    Csv(#[source] csv::Error),

    #[error("JSONエラー")]
    Json(#[source] serde_json::Error),

    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("列名が重複しています: {0}")]
    DuplicateColumnName(String),

    #[error("行数が一致しません: 期待値 {expected}, 実際 {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("データがありません: {0}")]
    EmptyData(String),

    #[error("未学習です: {0}")]
    NotFitted(String),

    #[error("インデックスエラー: {0}")]
    Index(String),

    #[error("データ一貫性エラー: {0}")]
    Consistency(String),

    #[error("データ形式エラー: {0}")]
    Format(String),
}

// クレート名付きの別名
pub type ImputrsError = Error;

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

// 標準エラーからの変換
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
