use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("形容詞カタログが見つかりません: {0}")]
    CatalogNotFound(PathBuf),

    #[error(
        "形容詞カタログが空です。1行に1つ、空でない形容詞を記述してください\n\
        (ADJECTIVES_PATH を外すと組み込みカタログが使われます)"
    )]
    EmptyCatalog,

    #[error("形容詞カタログの {line} 行目は英字を含まないため名前に使えません: {value:?}")]
    InvalidAdjective { line: usize, value: String },

    #[error("IMAGE の値がタグとして不正です: {value} ({reason})")]
    InvalidImageOverride { value: String, reason: String },

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
