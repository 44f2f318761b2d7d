//! 形容詞カタログ
//!
//! `eloquent_einstein` のような名前の前半部分に使う形容詞のリストです。
//! プロセス起動時に一度だけ読み込まれ、以降は読み取り専用で共有されます。

use crate::error::{ConfigError, Result};
use std::path::Path;
use std::sync::Arc;

const BUILTIN_ADJECTIVES: &str = include_str!("../data/adjectives.txt");

/// 順序付きの形容詞リスト（空にならないことが保証される）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjectiveCatalog {
    entries: Arc<[String]>,
}

impl AdjectiveCatalog {
    /// テキストを1行1形容詞として解析
    ///
    /// 各行は前後の空白を除去され、空行は読み飛ばされます。
    /// 有効な行が1つもなければ [`ConfigError::EmptyCatalog`] を返します。
    ///
    /// 名前には ASCII 英字だけが残るため、英字を1文字も含まない行は
    /// [`ConfigError::InvalidAdjective`] として読み込み時に拒否します。
    pub fn parse(source: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for (index, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !line.chars().any(|c| c.is_ascii_alphabetic()) {
                return Err(ConfigError::InvalidAdjective {
                    line: index + 1,
                    value: line.to_string(),
                });
            }
            entries.push(line.to_string());
        }

        if entries.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        Ok(Self {
            entries: entries.into(),
        })
    }

    /// バイナリに埋め込まれたカタログ
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_ADJECTIVES)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 構築時に空チェック済みのため常に false
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 形容詞カタログを読み込む
///
/// `path` が指定されていればそのファイルを、なければ組み込みのリストを使います。
pub fn load_adjectives(path: Option<&Path>) -> Result<AdjectiveCatalog> {
    let Some(path) = path else {
        tracing::debug!("Using built-in adjective catalog");
        return AdjectiveCatalog::builtin();
    };

    if !path.is_file() {
        return Err(ConfigError::CatalogNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let catalog = AdjectiveCatalog::parse(&content)?;
    tracing::debug!(
        "Loaded {} adjectives from {}",
        catalog.len(),
        path.display()
    );

    Ok(catalog)
}
