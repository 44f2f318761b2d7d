use crate::error::{ConfigError, Result};
use crate::tag_rules::tag_violation;
use std::path::PathBuf;

pub const DEFAULT_REGISTRY: &str = "ghcr.io";
pub const DEFAULT_ORGANIZATION: &str = "pythoninthegrass";
pub const DEFAULT_PROFILE: &str = "dev";
pub const DEFAULT_TARGET_ARCH: &str = "amd64";

/// 1回のビルド実行を通して不変の設定
///
/// 起動時に一度だけ構築し、参照で各コンポーネントへ渡します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub registry: String,
    pub organization: String,
    /// 全ビルド定義に共通のタグ上書き（None なら上書きなし）
    pub image: Option<String>,
    pub profile: String,
    pub target_arch: String,
    /// ビルドコンテキストのディレクトリ
    pub context_dir: PathBuf,
    /// 形容詞カタログのパス（None なら組み込みカタログ）
    pub adjectives_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry: DEFAULT_REGISTRY.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            image: None,
            profile: DEFAULT_PROFILE.to_string(),
            target_arch: DEFAULT_TARGET_ARCH.to_string(),
            context_dir: PathBuf::from("."),
            adjectives_path: None,
        }
    }
}

impl Settings {
    /// 環境変数から設定を読み込む
    ///
    /// | 変数 | デフォルト |
    /// |------|-----------|
    /// | REGISTRY | ghcr.io |
    /// | ORGANIZATION | pythoninthegrass |
    /// | IMAGE | (なし) |
    /// | PROFILE | dev |
    /// | TARGETARCH | amd64 |
    /// | CONTEXT_DIR | カレントディレクトリ |
    /// | ADJECTIVES_PATH | (組み込み) |
    pub fn from_env() -> Result<Self> {
        let context_dir = match non_empty_var("CONTEXT_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?,
        };

        let settings = Self {
            registry: var_or("REGISTRY", DEFAULT_REGISTRY),
            organization: var_or("ORGANIZATION", DEFAULT_ORGANIZATION),
            image: non_empty_var("IMAGE"),
            profile: var_or("PROFILE", DEFAULT_PROFILE),
            target_arch: var_or("TARGETARCH", DEFAULT_TARGET_ARCH),
            context_dir,
            adjectives_path: non_empty_var("ADJECTIVES_PATH").map(PathBuf::from),
        };

        settings.validate()?;
        tracing::debug!("Loaded settings: {:?}", settings);

        Ok(settings)
    }

    /// 値の整合性チェック
    ///
    /// IMAGE はそのままタグとして使われるため、タグに使えない文字を含む場合はエラー
    pub fn validate(&self) -> Result<()> {
        if let Some(image) = &self.image
            && let Some(reason) = tag_violation(image)
        {
            return Err(ConfigError::InvalidImageOverride {
                value: image.clone(),
                reason,
            });
        }
        Ok(())
    }

    /// ビルドエンジンに渡すプラットフォーム指定
    ///
    /// - `amd64` -> `linux/amd64`
    /// - `linux/arm64/v8` -> そのまま
    pub fn platform(&self) -> String {
        if self.target_arch.contains('/') {
            self.target_arch.clone()
        } else {
            format!("linux/{}", self.target_arch)
        }
    }

    /// 全ビルドに適用されるビルド引数（PROFILE, TARGETARCH）
    pub fn build_env(&self) -> Vec<(String, String)> {
        vec![
            ("PROFILE".to_string(), self.profile.clone()),
            ("TARGETARCH".to_string(), self.target_arch.clone()),
        ]
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    non_empty_var(key).unwrap_or_else(|| default.to_string())
}
