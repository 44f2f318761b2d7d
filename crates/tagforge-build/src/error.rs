use std::path::PathBuf;
use thiserror::Error;

/// ビルドエンジン（ビルド・プッシュ）で発生するエラー
///
/// 1つのビルド定義に閉じたエラーで、実行全体は中断しない
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Dockerfile not found: {0}")]
    DockerfileNotFound(PathBuf),

    #[error("Build context directory not found: {0}")]
    ContextNotFound(PathBuf),

    #[error("Docker connection error: {0}")]
    DockerConnection(#[from] bollard::errors::Error),

    #[error("Build failed: {0}")]
    BuildFailed(String),

    #[error("Push failed: {message}")]
    PushFailed { message: String },

    #[error("Authentication failed for {registry}: {message}")]
    AuthFailed { registry: String, message: String },

    #[error("Invalid tag: {tag}")]
    InvalidTag { tag: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            BuildError::DockerfileNotFound(path) => {
                format!(
                    "Dockerfileが見つかりません: {}\n\
                     \n\
                     解決方法:\n\
                     1. ビルド定義のパスを確認してください\n\
                     2. パスはコンテキストディレクトリ (CONTEXT_DIR) からの相対パスです",
                    path.display()
                )
            }
            BuildError::BuildFailed(msg) => {
                format!(
                    "ビルドに失敗しました: {}\n\
                     \n\
                     Dockerfileの内容を確認してください。",
                    msg
                )
            }
            BuildError::ContextNotFound(path) => {
                format!(
                    "ビルドコンテキストが見つかりません: {}\n\
                     \n\
                     CONTEXT_DIR または --context を確認してください。",
                    path.display()
                )
            }
            BuildError::AuthFailed { registry, message } => {
                format!(
                    "レジストリ {} の認証に失敗しました: {}\n\
                     \n\
                     docker login {} を実行してください。",
                    registry, message, registry
                )
            }
            BuildError::InvalidTag { tag } => {
                format!(
                    "タグとして使えません: {}\n\
                     \n\
                     タグに使えるのは英小文字・数字・ピリオド・ハイフン・アンダースコアです。",
                    tag
                )
            }
            _ => format!("{}", self),
        }
    }
}

pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// フォールバック名の生成に失敗した
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Generated name is unusable as a tag (adjective: {adjective:?}, name: {name:?})")]
    Unusable { adjective: String, name: String },
}

/// 実行全体を中断させるエラー
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Failed to resolve tag for {definition}: {source}")]
    TagResolution {
        definition: String,
        #[source]
        source: NameError,
    },
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
