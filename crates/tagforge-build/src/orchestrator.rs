//! ビルド定義の一括ビルド・公開
//!
//! 定義を1つずつ順番に処理し、1件の失敗が残りの定義の処理を止めないようにします。
//! 結果は入力と同じ順序の [`RunResult`] の列として返ります。

use crate::engine::{BuildEngine, BuildRequest};
use crate::error::{OrchestratorError, Result};
use crate::names::RandomSource;
use crate::tag::{ResolvedTag, publish_reference, resolve_tag, validate_tag};
use std::fmt;
use tagforge_config::{AdjectiveCatalog, Settings};

/// ビルド対象の1単位（コンテキストからの Dockerfile パス）
///
/// `Dockerfile.arm64` のように `.` 以降がタグを兼ねることがある
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildDefinition(String);

impl BuildDefinition {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BuildDefinition {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BuildDefinition {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Published {
        reference: String,
        /// エンジンが返したイメージ参照（ダイジェスト付きの場合あり）
        image_ref: String,
    },
    Failed {
        /// タグが不正で公開先を組み立てられなかった場合は None
        reference: Option<String>,
        error: String,
        /// 利用者向けの対処方法を含むメッセージ
        hint: String,
    },
}

/// ビルド定義1件分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub definition: BuildDefinition,
    pub tag: ResolvedTag,
    pub outcome: Outcome,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Published { .. })
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Published { image_ref, .. } => {
                write!(f, "Built image and pushed to: {}", image_ref)
            }
            Outcome::Failed { error, .. } => {
                write!(f, "Error building {}: {}", self.definition, error)
            }
        }
    }
}

/// 結果列の集計
pub trait RunSummary {
    fn succeeded(&self) -> usize;
    fn failed(&self) -> usize;
    fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

impl RunSummary for [RunResult] {
    fn succeeded(&self) -> usize {
        self.iter().filter(|r| r.is_success()).count()
    }

    fn failed(&self) -> usize {
        self.iter().filter(|r| !r.is_success()).count()
    }
}

pub struct BuildOrchestrator<'a, E, R> {
    engine: E,
    source: R,
    settings: &'a Settings,
    catalog: &'a AdjectiveCatalog,
}

impl<'a, E, R> BuildOrchestrator<'a, E, R>
where
    E: BuildEngine,
    R: RandomSource,
{
    pub fn new(engine: E, source: R, settings: &'a Settings, catalog: &'a AdjectiveCatalog) -> Self {
        Self {
            engine,
            source,
            settings,
            catalog,
        }
    }

    /// 全ビルド定義を順番にビルド・公開する
    ///
    /// エンジンの失敗はその定義の結果として記録され、次の定義に進みます。
    /// フォールバック名が生成できない場合のみ実行全体を中断します。
    pub async fn run(&mut self, definitions: &[BuildDefinition]) -> Result<Vec<RunResult>> {
        let platform = self.settings.platform();
        let build_args = self.settings.build_env();

        let mut results = Vec::with_capacity(definitions.len());

        for definition in definitions {
            let tag = resolve_tag(
                definition.as_str(),
                self.settings.image.as_deref(),
                self.catalog,
                &mut self.source,
            )
            .map_err(|source| OrchestratorError::TagResolution {
                definition: definition.to_string(),
                source,
            })?;

            tracing::info!(
                "Resolved tag for {}: {} ({})",
                definition,
                tag,
                tag.origin
            );

            if let Err(e) = validate_tag(tag.as_str()) {
                tracing::error!("Error building {}: {}", definition, e);
                results.push(RunResult {
                    definition: definition.clone(),
                    tag,
                    outcome: Outcome::Failed {
                        reference: None,
                        error: e.to_string(),
                        hint: e.user_message(),
                    },
                });
                continue;
            }

            let reference = publish_reference(
                &self.settings.registry,
                &self.settings.organization,
                tag.as_str(),
            );

            let request = BuildRequest {
                definition: definition.as_str(),
                context_dir: &self.settings.context_dir,
                reference: &reference,
                platform: &platform,
                build_args: &build_args,
            };

            let outcome = match self.engine.publish(&request).await {
                Ok(image_ref) => {
                    tracing::info!("Built image and pushed to: {}", image_ref);
                    Outcome::Published {
                        reference,
                        image_ref,
                    }
                }
                Err(e) => {
                    tracing::error!("Error building {}: {}", definition, e);
                    Outcome::Failed {
                        reference: Some(reference),
                        error: e.to_string(),
                        hint: e.user_message(),
                    }
                }
            };

            results.push(RunResult {
                definition: definition.clone(),
                tag,
                outcome,
            });
        }

        Ok(results)
    }
}
