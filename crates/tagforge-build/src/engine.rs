//! ビルドエンジン
//!
//! オーケストレーターから見た「1つのビルド定義をビルドして公開する」操作の抽象です。

use crate::builder::{BuildSpec, ImageBuilder};
use crate::context::ContextBuilder;
use crate::error::BuildResult;
use crate::progress::BuildProgress;
use crate::pusher::ImagePusher;
use crate::resolver::BuildResolver;
use async_trait::async_trait;
use bollard::Docker;
use std::path::Path;

/// ビルド1件分の要求
#[derive(Debug, Clone, Copy)]
pub struct BuildRequest<'a> {
    /// ビルド定義（コンテキストからの Dockerfile パス）
    pub definition: &'a str,
    pub context_dir: &'a Path,
    /// 公開先 `registry/organization/tag`
    pub reference: &'a str,
    pub platform: &'a str,
    pub build_args: &'a [(String, String)],
}

/// ビルドと公開を行う外部エンジン
#[async_trait]
pub trait BuildEngine: Send + Sync {
    /// ビルドして公開し、公開されたイメージ参照（ダイジェスト付きなら `@sha256:...`）を返す
    async fn publish(&self, request: &BuildRequest<'_>) -> BuildResult<String>;
}

/// Docker Engine API (bollard) を使う実装
pub struct DockerEngine {
    builder: ImageBuilder,
    pusher: ImagePusher,
}

impl DockerEngine {
    pub fn new(docker: Docker) -> Self {
        Self {
            builder: ImageBuilder::new(docker.clone()),
            pusher: ImagePusher::new(docker),
        }
    }

    async fn build_and_push(
        &self,
        request: &BuildRequest<'_>,
        progress: &BuildProgress,
    ) -> BuildResult<String> {
        let resolver = BuildResolver::new(request.context_dir);
        let context_dir = resolver.resolve_context()?;
        let dockerfile = resolver.resolve_dockerfile(request.definition)?;

        let context = ContextBuilder::create_context(&context_dir, &dockerfile)?;
        let spec = BuildSpec {
            reference: request.reference,
            platform: request.platform,
            build_args: request.build_args,
        };

        self.builder.build_image(context, spec, progress).await?;
        self.pusher.push(request.reference, progress).await
    }
}

#[async_trait]
impl BuildEngine for DockerEngine {
    async fn publish(&self, request: &BuildRequest<'_>) -> BuildResult<String> {
        let progress = BuildProgress::new(request.definition);

        match self.build_and_push(request, &progress).await {
            Ok(image_ref) => {
                progress.finish_success(&image_ref);
                Ok(image_ref)
            }
            Err(e) => {
                progress.finish_error(&e.to_string());
                Err(e)
            }
        }
    }
}

/// Docker に接続せず、パスの解決だけを行う実装（`--dry-run`）
#[derive(Debug, Default)]
pub struct DryRunEngine;

#[async_trait]
impl BuildEngine for DryRunEngine {
    async fn publish(&self, request: &BuildRequest<'_>) -> BuildResult<String> {
        let resolver = BuildResolver::new(request.context_dir);
        resolver.resolve_context()?;
        let dockerfile = resolver.resolve_dockerfile(request.definition)?;

        tracing::info!(
            "[dry-run] would build {} for {} and push {}",
            dockerfile.display(),
            request.platform,
            request.reference
        );
        Ok(request.reference.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use std::fs;
    use tempfile::tempdir;

    fn request<'a>(definition: &'a str, context_dir: &'a Path) -> BuildRequest<'a> {
        BuildRequest {
            definition,
            context_dir,
            reference: "ghcr.io/acme/arm64",
            platform: "linux/arm64",
            build_args: &[],
        }
    }

    #[tokio::test]
    async fn test_dry_run_returns_reference() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("Dockerfile.arm64"), "FROM alpine").unwrap();

        let result = DryRunEngine
            .publish(&request("Dockerfile.arm64", temp_dir.path()))
            .await
            .unwrap();
        assert_eq!(result, "ghcr.io/acme/arm64");
    }

    #[tokio::test]
    async fn test_dry_run_missing_dockerfile() {
        let temp_dir = tempdir().unwrap();

        let result = DryRunEngine
            .publish(&request("Dockerfile.arm64", temp_dir.path()))
            .await;
        assert!(matches!(result, Err(BuildError::DockerfileNotFound(_))));
    }

    #[tokio::test]
    async fn test_dry_run_missing_context() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing");

        let result = DryRunEngine.publish(&request("Dockerfile", &missing)).await;
        assert!(matches!(result, Err(BuildError::ContextNotFound(_))));
    }
}
