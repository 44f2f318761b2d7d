use crate::context::BuildContext;
use crate::error::{BuildError, BuildResult};
use crate::progress::BuildProgress;
use bollard::Docker;
use bollard::image::BuildImageOptions;
use futures_util::stream::StreamExt;
use std::collections::HashMap;

/// ビルド1回分のパラメータ
#[derive(Debug, Clone, Copy)]
pub struct BuildSpec<'a> {
    /// ビルド後に付けるイメージ参照（`registry/org/tag`）
    pub reference: &'a str,
    /// `linux/amd64` など
    pub platform: &'a str,
    pub build_args: &'a [(String, String)],
}

pub struct ImageBuilder {
    docker: Docker,
}

impl ImageBuilder {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// イメージをビルド
    pub async fn build_image(
        &self,
        context: BuildContext,
        spec: BuildSpec<'_>,
        progress: &BuildProgress,
    ) -> BuildResult<()> {
        tracing::info!("Building image: {} ({})", spec.reference, spec.platform);

        let build_args: HashMap<&str, &str> = spec
            .build_args
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        #[allow(deprecated)]
        let options = BuildImageOptions {
            dockerfile: context.dockerfile.as_str(),
            t: spec.reference,
            buildargs: build_args,
            platform: spec.platform,
            rm: true,      // 中間コンテナを削除
            forcerm: true, // ビルド失敗時も中間コンテナを削除
            pull: true,    // ベースイメージを常にpull
            ..Default::default()
        };

        tracing::debug!("Build options: {:?}", options);

        use bytes::Bytes;
        use http_body_util::{Either, Full};
        let body = Full::new(Bytes::from(context.archive));
        #[allow(deprecated)]
        let mut stream = self
            .docker
            .build_image(options, None, Some(Either::Left(body)));

        while let Some(msg) = stream.next().await {
            let output = msg?;
            Self::handle_build_output(output, progress)?;
        }

        tracing::info!("Successfully built: {}", spec.reference);
        Ok(())
    }

    /// ビルド出力の処理
    fn handle_build_output(
        output: bollard::models::BuildInfo,
        progress: &BuildProgress,
    ) -> BuildResult<()> {
        if let Some(error_detail) = output.error_detail {
            let error_msg = error_detail
                .message
                .or(output.error)
                .unwrap_or_else(|| "Unknown build error".to_string());
            return Err(BuildError::BuildFailed(error_msg));
        }

        if let Some(error) = output.error {
            return Err(BuildError::BuildFailed(error));
        }

        if let Some(stream) = output.stream {
            let line = stream.trim();
            if !line.is_empty() {
                tracing::debug!("{}", line);
                progress.set_message(line);
            }
        }

        if let Some(status) = output.status {
            progress.set_message(&status);
        }

        Ok(())
    }
}
