//! イメージプッシュ処理
//!
//! ビルドしたイメージをコンテナレジストリにプッシュします。

use crate::auth::RegistryAuth;
use crate::error::{BuildError, BuildResult};
use crate::progress::BuildProgress;
use crate::tag::validate_tag;
use bollard::Docker;
use bollard::models::PushImageInfo;
use futures_util::StreamExt;

/// イメージプッシュを実行するハンドラ
pub struct ImagePusher {
    docker: Docker,
    auth: RegistryAuth,
}

impl ImagePusher {
    /// 新しい ImagePusher を作成
    pub fn new(docker: Docker) -> Self {
        Self {
            docker,
            auth: RegistryAuth::new(),
        }
    }

    /// イメージをレジストリにプッシュ
    ///
    /// # Arguments
    /// * `reference` - イメージ参照（例: `ghcr.io/org/app`, `ghcr.io/org/app:v1`）
    ///
    /// # Returns
    /// レジストリがダイジェストを返した場合は `repository@sha256:...`、
    /// それ以外は `repository:tag`
    pub async fn push(&self, reference: &str, progress: &BuildProgress) -> BuildResult<String> {
        let (image, tag) = split_image_tag(reference);
        let full_image = format!("{}:{}", image, tag);

        validate_tag(&tag)?;

        let credentials = self.auth.get_credentials(&full_image)?;

        #[allow(deprecated)]
        let options = bollard::image::PushImageOptions::<String> { tag: tag.clone() };

        tracing::info!("Pushing {}", full_image);
        progress.set_message(&format!("Pushing {}", full_image));

        #[allow(deprecated)]
        let mut stream = self.docker.push_image(&image, Some(options), credentials);

        let mut digest: Option<String> = None;

        while let Some(result) = stream.next().await {
            let info = result.map_err(|e| BuildError::PushFailed {
                message: e.to_string(),
            })?;

            if let Some(err) = info.error {
                return Err(BuildError::PushFailed { message: err });
            }

            if let Some(found) = parse_digest(&info, &tag) {
                digest = Some(found);
            }

            Self::handle_progress(&info, progress);
        }

        match digest {
            Some(digest) => Ok(format!("{}@{}", image, digest)),
            None => Ok(full_image),
        }
    }

    /// プッシュ進捗を表示
    fn handle_progress(info: &PushImageInfo, progress: &BuildProgress) {
        let Some(status) = &info.status else {
            return;
        };

        match status.as_str() {
            // 準備中は表示をスキップ（ノイズ軽減）
            "Preparing" | "Waiting" => {}
            "Pushing" => {
                let detail = info.progress.as_deref().unwrap_or("");
                progress.set_message(&format!("↑ Pushing {}", detail));
            }
            _ => {
                tracing::debug!("push: {}", status);
                progress.set_message(status);
            }
        }
    }
}

/// プッシュ完了ステータスからダイジェストを取り出す
///
/// `latest: digest: sha256:abcd... size: 1234` -> `sha256:abcd...`
fn parse_digest(info: &PushImageInfo, tag: &str) -> Option<String> {
    let status = info.status.as_deref()?;
    let rest = status.strip_prefix(tag)?.strip_prefix(": digest: ")?;
    rest.split_whitespace()
        .next()
        .filter(|d| d.starts_with("sha256:"))
        .map(str::to_string)
}

/// イメージ名とタグを分離
///
/// # Examples
/// - `ghcr.io/org/app:v1.0` -> `("ghcr.io/org/app", "v1.0")`
/// - `ghcr.io/org/app` -> `("ghcr.io/org/app", "latest")`
/// - `localhost:5000/app:dev` -> `("localhost:5000/app", "dev")`
pub fn split_image_tag(image: &str) -> (String, String) {
    // 最後の : を探す
    if let Some(pos) = image.rfind(':') {
        let potential_tag = &image[pos + 1..];
        let potential_image = &image[..pos];

        // ポート番号（localhost:5000/app）はタグではない
        if !potential_tag.contains('/') && !potential_tag.chars().all(|c| c.is_ascii_digit()) {
            return (potential_image.to_string(), potential_tag.to_string());
        }
    }

    (image.to_string(), "latest".to_string())
}
