use crate::error::{BuildError, BuildResult};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::path::Path;
use tar::Builder;

/// コンテキスト外の Dockerfile を格納する名前
const INJECTED_DOCKERFILE: &str = ".tagforge.Dockerfile";

/// Docker API に送るビルドコンテキスト
#[derive(Debug)]
pub struct BuildContext {
    /// tar.gz アーカイブ
    pub archive: Vec<u8>,
    /// アーカイブ内での Dockerfile のパス
    pub dockerfile: String,
}

pub struct ContextBuilder;

impl ContextBuilder {
    /// ビルドコンテキストをtar.gzアーカイブとして作成
    ///
    /// Dockerfile がコンテキスト内にあればその相対パスをそのまま使い、
    /// 外にある場合のみ専用の名前でアーカイブに追加します。
    pub fn create_context(context_path: &Path, dockerfile_path: &Path) -> BuildResult<BuildContext> {
        tracing::debug!("Creating build context from: {}", context_path.display());

        let relative = dockerfile_path
            .strip_prefix(context_path)
            .ok()
            .map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .filter(|p| !p.is_empty());

        let mut archive = Vec::new();
        let dockerfile = {
            let encoder = GzEncoder::new(&mut archive, Compression::default());
            let mut tar = Builder::new(encoder);

            // コンテキストディレクトリを再帰的に追加
            tar.append_dir_all(".", context_path)?;

            let dockerfile = match relative {
                Some(relative) => relative,
                None => {
                    let content = std::fs::read(dockerfile_path)?;

                    let mut header = tar::Header::new_gnu();
                    header.set_path(INJECTED_DOCKERFILE).map_err(|e| {
                        BuildError::BuildFailed(format!("Failed to set Dockerfile path: {}", e))
                    })?;
                    header.set_size(content.len() as u64);
                    header.set_mode(0o644);
                    header.set_cksum();

                    tar.append(&header, &content[..])?;
                    INJECTED_DOCKERFILE.to_string()
                }
            };

            tar.into_inner()?.finish()?;
            dockerfile
        };

        tracing::debug!(
            "Build context created: {} bytes (dockerfile: {})",
            archive.len(),
            dockerfile
        );

        Self::check_context_size(archive.len());

        Ok(BuildContext {
            archive,
            dockerfile,
        })
    }

    /// コンテキストサイズのチェックと警告
    fn check_context_size(size: usize) {
        const MAX_CONTEXT_SIZE: usize = 500 * 1024 * 1024; // 500MB

        if size > MAX_CONTEXT_SIZE {
            tracing::warn!(
                "Build context is large ({}MB); consider adding a .dockerignore",
                size / 1024 / 1024
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn unpack(archive: Vec<u8>) -> tempfile::TempDir {
        let extract_dir = tempdir().unwrap();
        let decoder = flate2::read::GzDecoder::new(std::io::Cursor::new(archive));
        let mut tar = tar::Archive::new(decoder);
        tar.unpack(extract_dir.path()).unwrap();
        extract_dir
    }

    #[test]
    fn test_create_context() {
        let temp_dir = tempdir().unwrap();

        fs::write(temp_dir.path().join("file1.txt"), "content1").unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("file2.txt"), "content2").unwrap();

        let dockerfile = temp_dir.path().join("Dockerfile.arm64");
        fs::write(&dockerfile, "FROM alpine\nRUN echo test").unwrap();

        let context = ContextBuilder::create_context(temp_dir.path(), &dockerfile).unwrap();
        assert_eq!(context.dockerfile, "Dockerfile.arm64");

        let extracted = unpack(context.archive);
        assert!(extracted.path().join("Dockerfile.arm64").exists());
        assert!(extracted.path().join("subdir/file2.txt").exists());
    }

    #[test]
    fn test_create_context_nested_dockerfile() {
        let temp_dir = tempdir().unwrap();
        let api_dir = temp_dir.path().join("services/api");
        fs::create_dir_all(&api_dir).unwrap();
        let dockerfile = api_dir.join("Dockerfile");
        fs::write(&dockerfile, "FROM alpine").unwrap();

        let context = ContextBuilder::create_context(temp_dir.path(), &dockerfile).unwrap();
        assert_eq!(context.dockerfile, "services/api/Dockerfile");
    }

    #[test]
    fn test_create_context_dockerfile_outside_context() {
        let context_dir = tempdir().unwrap();
        fs::write(context_dir.path().join("app.txt"), "app").unwrap();

        let other_dir = tempdir().unwrap();
        let dockerfile = other_dir.path().join("Dockerfile");
        fs::write(&dockerfile, "FROM alpine").unwrap();

        let context = ContextBuilder::create_context(context_dir.path(), &dockerfile).unwrap();
        assert_eq!(context.dockerfile, INJECTED_DOCKERFILE);

        let extracted = unpack(context.archive);
        let injected = fs::read_to_string(extracted.path().join(INJECTED_DOCKERFILE)).unwrap();
        assert_eq!(injected, "FROM alpine");
    }
}
