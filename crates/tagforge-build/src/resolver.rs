use crate::error::{BuildError, BuildResult};
use std::path::{Path, PathBuf};

/// ビルド定義をファイルシステム上のパスに解決する
pub struct BuildResolver {
    context_dir: PathBuf,
}

impl BuildResolver {
    pub fn new(context_dir: impl Into<PathBuf>) -> Self {
        Self {
            context_dir: context_dir.into(),
        }
    }

    /// ビルドコンテキストのパスを解決
    pub fn resolve_context(&self) -> BuildResult<PathBuf> {
        let context = &self.context_dir;

        // 存在しない、またはディレクトリでない
        if !context.is_dir() {
            return Err(BuildError::ContextNotFound(context.clone()));
        }

        Ok(context.clone())
    }

    /// Dockerfileのパスを解決
    ///
    /// ビルド定義はコンテキストディレクトリからの相対パス（絶対パスも可）
    pub fn resolve_dockerfile(&self, definition: &str) -> BuildResult<PathBuf> {
        let path = Path::new(definition.trim_start_matches("./"));
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.context_dir.join(path)
        };

        if !path.is_file() {
            return Err(BuildError::DockerfileNotFound(path));
        }

        tracing::debug!("Resolved {} to {}", definition, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_dockerfile_relative() {
        let temp_dir = tempdir().unwrap();
        let dockerfile_path = temp_dir.path().join("Dockerfile.arm64");
        fs::write(&dockerfile_path, "FROM alpine").unwrap();

        let resolver = BuildResolver::new(temp_dir.path());

        assert_eq!(
            resolver.resolve_dockerfile("Dockerfile.arm64").unwrap(),
            dockerfile_path
        );
        assert_eq!(
            resolver.resolve_dockerfile("./Dockerfile.arm64").unwrap(),
            dockerfile_path
        );
    }

    #[test]
    fn test_resolve_dockerfile_nested() {
        let temp_dir = tempdir().unwrap();
        let api_dir = temp_dir.path().join("services/api");
        fs::create_dir_all(&api_dir).unwrap();

        let dockerfile_path = api_dir.join("Dockerfile");
        fs::write(&dockerfile_path, "FROM alpine").unwrap();

        let resolver = BuildResolver::new(temp_dir.path());
        let result = resolver.resolve_dockerfile("services/api/Dockerfile").unwrap();
        assert_eq!(result, dockerfile_path);
    }

    #[test]
    fn test_resolve_dockerfile_not_found() {
        let temp_dir = tempdir().unwrap();
        let resolver = BuildResolver::new(temp_dir.path());

        let result = resolver.resolve_dockerfile("Dockerfile");
        assert!(matches!(result, Err(BuildError::DockerfileNotFound(_))));
    }

    #[test]
    fn test_resolve_context() {
        let temp_dir = tempdir().unwrap();
        let resolver = BuildResolver::new(temp_dir.path());

        let context = resolver.resolve_context().unwrap();
        assert_eq!(context, temp_dir.path());
    }

    #[test]
    fn test_resolve_context_not_found() {
        let temp_dir = tempdir().unwrap();
        let resolver = BuildResolver::new(temp_dir.path().join("missing"));

        assert!(matches!(
            resolver.resolve_context(),
            Err(BuildError::ContextNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_context_is_file() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("Dockerfile");
        fs::write(&file, "FROM alpine").unwrap();

        let resolver = BuildResolver::new(&file);
        assert!(resolver.resolve_context().is_err());
    }
}
