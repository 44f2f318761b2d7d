use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 実行結果に影響する環境変数
const CONFIG_VARS: [&str; 7] = [
    "REGISTRY",
    "ORGANIZATION",
    "IMAGE",
    "PROFILE",
    "TARGETARCH",
    "CONTEXT_DIR",
    "ADJECTIVES_PATH",
];

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_dockerfile(&self, name: &str) {
        let path = self.root.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "FROM alpine:latest\nCMD echo 'test'\n").unwrap();
    }

    #[allow(dead_code)]
    pub fn write_adjectives(&self, content: &str) -> PathBuf {
        let path = self.root.path().join("adjectives.csv");
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// 環境変数をクリアし、このプロジェクトをコンテキストにした tagforge コマンド
    #[allow(dead_code)]
    pub fn command(&self) -> Command {
        let mut cmd = tagforge();
        cmd.current_dir(self.path());
        cmd
    }
}

/// 環境変数をクリアした tagforge コマンド
#[allow(deprecated)]
pub fn tagforge() -> Command {
    let mut cmd = Command::cargo_bin("tagforge").unwrap();
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}
