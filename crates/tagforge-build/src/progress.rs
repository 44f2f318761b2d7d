use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// ビルド1件分のスピナー表示
pub struct BuildProgress {
    progress_bar: ProgressBar,
}

impl BuildProgress {
    pub fn new(definition: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb.set_message(format!("Building {}...", definition));

        Self { progress_bar: pb }
    }

    /// 何も描画しない（テストや非対話実行用）
    pub fn hidden() -> Self {
        Self {
            progress_bar: ProgressBar::hidden(),
        }
    }

    pub fn set_message(&self, msg: &str) {
        // 長いビルドログは1行に収める
        let line: String = msg.lines().next().unwrap_or_default().chars().take(100).collect();
        self.progress_bar.set_message(line);
    }

    pub fn finish_success(&self, reference: &str) {
        self.progress_bar
            .finish_with_message(format!("Published {} ✓", reference));
    }

    pub fn finish_error(&self, error: &str) {
        self.progress_bar
            .finish_with_message(format!("Build failed: {}", error));
    }
}
