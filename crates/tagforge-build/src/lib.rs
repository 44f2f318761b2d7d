//! tagforge のビルド・公開パイプライン
//!
//! ビルド定義ごとの公開タグの決定（サフィックス > IMAGE 上書き > ランダム名）と、
//! 失敗を定義単位に閉じ込めた逐次ビルド・公開を提供します。
//! 実際のビルドとプッシュは [`BuildEngine`] の実装（Docker では [`DockerEngine`]）が担います。

pub mod auth;
pub mod builder;
pub mod context;
pub mod engine;
pub mod error;
pub mod names;
pub mod orchestrator;
pub mod progress;
pub mod pusher;
pub mod resolver;
pub mod tag;

pub use auth::RegistryAuth;
pub use builder::ImageBuilder;
pub use context::ContextBuilder;
pub use engine::{BuildEngine, BuildRequest, DockerEngine, DryRunEngine};
pub use error::{BuildError, BuildResult, NameError, OrchestratorError};
pub use names::{RandomSource, StdRandomSource, generate_name};
pub use orchestrator::{BuildDefinition, BuildOrchestrator, Outcome, RunResult, RunSummary};
pub use progress::BuildProgress;
pub use pusher::{ImagePusher, split_image_tag};
pub use resolver::BuildResolver;
pub use tag::{ResolvedTag, TagOrigin, publish_reference, resolve_tag, validate_tag};
