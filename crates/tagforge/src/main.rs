mod build;
mod docker;
mod utils;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tagforge_config::Settings;

#[derive(Parser)]
#[command(name = "tagforge")]
#[command(about = "Build container images and publish them under deterministic tags", long_about = None)]
struct Cli {
    /// デバッグログを表示
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// イメージをビルドしてレジストリに公開
    Build {
        /// ビルド定義（コンテキストからの Dockerfile パス）
        #[arg(default_value = "Dockerfile")]
        definitions: Vec<String>,
        #[command(flatten)]
        config: ConfigArgs,
        /// Docker に接続せず、解決結果だけを表示
        #[arg(long)]
        dry_run: bool,
        /// 1件でも失敗したら終了コード 1 で終了
        #[arg(long)]
        strict: bool,
    },
    /// 各ビルド定義のタグと公開先を表示（ビルドしない）
    Tag {
        /// ビルド定義（コンテキストからの Dockerfile パス）
        #[arg(default_value = "Dockerfile")]
        definitions: Vec<String>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Docker 風のランダム名を1つ生成
    Name {
        /// 形容詞カタログのパス
        #[arg(long, env = "ADJECTIVES_PATH")]
        adjectives: Option<PathBuf>,
    },
    /// バージョン情報を表示
    Version,
}

/// 環境変数の値を上書きするオプション
#[derive(Args, Debug)]
struct ConfigArgs {
    /// レジストリ (REGISTRY)
    #[arg(long)]
    registry: Option<String>,
    /// 組織名 (ORGANIZATION)
    #[arg(long)]
    organization: Option<String>,
    /// サフィックスのない定義に使うタグ (IMAGE)
    #[arg(long)]
    image: Option<String>,
    /// プロファイル (PROFILE)
    #[arg(long)]
    profile: Option<String>,
    /// ターゲットアーキテクチャ (TARGETARCH)
    #[arg(long = "target-arch")]
    target_arch: Option<String>,
    /// ビルドコンテキストのディレクトリ (CONTEXT_DIR)
    #[arg(long = "context")]
    context_dir: Option<PathBuf>,
    /// 形容詞カタログのパス (ADJECTIVES_PATH)
    #[arg(long)]
    adjectives: Option<PathBuf>,
}

impl ConfigArgs {
    /// 環境変数から設定を読み込み、CLI オプションで上書きする
    fn into_settings(self) -> anyhow::Result<Settings> {
        let mut settings = Settings::from_env()?;

        if let Some(registry) = self.registry {
            settings.registry = registry;
        }
        if let Some(organization) = self.organization {
            settings.organization = organization;
        }
        if let Some(image) = self.image {
            settings.image = Some(image).filter(|i| !i.trim().is_empty());
        }
        if let Some(profile) = self.profile {
            settings.profile = profile;
        }
        if let Some(target_arch) = self.target_arch {
            settings.target_arch = target_arch;
        }
        if let Some(context_dir) = self.context_dir {
            settings.context_dir = context_dir;
        }
        if let Some(adjectives) = self.adjectives {
            settings.adjectives_path = Some(adjectives);
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            definitions,
            config,
            dry_run,
            strict,
        } => {
            let settings = config.into_settings()?;
            build::handle_build_command(&settings, &definitions, dry_run, strict).await?;
        }
        Commands::Tag {
            definitions,
            config,
        } => {
            let settings = config.into_settings()?;
            build::handle_tag_command(&settings, &definitions)?;
        }
        Commands::Name { adjectives } => {
            build::handle_name_command(adjectives.as_deref())?;
        }
        Commands::Version => {
            println!("tagforge {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
