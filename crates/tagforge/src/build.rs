use crate::docker;
use crate::utils;
use colored::Colorize;
use std::path::Path;
use tagforge_build::{
    BuildDefinition, BuildEngine, BuildOrchestrator, DockerEngine, DryRunEngine, Outcome,
    RunResult, RunSummary, StdRandomSource, generate_name, publish_reference, resolve_tag,
    validate_tag,
};
use tagforge_config::{AdjectiveCatalog, Settings, load_adjectives};

/// ビルドコマンドを処理
pub async fn handle_build_command(
    settings: &Settings,
    definitions: &[String],
    dry_run: bool,
    strict: bool,
) -> anyhow::Result<()> {
    let definitions: Vec<BuildDefinition> =
        definitions.iter().cloned().map(BuildDefinition::from).collect();

    // カタログが使えなければフォールバック名を作れないので、ビルド前に中断
    let catalog = load_adjectives(settings.adjectives_path.as_deref())?;

    if dry_run {
        println!("{}", "イメージのビルドを確認中 (dry-run)...".green());
    } else {
        println!("{}", "イメージをビルド中...".green());
    }
    utils::print_settings(settings);
    println!();
    println!(
        "{}",
        format!("ビルド対象 ({} 個):", definitions.len()).bold()
    );
    for definition in &definitions {
        println!("  • {}", definition.as_str().cyan());
    }
    println!();

    let results = if dry_run {
        run(DryRunEngine, settings, &catalog, &definitions).await?
    } else {
        println!("{}", "Dockerに接続中...".blue());
        let docker_conn = docker::init_docker_with_error_handling().await?;
        run(DockerEngine::new(docker_conn), settings, &catalog, &definitions).await?
    };

    print_summary(&results);

    if strict && !results.all_succeeded() {
        anyhow::bail!(
            "{} 件のビルドに失敗しました",
            results.failed()
        );
    }

    Ok(())
}

async fn run<E: BuildEngine>(
    engine: E,
    settings: &Settings,
    catalog: &AdjectiveCatalog,
    definitions: &[BuildDefinition],
) -> anyhow::Result<Vec<RunResult>> {
    let mut orchestrator =
        BuildOrchestrator::new(engine, StdRandomSource::new(), settings, catalog);
    let results = orchestrator.run(definitions).await?;

    for result in &results {
        print_result(result);
    }

    Ok(results)
}

fn print_result(result: &RunResult) {
    match &result.outcome {
        Outcome::Published { .. } => {
            println!("  {} {}", "✓".green(), result.to_string().cyan());
        }
        Outcome::Failed { error, hint, .. } => {
            eprintln!("  {} {}", "✗".red().bold(), result);
            if hint != error {
                for line in hint.lines() {
                    eprintln!("    {}", line.dimmed());
                }
            }
        }
    }
}

fn print_summary(results: &[RunResult]) {
    println!();
    println!("{}", "結果サマリー:".bold());
    for result in results {
        let mark = if result.is_success() {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            "  {} {} → {} ({})",
            mark,
            result.definition,
            result.tag.as_str().cyan(),
            result.tag.origin
        );
    }

    println!();
    let line = format!(
        "成功: {} / 失敗: {}",
        results.succeeded(),
        results.failed()
    );
    if results.all_succeeded() {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.yellow().bold());
    }
}

/// タグ表示コマンドを処理（ビルドしない）
pub fn handle_tag_command(settings: &Settings, definitions: &[String]) -> anyhow::Result<()> {
    let catalog = load_adjectives(settings.adjectives_path.as_deref())?;
    let mut source = StdRandomSource::new();

    for definition in definitions {
        let tag = resolve_tag(
            definition,
            settings.image.as_deref(),
            &catalog,
            &mut source,
        )?;
        // build と同じ検証を通らないタグは公開先を表示しない
        let target = match validate_tag(tag.as_str()) {
            Ok(()) => publish_reference(&settings.registry, &settings.organization, tag.as_str()),
            Err(e) => format!("invalid: {}", e),
        };
        println!("{}\t{}\t{}\t{}", definition, tag, tag.origin, target);
    }

    Ok(())
}

/// 名前生成コマンドを処理
pub fn handle_name_command(adjectives: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load_adjectives(adjectives)?;
    let name = generate_name(&catalog, &mut StdRandomSource::new())?;
    println!("{}", name);
    Ok(())
}
