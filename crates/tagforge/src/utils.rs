use colored::Colorize;
use tagforge_config::Settings;

/// 実行設定を表示
pub fn print_settings(settings: &Settings) {
    println!("レジストリ: {}", settings.registry.cyan());
    println!("組織: {}", settings.organization.cyan());
    if let Some(image) = &settings.image {
        println!("イメージ名 (上書き): {}", image.cyan());
    }
    println!("プロファイル: {}", settings.profile.cyan());
    println!("プラットフォーム: {}", settings.platform().cyan());
    println!(
        "コンテキスト: {}",
        settings.context_dir.display().to_string().cyan()
    );
    if let Some(path) = &settings.adjectives_path {
        println!("形容詞カタログ: {}", path.display().to_string().cyan());
    }
}
