//! Docker 風の名前生成
//!
//! タグが決まらないときのフォールバックとして `eloquent_einstein` や
//! `clever_curie` のような「形容詞_姓」形式の名前を生成します。
//! 一意性は保証しません（衝突は許容）。

use crate::error::NameError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::LazyLock;
use tagforge_config::AdjectiveCatalog;

static FIRST_NAMES: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| parse_list(include_str!("../data/first_names.txt")));
static SURNAMES: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| parse_list(include_str!("../data/surnames.txt")));

fn parse_list(source: &'static str) -> Vec<&'static str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// 名前生成に使う乱数源
///
/// テストでは固定値を返す実装に差し替えます。
pub trait RandomSource {
    /// カタログから形容詞を1つ選ぶ
    fn pick_adjective(&mut self, catalog: &AdjectiveCatalog) -> String;

    /// ランダムな人名（"名 姓"）を1つ返す
    fn pick_full_name(&mut self) -> String;
}

/// `rand` による一様選択
pub struct StdRandomSource {
    rng: StdRng,
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StdRandomSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// シード固定（再現性が必要な場合）
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandomSource {
    fn pick_adjective(&mut self, catalog: &AdjectiveCatalog) -> String {
        catalog
            .entries()
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }

    fn pick_full_name(&mut self) -> String {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or_default();
        let last = SURNAMES.choose(&mut self.rng).copied().unwrap_or_default();
        format!("{} {}", first, last)
    }
}

/// `{adjective}_{surname}` 形式の名前を生成
///
/// 人名は最後の単語（姓）のみを使い、両方とも小文字化します。
/// タグとして安全になるよう ASCII 英字以外は取り除き、
/// 結果が空になった場合は [`NameError::Unusable`] を返します。
pub fn generate_name(
    catalog: &AdjectiveCatalog,
    source: &mut dyn RandomSource,
) -> Result<String, NameError> {
    let adjective = source.pick_adjective(catalog);
    let full_name = source.pick_full_name();

    let adjective_part = sanitize(&adjective);
    let surname_part = full_name
        .split_whitespace()
        .next_back()
        .map(sanitize)
        .unwrap_or_default();

    if adjective_part.is_empty() || surname_part.is_empty() {
        return Err(NameError::Unusable {
            adjective,
            name: full_name,
        });
    }

    Ok(format!("{}_{}", adjective_part, surname_part))
}

fn sanitize(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
