//! 公開タグの決定
//!
//! ビルド定義ごとに、次の優先順位でタグを1つ決めます（最初に一致したものを採用）:
//!
//! 1. ビルド定義名のサフィックス（最初の `.` 以降すべて）
//!    - `Dockerfile.arm64` -> `arm64`
//!    - `Dockerfile.arm64.debug` -> `arm64.debug`
//! 2. 実行全体のイメージ名上書き（`IMAGE`）
//! 3. Docker 風のランダム名（`eloquent_einstein` など）

use crate::error::{BuildError, BuildResult, NameError};
use crate::names::{RandomSource, generate_name};
use std::fmt;
use tagforge_config::{AdjectiveCatalog, tag_violation};

/// タグがどの規則で決まったか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOrigin {
    Suffix,
    Override,
    Generated,
}

impl fmt::Display for TagOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagOrigin::Suffix => write!(f, "suffix"),
            TagOrigin::Override => write!(f, "override"),
            TagOrigin::Generated => write!(f, "generated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub value: String,
    pub origin: TagOrigin,
}

impl ResolvedTag {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ResolvedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// ビルド定義のタグを決定
///
/// 3番目の規則に到達した場合のみ乱数源を消費します。
pub fn resolve_tag(
    definition: &str,
    image_override: Option<&str>,
    catalog: &AdjectiveCatalog,
    source: &mut dyn RandomSource,
) -> Result<ResolvedTag, NameError> {
    if let Some((_, suffix)) = definition.split_once('.') {
        return Ok(ResolvedTag {
            value: suffix.to_string(),
            origin: TagOrigin::Suffix,
        });
    }

    if let Some(image) = image_override.filter(|i| !i.is_empty()) {
        return Ok(ResolvedTag {
            value: image.to_string(),
            origin: TagOrigin::Override,
        });
    }

    Ok(ResolvedTag {
        value: generate_name(catalog, source)?,
        origin: TagOrigin::Generated,
    })
}

/// `registry/organization/tag` 形式の公開先を組み立てる
pub fn publish_reference(registry: &str, organization: &str, tag: &str) -> String {
    format!("{}/{}/{}", registry, organization, tag)
}

/// タグのバリデーション
///
/// 制約は [`tagforge_config::tag_violation`] と共通（IMAGE の検証と同じ規則）:
/// - 128文字以下
/// - 英小文字、数字、ピリオド、ハイフン、アンダースコアのみ
/// - 先頭はピリオドまたはハイフンではない
pub fn validate_tag(tag: &str) -> BuildResult<()> {
    match tag_violation(tag) {
        Some(reason) => Err(BuildError::InvalidTag { tag: reason }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::StdRandomSource;
    use crate::names::tests::FixedSource;

    fn catalog() -> AdjectiveCatalog {
        AdjectiveCatalog::parse("eloquent").unwrap()
    }

    #[test]
    fn test_suffix_takes_everything_after_first_dot() {
        let mut source = FixedSource::new("eloquent", "Albert Einstein");

        let tag = resolve_tag("Dockerfile.arm64", None, &catalog(), &mut source).unwrap();
        assert_eq!(tag.value, "arm64");
        assert_eq!(tag.origin, TagOrigin::Suffix);

        let tag = resolve_tag("Dockerfile.arm64.debug", None, &catalog(), &mut source).unwrap();
        assert_eq!(tag.value, "arm64.debug");

        let tag = resolve_tag("Dockerfile.linux.amd64", None, &catalog(), &mut source).unwrap();
        assert_eq!(tag.value, "linux.amd64");
    }

    #[test]
    fn test_suffix_wins_over_override() {
        let mut source = FixedSource::new("eloquent", "Albert Einstein");
        let tag = resolve_tag("Dockerfile.dev", Some("nightly"), &catalog(), &mut source).unwrap();
        assert_eq!(tag.value, "dev");
        assert_eq!(tag.origin, TagOrigin::Suffix);
    }

    #[test]
    fn test_override_is_shared_across_definitions() {
        let mut source = StdRandomSource::seeded(7);
        let a = resolve_tag("Dockerfile", Some("nightly"), &catalog(), &mut source).unwrap();
        let b = resolve_tag("build/Containerfile", Some("nightly"), &catalog(), &mut source).unwrap();
        assert_eq!(a.value, "nightly");
        assert_eq!(a, b);
        assert_eq!(a.origin, TagOrigin::Override);
    }

    #[test]
    fn test_empty_override_falls_through() {
        let mut source = FixedSource::new("eloquent", "Albert Einstein");
        let tag = resolve_tag("Dockerfile", Some(""), &catalog(), &mut source).unwrap();
        assert_eq!(tag.value, "eloquent_einstein");
        assert_eq!(tag.origin, TagOrigin::Generated);
    }

    #[test]
    fn test_generated_fallback() {
        let mut source = FixedSource::new("eloquent", "Albert Einstein");
        let tag = resolve_tag("Dockerfile", None, &catalog(), &mut source).unwrap();
        assert_eq!(tag.value, "eloquent_einstein");
    }

    #[test]
    fn test_generated_fallback_propagates_name_error() {
        let mut source = FixedSource::new("eloquent", "");
        assert!(resolve_tag("Dockerfile", None, &catalog(), &mut source).is_err());
    }

    #[test]
    fn test_publish_reference() {
        let first = publish_reference("ghcr.io", "acme", "arm64");
        let second = publish_reference("ghcr.io", "acme", "arm64");
        assert_eq!(first, "ghcr.io/acme/arm64");
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_tag() {
        assert!(validate_tag("v1.0.0").is_ok());
        assert!(validate_tag("eloquent_einstein").is_ok());
        assert!(validate_tag("arm64.debug").is_ok());

        assert!(validate_tag("").is_err());
        assert!(validate_tag(".hidden").is_err());
        assert!(validate_tag("-dash").is_err());
        assert!(validate_tag("foo bar").is_err());
        assert!(validate_tag(&"a".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_tag_rejects_uppercase_suffix() {
        let mut source = FixedSource::new("eloquent", "Albert Einstein");
        let tag = resolve_tag("Dockerfile.ARM64", None, &catalog(), &mut source).unwrap();
        assert_eq!(tag.value, "ARM64");

        let err = validate_tag(tag.as_str()).unwrap_err();
        assert!(err.to_string().contains("Uppercase character 'A'"));
    }

    #[test]
    fn test_validate_tag_rejects_path_suffix() {
        let mut source = FixedSource::new("eloquent", "Albert Einstein");
        let tag = resolve_tag("./Dockerfile", None, &catalog(), &mut source).unwrap();
        assert_eq!(tag.value, "/Dockerfile");
        assert!(validate_tag(tag.as_str()).is_err());
    }
}
