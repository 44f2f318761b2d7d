//! 公開タグの制約
//!
//! 解決されたタグは `registry/organization/<tag>` の最後のパス要素になるため、
//! Docker のタグ文字種に加えてリポジトリ名と同じく小文字のみを許可します。

pub const MAX_TAG_LEN: usize = 128;

/// タグとして使えない理由を返す（使える場合は None）
///
/// - 空でない、128文字以下
/// - 英小文字、数字、ピリオド、ハイフン、アンダースコアのみ
/// - 先頭はピリオドまたはハイフンではない
pub fn tag_violation(tag: &str) -> Option<String> {
    if tag.is_empty() {
        return Some("(empty)".to_string());
    }

    if tag.len() > MAX_TAG_LEN {
        return Some(format!(
            "Tag too long ({} characters, max {})",
            tag.len(),
            MAX_TAG_LEN
        ));
    }

    if tag.starts_with('.') || tag.starts_with('-') {
        return Some(tag.to_string());
    }

    for c in tag.chars() {
        if c.is_ascii_uppercase() {
            return Some(format!(
                "Uppercase character '{}' in tag: {} (repository names must be lowercase)",
                c, tag
            ));
        }
        if !c.is_ascii_alphanumeric() && c != '.' && c != '-' && c != '_' {
            return Some(format!("Invalid character '{}' in tag: {}", c, tag));
        }
    }

    None
}
