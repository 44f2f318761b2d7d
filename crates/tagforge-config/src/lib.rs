//! tagforge の実行設定
//!
//! 環境変数から一度だけ読み込まれる不変の [`Settings`] と、
//! フォールバックタグの生成に使う [`AdjectiveCatalog`] を提供します。

pub mod catalog;
pub mod error;
pub mod settings;
pub mod tag_rules;

pub use catalog::{AdjectiveCatalog, load_adjectives};
pub use error::*;
pub use settings::Settings;
pub use tag_rules::tag_violation;
