//! エディタモジュール
//!
//! カーソル・ビューポートと文書編集の協調

pub mod coordinator;

// 公開API
pub use coordinator::Coordinator;
pub use crate::error::EditError;
