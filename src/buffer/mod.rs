//! バッファ管理モジュール
//!
//! 行単位のテキスト格納、行分割・行結合、カーソル位置の表現を提供

pub mod cursor;
pub mod document;
pub mod line;

// 公開API
pub use cursor::{CursorMovement, CursorPosition};
pub use document::{Document, Limits, DEFAULT_MAX_LINES, DEFAULT_MAX_LINE_LENGTH};
pub use line::Line;
pub use crate::error::BufferError;
