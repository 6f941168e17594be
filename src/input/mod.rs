//! 入力処理モジュール
//!
//! キー割り当てとコマンド定義を提供

pub mod commands;
pub mod event_handler;

// 公開API
pub use commands::{Command, CommandOutcome};
pub use event_handler::{translate_event, translate_key, InputResult};
