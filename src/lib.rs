//! ke - 最小構成のスクリーンエディタ
//!
//! 1ファイルを開いて矢印キーで移動・文字入力・改行・後退削除を行い、
//! 保存または終了するだけの端末エディタ

// コアモジュール
pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod logging;

// データ層
pub mod buffer;
pub mod file;

// 編集層
pub mod editor;

// 入力
pub mod input;

// 表示層
pub mod ui;

// 公開API
pub use app::App;
pub use config::Config;
pub use error::{KeError, Result};
pub use frontend::TuiApplication;
