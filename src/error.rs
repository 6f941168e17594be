//! エラーハンドリングシステム
//!
//! ke 全体で使用される統一されたエラー型とユーティリティを定義
//! バッファ操作のエラーは常に非致命的で、呼び出し元へ返すだけとする

use std::time::{Duration, Instant};
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// バッファ操作エラー
    #[error("Buffer operation failed: {0}")]
    Buffer(#[from] BufferError),

    /// 編集・移動操作エラー
    #[error("Edit operation failed: {0}")]
    Edit(#[from] EditError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("file not found: {path}")]
    NotFound { path: String },

    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("invalid path: {path}")]
    InvalidPath { path: String },

    #[error("encoding error: {message}")]
    Encoding { message: String },

    #[error("file too large for buffer: {message}")]
    TooLarge { message: String },

    #[error("io error: {message}")]
    Io { message: String },
}

/// バッファ操作固有のエラー
///
/// どの操作もこのエラーを返した場合、行・文書の内容は呼び出し前と同一
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// 行または列が現在の範囲外
    ///
    /// `Line` を直接操作した場合は `row` が 0 になる
    #[error("invalid position: row {row}, column {col}")]
    InvalidPosition { row: usize, col: usize },

    /// 行数または行あたりの文字数の上限を超える
    #[error("capacity exceeded: {requested} > {limit}")]
    CapacityExceeded { requested: usize, limit: usize },

    /// 削除範囲が行頭より前に伸びている
    #[error("range underflow: cannot remove {count} characters before column {at}")]
    RangeUnderflow { count: usize, at: usize },
}

/// 編集・移動操作のエラー
///
/// いずれも「境界ヒット」として扱われ、状態は変化しない
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    #[error("cursor at buffer start")]
    AtBufferStart,

    #[error("cursor at buffer end")]
    AtBufferEnd,

    #[error("cursor on first line")]
    AtFirstLine,

    #[error("cursor on last line")]
    AtLastLine,

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("terminal initialization failed: {message}")]
    TerminalInit { message: String },

    #[error("rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Info,
    Error,
}

/// 画面最下行に一時表示する通知
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// 表示メッセージ
    pub message: String,
    /// レベル
    pub level: ErrorLevel,
    /// 表示開始時刻
    pub start_time: Instant,
    /// 表示持続時間
    pub duration: Duration,
}

impl StatusMessage {
    pub fn info(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            level: ErrorLevel::Info,
            start_time: Instant::now(),
            duration,
        }
    }

    pub fn error(error: &KeError, duration: Duration) -> Self {
        Self {
            message: Self::format_error(error),
            level: ErrorLevel::Error,
            start_time: Instant::now(),
            duration,
        }
    }

    fn format_error(error: &KeError) -> String {
        match error {
            KeError::File(FileError::PermissionDenied { path }) => {
                format!("save failed: permission denied: {}", path)
            }
            KeError::File(FileError::NotFound { path }) => {
                format!("save failed: no such directory for {}", path)
            }
            KeError::File(err) => format!("save failed: {}", err),
            other => other.to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }
}

/// パニックハンドラの設定
///
/// ターミナルを通常モードへ戻してからパニック情報を出力する
pub fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        crate::frontend::tui::restore_terminal();
        log::error!("panic: {}", panic_info);
        default_hook(panic_info);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, KeError>;

/// 各モジュール固有のResult型
pub mod buffer {
    pub type Result<T> = std::result::Result<T, super::BufferError>;
}

pub mod edit {
    pub type Result<T> = std::result::Result<T, super::EditError>;
}

// std::io::Error から FileError への変換
impl FileError {
    pub fn from_io(error: &std::io::Error, path: &std::path::Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            std::io::ErrorKind::InvalidData => FileError::Encoding {
                message: error.to_string(),
            },
            _ => FileError::Io {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

impl From<std::io::Error> for KeError {
    fn from(error: std::io::Error) -> Self {
        KeError::File(FileError::Io {
            message: error.to_string(),
        })
    }
}
