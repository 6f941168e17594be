//! ファイル操作モジュール
//!
//! - 存在しないファイルは空の新規文書として開く
//! - UTF-8 のみ対応（BOM は読み込み時に除去）
//! - 保存時の行区切りは設定で選択（既定 CRLF）
//! - 権限不足などの保存失敗は通知として表示し、編集は継続

pub mod io;

// 公開API
pub use io::{expand_path, load_document, save_document, LineEnding, LoadedFile};
