//! UIモジュール
//!
//! ビューポート、表示スナップショット、ratatui による描画

pub mod renderer;
pub mod view;
pub mod viewport;

// 公開API
pub use renderer::Renderer;
pub use view::ViewSnapshot;
pub use viewport::{ScrollPolicy, Viewport};
