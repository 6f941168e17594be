//! 描画用スナップショット
//!
//! 文書とビューポートから、画面に載る文字列とカーソルセルを切り出す。
//! 端末に依存しないため、描画内容をそのまま検証できる。

use crate::buffer::{CursorPosition, Document};
use crate::error::{ErrorLevel, StatusMessage};
use crate::ui::viewport::Viewport;
use unicode_width::UnicodeWidthChar;

/// 1フレーム分の表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    /// 画面行ごとの文字列（文書末尾より先の行は含まない）
    pub rows: Vec<String>,
    /// 画面上のカーソルセル（列, 行）。表示領域外なら `None`
    pub cursor: Option<(u16, u16)>,
    /// 最下行に重ねる通知
    pub status: Option<(String, ErrorLevel)>,
}

impl ViewSnapshot {
    /// 文書の表示部分を切り出す
    pub fn capture(
        document: &Document,
        viewport: &Viewport,
        cursor: CursorPosition,
        status: Option<&StatusMessage>,
    ) -> Self {
        let rows = document
            .rows()
            .iter()
            .skip(viewport.top())
            .take(viewport.height())
            .map(|line| {
                line.contents()
                    .iter()
                    .skip(viewport.left())
                    .take(viewport.width())
                    .map(|&ch| display_char(ch))
                    .collect()
            })
            .collect();

        Self {
            rows,
            cursor: viewport.project(cursor),
            status: status.map(|s| (s.message.clone(), s.level)),
        }
    }
}

/// 1セル幅で描けない文字の代替表示
const WIDE_PLACEHOLDER: char = '?';

/// 1文字を必ず1セルで表示する
///
/// カーソルのセルは `col - left` で決まるため、文字列の表示幅は文字数と
/// 一致していなければならない。制御文字は空白、全角や結合文字など
/// 幅が1でない文字は代替文字にする。
fn display_char(ch: char) -> char {
    if ch.is_control() {
        return ' ';
    }
    match ch.width() {
        Some(1) => ch,
        _ => WIDE_PLACEHOLDER,
    }
}
