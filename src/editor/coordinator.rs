//! カーソル・ビューポート協調
//!
//! 論理カーソル位置とビューポート原点を文書に対して追跡する。
//! 文書は所有せず、操作ごとに借用する。各操作は完全に成功するか、
//! 状態を一切変えずに境界ヒット（`EditError`）を返す。

use crate::buffer::{CursorMovement, CursorPosition, Document};
use crate::error::{edit::Result, EditError};
use crate::ui::viewport::{ScrollPolicy, Viewport};

#[derive(Debug, Clone)]
pub struct Coordinator {
    /// 論理カーソル位置
    cursor: CursorPosition,
    /// 表示領域
    viewport: Viewport,
    /// スクロール方針
    policy: ScrollPolicy,
}

impl Coordinator {
    pub fn new(width: usize, height: usize, policy: ScrollPolicy) -> Self {
        Self {
            cursor: CursorPosition::origin(),
            viewport: Viewport::new(width, height),
            policy,
        }
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn policy(&self) -> ScrollPolicy {
        self.policy
    }

    /// 画面サイズの変更
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport.set_dimensions(width, height);
    }

    /// 描画前のビューポート補正
    pub fn scroll(&mut self) -> bool {
        self.viewport.follow(self.cursor, self.policy)
    }

    /// 文書が差し替えられた後にカーソルを有効な位置へ寄せる
    pub fn clamp_to(&mut self, document: &Document) {
        let row = self.cursor.row.min(document.last_row());
        let col = self.cursor.col.min(document.line_len(row));
        self.cursor = CursorPosition::new(row, col);
    }

    /// カーソル移動
    pub fn move_cursor(&mut self, document: &Document, movement: CursorMovement) -> Result<()> {
        match movement {
            CursorMovement::Up => self.move_up(document),
            CursorMovement::Down => self.move_down(document),
            CursorMovement::Left => self.move_left(document),
            CursorMovement::Right => self.move_right(document),
        }
    }

    /// 次の行へ移動
    pub fn move_down(&mut self, document: &Document) -> Result<()> {
        if self.cursor.row >= document.last_row() {
            return Err(EditError::AtLastLine);
        }
        self.enter_row(document, self.cursor.row + 1);
        Ok(())
    }

    /// 前の行へ移動
    pub fn move_up(&mut self, document: &Document) -> Result<()> {
        if self.cursor.row == 0 {
            return Err(EditError::AtFirstLine);
        }
        self.enter_row(document, self.cursor.row - 1);
        Ok(())
    }

    /// 1文字左へ。行頭では前の行の末尾へ
    pub fn move_left(&mut self, document: &Document) -> Result<()> {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
            return Ok(());
        }
        if self.cursor.row == 0 {
            return Err(EditError::AtBufferStart);
        }

        let row = self.cursor.row - 1;
        let col = document.line_len(row);
        self.cursor = CursorPosition::new(row, col);
        // 右端より先なら、行末が最右列に来るまで左端を進める
        if col >= self.viewport.left() + self.viewport.width() {
            self.viewport.set_left(col + 1 - self.viewport.width());
        }
        Ok(())
    }

    /// 1文字右へ。行末では次の行の先頭へ
    pub fn move_right(&mut self, document: &Document) -> Result<()> {
        if self.cursor.col < document.line_len(self.cursor.row) {
            self.cursor.col += 1;
            return Ok(());
        }
        if self.cursor.row >= document.last_row() {
            return Err(EditError::AtBufferEnd);
        }

        self.cursor = CursorPosition::new(self.cursor.row + 1, 0);
        self.viewport.set_left(0);
        Ok(())
    }

    /// カーソル位置に文字を挿入
    pub fn insert_char(&mut self, document: &mut Document, ch: char) -> Result<()> {
        self.cursor = document.insert_character(ch, self.cursor.row, self.cursor.col)?;
        Ok(())
    }

    /// カーソル位置で改行（行分割）
    pub fn insert_newline(&mut self, document: &mut Document) -> Result<()> {
        self.insert_char(document, '\n')
    }

    /// カーソル直前の文字を削除（行頭では行結合）
    pub fn delete_backward(&mut self, document: &mut Document) -> Result<()> {
        self.cursor = document.delete_character(self.cursor.row, self.cursor.col)?;
        Ok(())
    }

    /// 上下移動の共通処理：列を新しい行の長さへ切り詰め、必要なら左端を寄せる
    fn enter_row(&mut self, document: &Document, row: usize) {
        let len = document.line_len(row);
        self.cursor.row = row;
        if len <= self.cursor.col {
            self.cursor.col = len;
            if self.cursor.col < self.viewport.left() {
                self.viewport.set_left(self.cursor.col);
            }
        }
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(80, 24, ScrollPolicy::default())
    }
}
