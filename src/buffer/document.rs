//! 文書バッファ
//!
//! 行の並びを保持し、改行による行分割と行頭での削除による行結合を
//! 行単位のアトミックな操作として提供する。

use crate::buffer::cursor::CursorPosition;
use crate::buffer::line::Line;
use crate::error::{buffer::Result, BufferError};

/// 最大行数の既定値
pub const DEFAULT_MAX_LINES: usize = 100_000;
/// 1行あたりの最大文字数の既定値
pub const DEFAULT_MAX_LINE_LENGTH: usize = 100_000;

/// 文書の容量上限（セッション開始時に固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// 最大行数
    pub max_lines: usize,
    /// 1行あたりの最大文字数
    pub max_line_length: usize,
}

impl Limits {
    pub fn new(max_lines: usize, max_line_length: usize) -> Self {
        Self {
            max_lines,
            max_line_length,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES, DEFAULT_MAX_LINE_LENGTH)
    }
}

/// 行の並びからなる文書
///
/// * 行数は常に `1..=max_lines`
/// * すべての行の容量は `max_line_length`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    limits: Limits,
    lines: Vec<Line>,
}

impl Document {
    /// 空行1行だけの文書を作成
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            lines: vec![Line::new(limits.max_line_length)],
        }
    }

    /// テキストから文書を作成
    ///
    /// `\n` で行に分割し、各行末の `\r` を1つだけ取り除く
    pub fn from_text(text: &str, limits: Limits) -> Result<Self> {
        let lines = text
            .split('\n')
            .map(|row| {
                let row = row.strip_suffix('\r').unwrap_or(row);
                Line::from_str(limits.max_line_length, row)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut document = Self::new(limits);
        document.initialize(lines)?;
        Ok(document)
    }

    /// 行の並びで文書を初期化
    ///
    /// 空の並びは空行1行として扱う。失敗時は既存の内容を保持する。
    pub fn initialize(&mut self, lines: Vec<Line>) -> Result<()> {
        if lines.len() > self.limits.max_lines {
            return Err(BufferError::CapacityExceeded {
                requested: lines.len(),
                limit: self.limits.max_lines,
            });
        }
        if let Some(line) = lines
            .iter()
            .find(|line| line.capacity() != self.limits.max_line_length)
        {
            return Err(BufferError::CapacityExceeded {
                requested: line.capacity(),
                limit: self.limits.max_line_length,
            });
        }

        self.lines = if lines.is_empty() {
            vec![Line::new(self.limits.max_line_length)]
        } else {
            lines
        };
        Ok(())
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// 全行
    pub fn rows(&self) -> &[Line] {
        &self.lines
    }

    /// 指定行
    pub fn row_at(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.lines.len()
    }

    /// 最終行の番号
    pub fn last_row(&self) -> usize {
        self.lines.len() - 1
    }

    /// 指定行の文字数（範囲外は0）
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(Line::len).unwrap_or(0)
    }

    /// カーソル位置が文書内で有効かどうか
    pub fn is_valid_position(&self, position: CursorPosition) -> bool {
        position.row < self.lines.len() && position.col <= self.line_len(position.row)
    }

    /// 指定位置に1文字挿入し、新しいカーソル位置を返す
    ///
    /// `'\n'` は行分割として扱う
    pub fn insert_character(&mut self, ch: char, row: usize, col: usize) -> Result<CursorPosition> {
        self.check_position(row, col)?;

        if ch == '\n' {
            return self.split_line(row, col);
        }

        self.lines[row]
            .insert(&[ch], col)
            .map_err(|err| with_row(err, row))?;
        Ok(CursorPosition::new(row, col + 1))
    }

    /// 指定位置の直前の1文字を削除し、新しいカーソル位置を返す
    ///
    /// 行頭では前の行との結合になる
    pub fn delete_character(&mut self, row: usize, col: usize) -> Result<CursorPosition> {
        self.check_position(row, col)?;

        if col == 0 {
            return self.join_with_previous(row);
        }

        self.lines[row]
            .delete(1, col)
            .map_err(|err| with_row(err, row))?;
        Ok(CursorPosition::new(row, col - 1))
    }

    /// 全行を行区切り文字で連結
    pub fn to_text(&self, terminator: &str) -> String {
        self.lines
            .iter()
            .map(Line::to_string)
            .collect::<Vec<_>>()
            .join(terminator)
    }

    fn check_position(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.lines.len() || col > self.lines[row].len() {
            return Err(BufferError::InvalidPosition { row, col });
        }
        Ok(())
    }

    fn split_line(&mut self, row: usize, col: usize) -> Result<CursorPosition> {
        let requested = self.lines.len() + 1;
        if requested > self.limits.max_lines {
            return Err(BufferError::CapacityExceeded {
                requested,
                limit: self.limits.max_lines,
            });
        }

        let tail = self.lines[row]
            .split_off(col)
            .map_err(|err| with_row(err, row))?;
        self.lines.insert(row + 1, tail);
        Ok(CursorPosition::new(row + 1, 0))
    }

    fn join_with_previous(&mut self, row: usize) -> Result<CursorPosition> {
        if row == 0 {
            return Err(BufferError::InvalidPosition { row, col: 0 });
        }

        let join_col = self.lines[row - 1].len();
        let requested = join_col + self.lines[row].len();
        if requested > self.limits.max_line_length {
            return Err(BufferError::CapacityExceeded {
                requested,
                limit: self.limits.max_line_length,
            });
        }

        let removed = self.lines.remove(row);
        if let Err(err) = self.lines[row - 1].append(&removed) {
            // 容量は事前確認済みだが、失敗時は行を戻して状態を保つ
            self.lines.insert(row, removed);
            return Err(with_row(err, row - 1));
        }
        Ok(CursorPosition::new(row - 1, join_col))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

/// 行単体のエラーに行番号を補う
fn with_row(err: BufferError, row: usize) -> BufferError {
    match err {
        BufferError::InvalidPosition { col, .. } => BufferError::InvalidPosition { row, col },
        other => other,
    }
}
