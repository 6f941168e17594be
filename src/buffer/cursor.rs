//! カーソル位置管理
//!
//! 文書内の論理位置（行・列）を表現する

use std::fmt;

/// カーソル位置を表現する構造体
///
/// `col == 行の長さ` は行末（最後の文字の後ろ）を表す有効な挿入位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CursorPosition {
    /// 行番号（0ベース）
    pub row: usize,
    /// 列番号（0ベース、文字単位）
    pub col: usize,
}

impl CursorPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 文書の原点
    pub fn origin() -> Self {
        Self::default()
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}

/// カーソル移動の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorMovement {
    Up,
    Down,
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_ordering_is_row_major() {
        assert!(CursorPosition::new(0, 10) < CursorPosition::new(1, 0));
        assert!(CursorPosition::new(2, 1) < CursorPosition::new(2, 3));
        assert_eq!(CursorPosition::origin(), CursorPosition::new(0, 0));
    }

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(CursorPosition::new(0, 4).to_string(), "1:5");
    }
}
