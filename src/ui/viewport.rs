//! ビューポート管理
//!
//! 画面に表示するテキスト領域の原点（先頭行・左端列）を管理する。

use crate::buffer::CursorPosition;
use serde::Deserialize;

/// カーソルが表示領域を外れたときのスクロール方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollPolicy {
    /// 描画ごとに1行・1列ずつ原点を寄せる
    #[default]
    Step,
    /// 縦方向はカーソル行を中央へ、横方向は最小距離で寄せる
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// 表示の開始行
    top: usize,
    /// 表示の開始列
    left: usize,
    /// 表示可能な列数
    width: usize,
    /// 表示可能な行数
    height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            top: 0,
            left: 0,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// ビューポートの寸法を更新（端末のリサイズ時）
    pub fn set_dimensions(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// 左端列を直接設定（カーソル移動時の表示追従用）
    pub(crate) fn set_left(&mut self, left: usize) {
        self.left = left;
    }

    /// 描画前の原点補正
    ///
    /// 戻り値はスクロールが発生したかどうか
    pub fn follow(&mut self, cursor: CursorPosition, policy: ScrollPolicy) -> bool {
        let before = (self.top, self.left);
        match policy {
            ScrollPolicy::Step => self.step_towards(cursor),
            ScrollPolicy::Center => self.center_on(cursor),
        }
        before != (self.top, self.left)
    }

    fn step_towards(&mut self, cursor: CursorPosition) {
        if cursor.row >= self.top + self.height {
            self.top += 1;
        } else if cursor.row < self.top {
            self.top -= 1;
        }

        if cursor.col >= self.left + self.width {
            self.left += 1;
        } else if cursor.col < self.left {
            self.left -= 1;
        }
    }

    fn center_on(&mut self, cursor: CursorPosition) {
        if cursor.row < self.top || cursor.row >= self.top + self.height {
            self.top = cursor.row.saturating_sub(self.height / 2);
        }

        if cursor.col < self.left {
            self.left = cursor.col;
        } else if cursor.col >= self.left + self.width {
            self.left = cursor.col + 1 - self.width;
        }
    }

    /// カーソルが表示領域内にあるか
    pub fn contains(&self, cursor: CursorPosition) -> bool {
        cursor.row >= self.top
            && cursor.row < self.top + self.height
            && cursor.col >= self.left
            && cursor.col < self.left + self.width
    }

    /// 文書上の位置を画面セル（列, 行）へ変換
    ///
    /// 表示領域外なら `None`
    pub fn project(&self, cursor: CursorPosition) -> Option<(u16, u16)> {
        if !self.contains(cursor) {
            return None;
        }
        let x = u16::try_from(cursor.col - self.left).ok()?;
        let y = u16::try_from(cursor.row - self.top).ok()?;
        Some((x, y))
    }

    /// 現在の表示開始行を取得
    pub fn top(&self) -> usize {
        self.top
    }

    /// 現在の表示開始列を取得
    pub fn left(&self) -> usize {
        self.left
    }

    /// 表示領域の幅を取得
    pub fn width(&self) -> usize {
        self.width
    }

    /// 表示領域の高さを取得
    pub fn height(&self) -> usize {
        self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_scrolls_one_row_per_call() {
        let mut viewport = Viewport::new(80, 4);
        let cursor = CursorPosition::new(10, 0);

        assert!(viewport.follow(cursor, ScrollPolicy::Step));
        assert_eq!(viewport.top(), 1);

        let mut renders = 1;
        while viewport.follow(cursor, ScrollPolicy::Step) {
            renders += 1;
        }
        assert_eq!(viewport.top(), 7);
        assert_eq!(renders, 7);
        assert!(viewport.contains(cursor));
    }

    #[test]
    fn test_step_scrolls_back_up_and_left() {
        let mut viewport = Viewport::new(10, 5);
        viewport.top = 3;
        viewport.left = 4;

        viewport.follow(CursorPosition::new(1, 2), ScrollPolicy::Step);
        assert_eq!((viewport.top(), viewport.left()), (2, 3));
    }

    #[test]
    fn test_step_is_noop_when_cursor_visible() {
        let mut viewport = Viewport::new(10, 5);
        assert!(!viewport.follow(CursorPosition::new(4, 9), ScrollPolicy::Step));
        assert_eq!((viewport.top(), viewport.left()), (0, 0));
    }

    #[test]
    fn test_center_jumps_to_middle() {
        let mut viewport = Viewport::new(80, 10);
        viewport.follow(CursorPosition::new(50, 0), ScrollPolicy::Center);
        assert_eq!(viewport.top(), 45);
        assert!(viewport.contains(CursorPosition::new(50, 0)));

        viewport.follow(CursorPosition::new(2, 0), ScrollPolicy::Center);
        assert_eq!(viewport.top(), 0);
    }

    #[test]
    fn test_center_reveals_column_minimally() {
        let mut viewport = Viewport::new(10, 5);
        viewport.follow(CursorPosition::new(0, 25), ScrollPolicy::Center);
        assert_eq!(viewport.left(), 16);
        assert_eq!(viewport.project(CursorPosition::new(0, 25)), Some((9, 0)));
    }

    #[test]
    fn test_project_outside_is_none() {
        let viewport = Viewport::new(10, 5);
        assert_eq!(viewport.project(CursorPosition::new(5, 0)), None);
        assert_eq!(viewport.project(CursorPosition::new(0, 10)), None);
        assert_eq!(viewport.project(CursorPosition::new(4, 9)), Some((9, 4)));
    }

    #[test]
    fn test_zero_dimensions_are_clamped() {
        let mut viewport = Viewport::new(0, 0);
        assert_eq!((viewport.width(), viewport.height()), (1, 1));
        viewport.set_dimensions(0, 3);
        assert_eq!((viewport.width(), viewport.height()), (1, 3));
    }
}
