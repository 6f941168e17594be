//! 行バッファ
//!
//! 容量上限付きの文字列。挿入・削除は後続の文字をずらして行う。

use crate::error::{buffer::Result, BufferError};
use std::fmt;

/// 容量上限付きの1行分の文字列
///
/// `len() <= capacity()` を常に満たす。上限を破る操作は状態を変えずに失敗する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 最大文字数
    capacity: usize,
    /// 行の内容（文字単位）
    chars: Vec<char>,
}

impl Line {
    /// 空の行を作成
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            chars: Vec::new(),
        }
    }

    /// 初期内容をコピーして行を作成
    pub fn with_contents(capacity: usize, contents: &[char]) -> Result<Self> {
        let mut line = Self::new(capacity);
        line.insert(contents, 0)?;
        Ok(line)
    }

    /// 文字列から行を作成
    pub fn from_str(capacity: usize, text: &str) -> Result<Self> {
        let chars: Vec<char> = text.chars().collect();
        Self::with_contents(capacity, &chars)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 文字数
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// 行の全内容
    pub fn contents(&self) -> &[char] {
        &self.chars
    }

    /// `at` の位置に文字列を挿入
    ///
    /// * `at > len()` なら `InvalidPosition`
    /// * 挿入後に容量を超えるなら `CapacityExceeded`
    pub fn insert(&mut self, chars: &[char], at: usize) -> Result<()> {
        if at > self.chars.len() {
            return Err(invalid_column(at));
        }
        let requested = self.chars.len() + chars.len();
        if requested > self.capacity {
            return Err(BufferError::CapacityExceeded {
                requested,
                limit: self.capacity,
            });
        }

        self.chars.splice(at..at, chars.iter().copied());
        Ok(())
    }

    /// `at` の直前 `count` 文字（`[at - count, at)`）を削除
    ///
    /// * `at > len()` なら `InvalidPosition`
    /// * `at < count` なら `RangeUnderflow`
    pub fn delete(&mut self, count: usize, at: usize) -> Result<()> {
        if at > self.chars.len() {
            return Err(invalid_column(at));
        }
        if at < count {
            return Err(BufferError::RangeUnderflow { count, at });
        }

        self.chars.drain(at - count..at);
        Ok(())
    }

    /// `at` 以降を切り離して新しい行として返す（行分割用）
    pub(crate) fn split_off(&mut self, at: usize) -> Result<Line> {
        if at > self.chars.len() {
            return Err(invalid_column(at));
        }
        Ok(Line {
            capacity: self.capacity,
            chars: self.chars.split_off(at),
        })
    }

    /// 別の行の内容を末尾へ連結（行結合用）
    pub(crate) fn append(&mut self, other: &Line) -> Result<()> {
        let at = self.chars.len();
        self.insert(&other.chars, at)
    }
}

/// 列が範囲外のときのエラー
///
/// 行単体は自分の行番号を知らないため `row` は常に 0。
/// `Document` 経由の操作では実際の行番号に置き換えて返す。
fn invalid_column(col: usize) -> BufferError {
    BufferError::InvalidPosition { row: 0, col }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|ch| fmt::Write::write_char(f, *ch))
    }
}
