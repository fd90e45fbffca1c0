use std::fmt;

use crate::direction::Direction;

/// 対応する盤面の最大の高さ。
pub const MAX_HEIGHT: usize = 60;

/// 対応する盤面の最大の幅。
pub const MAX_WIDTH: usize = 60;

/// 盤面上のマス。
///
/// 盤面サイズに依存しない通し番号 `row * MAX_WIDTH + col` を持つので、
/// Zobrist テーブルなど最大サイズ固定の表の添字として直接使える。
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Square(u16);

impl Square {
    /// 全マス数 (最大サイズの盤面における)。
    pub const NUM: usize = MAX_HEIGHT * MAX_WIDTH;

    pub fn new(row: usize, col: usize) -> Self {
        assert!(row < MAX_HEIGHT && col < MAX_WIDTH);

        Self((row * MAX_WIDTH + col) as u16)
    }

    pub const fn row(self) -> usize {
        self.0 as usize / MAX_WIDTH
    }

    pub const fn col(self) -> usize {
        self.0 as usize % MAX_WIDTH
    }

    /// 通し番号を返す。
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// `height` 行 `width` 列の盤面において、`dir` 方向に隣接するマスを返す。
    /// 盤面外になる場合は `None` を返す。
    pub fn neighbor(self, dir: Direction, height: usize, width: usize) -> Option<Self> {
        let (dr, dc) = dir.delta();
        let row = self.row().checked_add_signed(dr)?;
        let col = self.col().checked_add_signed(dc)?;

        (row < height && col < width).then(|| Self::new(row, col))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.row(), self.col())
    }
}
