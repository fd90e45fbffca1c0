use std::fmt;

use crate::board::{fmt_grid, row_major};
use crate::cell::{Cell, Color};
use crate::square::Square;

/// 目標盤面。求解中は変更されない。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Target {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Target {
    pub fn new(height: usize, width: usize, cells: Vec<Cell>) -> Self {
        assert_eq!(cells.len(), height * width);

        Self {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, sq: Square) -> Cell {
        self.cells[row_major(self.width, sq)]
    }

    /// 色が指定されているマスを (マス, 色) の形で行優先に列挙する。
    pub fn goals(&self) -> impl Iterator<Item = (Square, Color)> + '_ {
        (0..self.height)
            .flat_map(move |row| (0..self.width).map(move |col| Square::new(row, col)))
            .filter_map(move |sq| self.get(sq).color().map(|color| (sq, color)))
    }

    /// 色が指定されているマスの個数。
    pub fn goal_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.color().is_some()).count()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_grid(f, self.width, &self.cells)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use itertools::assert_equal;

    use crate::problem::parse_target;

    use super::*;

    #[test]
    fn test_goals() {
        let target = parse_target(indoc! {"
            ..2
            #1#
            3..
        "})
        .unwrap();

        assert_eq!(target.goal_count(), 3);
        assert_equal(
            target.goals().map(|(sq, color)| (sq.row(), sq.col(), color.index())),
            [(0, 2, 2), (1, 1, 1), (2, 0, 3)],
        );
        assert_eq!(target.to_string(), "..2\n#1#\n3..");
    }
}
