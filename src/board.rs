use std::fmt;

use arrayvec::ArrayVec;
use itertools::Itertools as _;

use crate::cell::{Cell, Color};
use crate::direction::Direction;
use crate::square::{Square, MAX_HEIGHT, MAX_WIDTH};

/// ボールの識別子 (ボールリスト内のインデックス)。
pub type BallId = usize;

/// ボール 1 個の情報。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ball {
    pub square: Square,
    pub color: Color,
}

/// 盤面。マスの二次元配列と、それと整合したボールリストを持つ。
///
/// ボールは初期化時に行優先順で登録され、以後増減しない。
/// 盤面を変更する操作はボールの位置も同時に更新する。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
    balls: Vec<Ball>,
}

impl Board {
    /// `height` 行 `width` 列の盤面を行優先のマス配列から作る。
    pub fn new(height: usize, width: usize, cells: Vec<Cell>) -> Self {
        assert!(0 < height && height <= MAX_HEIGHT);
        assert!(0 < width && width <= MAX_WIDTH);
        assert_eq!(cells.len(), height * width);

        let balls = (0..height)
            .flat_map(|row| (0..width).map(move |col| Square::new(row, col)))
            .filter_map(|square| {
                cells[row_major(width, square)]
                    .color()
                    .map(|color| Ball { square, color })
            })
            .collect();

        Self {
            height,
            width,
            cells,
            balls,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn area(&self) -> usize {
        self.height * self.width
    }

    /// 盤面内の全マスを行優先で列挙する。
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Square::new(row, col)))
    }

    pub fn get(&self, sq: Square) -> Cell {
        self.cells[row_major(self.width, sq)]
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball(&self, id: BallId) -> Ball {
        self.balls[id]
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    /// `sq` から `dir` 方向に隣接するマスが盤面外または壁かどうかを返す。
    pub fn is_blocked_by_wall(&self, sq: Square, dir: Direction) -> bool {
        self.neighbor(sq, dir)
            .map_or(true, |nxt| self.get(nxt).is_wall())
    }

    pub fn neighbor(&self, sq: Square, dir: Direction) -> Option<Square> {
        sq.neighbor(dir, self.height, self.width)
    }

    /// `sq` から `dir` 方向に転がしたときの停止マスを返す (盤面は変更しない)。
    ///
    /// 空マスが続く限り進み、壁・ボール・盤端の直前で止まる。
    /// 1 マスも進めない場合は `sq` 自身を返す。
    pub fn roll_target(&self, sq: Square, dir: Direction) -> Square {
        let mut cur = sq;
        while let Some(nxt) = self.neighbor(cur, dir) {
            if !self.get(nxt).is_empty() {
                break;
            }
            cur = nxt;
        }
        cur
    }

    /// `sq` から 1 マス以上動ける方向と、その停止マスを列挙する。
    pub fn roll_targets(&self, sq: Square) -> ArrayVec<(Direction, Square), { Direction::NUM }> {
        Direction::ALL
            .into_iter()
            .map(|dir| (dir, self.roll_target(sq, dir)))
            .filter(|&(_, dst)| dst != sq)
            .collect()
    }

    /// ボール `id` を `dir` 方向に転がし、停止マスを返す。
    /// 動けない場合は何もせず現在位置を返す。
    pub fn roll(&mut self, id: BallId, dir: Direction) -> Square {
        let src = self.balls[id].square;
        let dst = self.roll_target(src, dir);
        self.move_ball(id, dst);
        dst
    }

    /// ボール `id` を `dst` へ移す (元のマスと `dst` の内容を交換する)。
    ///
    /// 転がしの取り消しにも使う。`dst` は空マスかボール自身の位置でなければならない。
    pub fn move_ball(&mut self, id: BallId, dst: Square) {
        let src = self.balls[id].square;
        let i_src = row_major(self.width, src);
        let i_dst = row_major(self.width, dst);
        debug_assert!(i_src == i_dst || self.cells[i_dst].is_empty());

        self.cells.swap(i_src, i_dst);
        self.balls[id].square = dst;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_grid(f, self.width, &self.cells)
    }
}

/// 行優先のマス配列におけるインデックスを返す。
pub(crate) fn row_major(width: usize, sq: Square) -> usize {
    debug_assert!(sq.col() < width);
    sq.row() * width + sq.col()
}

/// マス配列を入力と同じ文字で 1 行ずつ書き出す。
pub(crate) fn fmt_grid(f: &mut fmt::Formatter, width: usize, cells: &[Cell]) -> fmt::Result {
    let rows = cells
        .chunks(width)
        .format_with("\n", |row, g| g(&row.iter().format("")));
    write!(f, "{rows}")
}
