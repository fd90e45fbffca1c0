//! 目標盤面との一致スコア。

use crate::board::Board;
use crate::cell::{Cell, Color};
use crate::square::Square;
use crate::target::Target;

pub type Score = i32;

/// ボールと目標の色の組に対する報酬。
///
/// ボールがあり、かつ目標にも色が指定されているマスだけが得点対象となる。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RewardTable {
    /// 色が一致した場合の報酬。
    pub matched: Score,

    /// 色が一致しない場合の報酬 (負でもよい)。
    pub mismatched: Score,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            matched: 100,
            mismatched: 50,
        }
    }
}

impl RewardTable {
    /// 色 `color` のボールがマス `sq` にあるときの寄与。
    pub fn point(&self, target: &Target, sq: Square, color: Color) -> Score {
        match target.get(sq) {
            Cell::Ball(goal) if goal == color => self.matched,
            Cell::Ball(_) => self.mismatched,
            _ => 0,
        }
    }

    /// 盤面全体のスコアを計算する。
    pub fn score(&self, board: &Board, target: &Target) -> Score {
        board
            .balls()
            .iter()
            .map(|ball| self.point(target, ball.square, ball.color))
            .sum()
    }

    /// 色 `color` のボールが `src` から `dst` へ移ったときのスコアを返す。
    pub fn update(
        &self,
        score: Score,
        target: &Target,
        color: Color,
        src: Square,
        dst: Square,
    ) -> Score {
        score - self.point(target, src, color) + self.point(target, dst, color)
    }

    /// 全ボールが正しい位置にある場合のスコア。
    pub fn perfect(&self, target: &Target) -> Score {
        self.matched * target.goal_count() as Score
    }

    /// スコアを完全一致時に対する比率 (通常 0.0..=1.0) に正規化する。
    pub fn normalize(&self, score: Score, target: &Target) -> f64 {
        let perfect = self.perfect(target);
        if perfect == 0 {
            return 0.0;
        }
        f64::from(score) / f64::from(perfect)
    }
}

/// 探索の途中で報酬テーブルを切り替えるスケジュール。
///
/// `switch` が `Some((n, table))` ならば、反復 `n` 以降は `table` を使う。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RewardSchedule {
    pub initial: RewardTable,
    pub switch: Option<(usize, RewardTable)>,
}

impl RewardSchedule {
    pub fn fixed(table: RewardTable) -> Self {
        Self {
            initial: table,
            switch: None,
        }
    }

    /// 反復 `iteration` で使う報酬テーブル。
    pub fn table_at(&self, iteration: usize) -> RewardTable {
        match self.switch {
            Some((start, table)) if iteration >= start => table,
            _ => self.initial,
        }
    }
}
