//! 評価用ポテンシャル場。
//!
//! 各 (マス, 色) について「その色のボールがそこにあると嬉しい度合い」を前計算する。
//! 目標マスそのものに大きな値を、その周辺と、壁に沿って目標マスへ転がり込める経路に
//! 小さな値を与える。

use std::collections::{HashSet, VecDeque};

use crate::board::{row_major, Board};
use crate::cell::Color;
use crate::direction::Direction;
use crate::square::Square;
use crate::target::Target;

pub type Potential = i32;

/// ポテンシャル場の構築パラメータ。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldParam {
    /// 目標マス自身に与える値。
    pub goal_bonus: Potential,

    /// 目標マスから距離 `i + 1` の (壁でない) マスに与える値。
    pub near_bonuses: Vec<Potential>,

    /// 滑走経路上のマスに与える値 (深さ 0 のとき)。
    pub slide_bonus: Potential,

    /// 滑走の深さが 1 増えるごとに `slide_bonus` から引く値。
    pub slide_decay: Potential,

    /// 滑走の折り返し回数の上限。
    pub slide_depth_max: usize,

    /// 滑走経路上で、側面の片側だけが壁に接しているマスへの追加値。
    pub funnel_bonus: Potential,
}

impl Default for FieldParam {
    fn default() -> Self {
        Self {
            goal_bonus: 100,
            near_bonuses: vec![5, 2],
            slide_bonus: 20,
            slide_decay: 4,
            slide_depth_max: 4,
            funnel_bonus: 2,
        }
    }
}

/// (マス, 色) → ポテンシャル の表。構築後は変更されない。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvalField {
    width: usize,

    /// `potentials[color][row_major(sq)]`
    potentials: Vec<Vec<Potential>>,
}

impl EvalField {
    /// 目標盤面と、盤面の壁配置からポテンシャル場を作る。
    ///
    /// `board` のボール配置は使わない (壁だけを見る)。
    pub fn build(board: &Board, target: &Target, param: &FieldParam) -> Self {
        let height = board.height();
        let width = board.width();
        let mut field = Self {
            width,
            potentials: vec![vec![0; height * width]; Color::NUM],
        };

        for (goal, color) in target.goals() {
            field.add(goal, color, param.goal_bonus);
            field.spread_near(board, goal, color, &param.near_bonuses);

            for dir in Direction::ALL {
                // dir 方向が塞がっていれば、逆側から dir 方向に転がってきたボールは goal で止まる。
                if board.is_blocked_by_wall(goal, dir) {
                    field.spread_slide(board, goal, color, dir.reverse(), param);
                }
            }
        }

        field
    }

    pub fn potential(&self, sq: Square, color: Color) -> Potential {
        self.potentials[color.index()][row_major(self.width, sq)]
    }

    fn add(&mut self, sq: Square, color: Color, value: Potential) {
        self.potentials[color.index()][row_major(self.width, sq)] += value;
    }

    /// 盤面全体の評価値 (各ボールの位置のポテンシャルの和) を計算する。
    pub fn evaluate(&self, board: &Board) -> Potential {
        board
            .balls()
            .iter()
            .map(|ball| self.potential(ball.square, ball.color))
            .sum()
    }

    /// 色 `color` のボールが `src` から `dst` へ移ったときの評価値を返す。
    pub fn update(&self, eval: Potential, color: Color, src: Square, dst: Square) -> Potential {
        eval - self.potential(src, color) + self.potential(dst, color)
    }

    /// `goal` から壁以外のマスを BFS し、距離に応じた値を加える。
    fn spread_near(&mut self, board: &Board, goal: Square, color: Color, bonuses: &[Potential]) {
        let mut visited = HashSet::from([goal]);
        let mut frontier = vec![goal];

        for &bonus in bonuses {
            let mut next = vec![];
            for sq in frontier {
                for dir in Direction::ALL {
                    let Some(nxt) = board.neighbor(sq, dir) else {
                        continue;
                    };
                    if board.get(nxt).is_wall() || !visited.insert(nxt) {
                        continue;
                    }
                    self.add(nxt, color, bonus);
                    next.push(nxt);
                }
            }
            frontier = next;
        }
    }

    /// `goal` から `dir` 方向への滑走経路を辿り、経路上のマスに値を加える。
    ///
    /// 停止マスの側面が壁ならば、そこへ横から転がり込む経路も辿る。
    /// 各作業項目は深さを持ち、深さ `slide_depth_max` を超える項目は積まない。
    /// 同じ (マス, 方向) は一度しか処理しないので必ず停止する。
    fn spread_slide(
        &mut self,
        board: &Board,
        goal: Square,
        color: Color,
        dir: Direction,
        param: &FieldParam,
    ) {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([SlideItem {
            start: goal,
            dir,
            depth: 0,
        }]);

        while let Some(item) = queue.pop_front() {
            if !visited.insert((item.start, item.dir)) {
                continue;
            }
            let value = param.slide_bonus - param.slide_decay * item.depth as Potential;
            if value <= 0 {
                continue;
            }

            let lats = item.dir.laterals();
            let mut cur = item.start;
            while let Some(nxt) = board.neighbor(cur, item.dir) {
                if board.get(nxt).is_wall() {
                    break;
                }
                cur = nxt;

                let mut bonus = value;
                if board.is_blocked_by_wall(cur, lats[0]) != board.is_blocked_by_wall(cur, lats[1])
                {
                    bonus += param.funnel_bonus;
                }
                if cur != goal {
                    self.add(cur, color, bonus);
                }
            }

            // 1 マスも進めない。
            if cur == item.start {
                continue;
            }
            if item.depth >= param.slide_depth_max {
                continue;
            }

            // lat 方向に転がって cur で止まれるなら、その逆側から来る経路も辿る。
            for lat in lats {
                if board.is_blocked_by_wall(cur, lat) {
                    queue.push_back(SlideItem {
                        start: cur,
                        dir: lat.reverse(),
                        depth: item.depth + 1,
                    });
                }
            }
        }
    }
}

/// 滑走シミュレーションの作業項目。
#[derive(Clone, Copy, Debug)]
struct SlideItem {
    start: Square,
    dir: Direction,
    depth: usize,
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand::prelude::*;

    use crate::problem::{parse_board, parse_target};

    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col)
    }

    fn color(c: u8) -> Color {
        Color::new(c).unwrap()
    }

    #[test]
    fn test_goal_and_near() {
        let board = parse_board(indoc! {"
            .....
            .....
            .....
            .....
            .....
        "})
        .unwrap();
        let target = parse_target(indoc! {"
            .....
            .....
            ..1..
            .....
            .....
        "})
        .unwrap();
        let param = FieldParam {
            slide_bonus: 0,
            funnel_bonus: 0,
            ..FieldParam::default()
        };
        let field = EvalField::build(&board, &target, &param);

        assert_eq!(field.potential(sq(2, 2), color(1)), 100);
        assert_eq!(field.potential(sq(1, 2), color(1)), 5);
        assert_eq!(field.potential(sq(2, 3), color(1)), 5);
        assert_eq!(field.potential(sq(1, 1), color(1)), 2);
        assert_eq!(field.potential(sq(0, 2), color(1)), 2);
        assert_eq!(field.potential(sq(0, 0), color(1)), 0);

        // 他の色には影響しない。
        assert_eq!(field.potential(sq(2, 2), color(2)), 0);
    }

    #[test]
    fn test_near_does_not_cross_walls() {
        let board = parse_board(indoc! {"
            ...
            .#.
            ...
        "})
        .unwrap();
        let target = parse_target(indoc! {"
            1..
            .#.
            ...
        "})
        .unwrap();
        let param = FieldParam {
            near_bonuses: vec![5],
            slide_bonus: 0,
            ..FieldParam::default()
        };
        let field = EvalField::build(&board, &target, &param);

        assert_eq!(field.potential(sq(1, 1), color(1)), 0);
        assert_eq!(field.potential(sq(0, 1), color(1)), 5);
        assert_eq!(field.potential(sq(1, 0), color(1)), 5);
    }

    #[test]
    fn test_slide_corridor() {
        // 目標 (0,0) は左と上が盤端。
        // 右方向・下方向の直線上にあるボールは 1 回転がせば目標に届く。
        let board = parse_board(indoc! {"
            ....
            .###
            .###
        "})
        .unwrap();
        let target = parse_target(indoc! {"
            1...
            .###
            .###
        "})
        .unwrap();
        let param = FieldParam {
            goal_bonus: 0,
            near_bonuses: vec![],
            slide_bonus: 20,
            slide_decay: 4,
            slide_depth_max: 0,
            funnel_bonus: 0,
        };
        let field = EvalField::build(&board, &target, &param);

        for col in 1..4 {
            assert_eq!(field.potential(sq(0, col), color(1)), 20);
        }
        for row in 1..3 {
            assert_eq!(field.potential(sq(row, 0), color(1)), 20);
        }
        // 目標マス自身には滑走の値は入らない。
        assert_eq!(field.potential(sq(0, 0), color(1)), 0);
    }

    #[test]
    fn test_slide_bounce() {
        // 目標 (2,0): 下と左が盤端なので、上方向に滑走経路が伸びる。
        // 上端 (0,0) で止まり、そこは左が盤端なので右から転がり込む経路 (深さ 1) も辿る。
        let board = parse_board(indoc! {"
            ...
            .##
            .##
        "})
        .unwrap();
        let target = parse_target(indoc! {"
            ...
            .##
            1##
        "})
        .unwrap();
        let param = FieldParam {
            goal_bonus: 0,
            near_bonuses: vec![],
            slide_bonus: 20,
            slide_decay: 4,
            slide_depth_max: 1,
            funnel_bonus: 0,
        };
        let field = EvalField::build(&board, &target, &param);

        assert_eq!(field.potential(sq(1, 0), color(1)), 20);
        assert_eq!(field.potential(sq(0, 0), color(1)), 20);
        assert_eq!(field.potential(sq(0, 1), color(1)), 16);
        assert_eq!(field.potential(sq(0, 2), color(1)), 16);
    }

    #[test]
    fn test_slide_funnel() {
        let board = parse_board(indoc! {"
            ....
            ####
        "})
        .unwrap();
        let target = parse_target(indoc! {"
            1...
            ####
        "})
        .unwrap();
        let param = FieldParam {
            goal_bonus: 0,
            near_bonuses: vec![],
            slide_bonus: 20,
            slide_decay: 4,
            slide_depth_max: 0,
            funnel_bonus: 3,
        };
        let field = EvalField::build(&board, &target, &param);

        // 上は盤端、下は壁なので両側塞がり: 追加値なし。
        assert_eq!(field.potential(sq(0, 1), color(1)), 20);

        let board = parse_board(indoc! {"
            ....
            ....
        "})
        .unwrap();
        let target = parse_target(indoc! {"
            1...
            ....
        "})
        .unwrap();
        let field = EvalField::build(&board, &target, &param);

        // 上だけ塞がっている: 追加値あり。
        assert_eq!(field.potential(sq(0, 1), color(1)), 23);
    }

    #[test]
    fn test_slide_terminates_on_open_board() {
        let board = parse_board(&vec!["..........".to_owned(); 10].join("\n")).unwrap();
        let target = parse_target(indoc! {"
            0.........
            ..........
            ..........
            ..........
            ....9.....
            ..........
            ..........
            ..........
            ..........
            .........5
        "})
        .unwrap();
        let param = FieldParam {
            slide_depth_max: 100,
            slide_decay: 0,
            ..FieldParam::default()
        };
        let field = EvalField::build(&board, &target, &param);

        // 盤端の目標は周辺に値を持つ。中央の目標は滑走経路を持たない。
        assert!(field.potential(sq(0, 5), color(0)) > 0);
        assert!(field.potential(sq(5, 9), color(5)) > 0);
        assert_eq!(field.potential(sq(4, 0), color(9)), 0);
    }

    #[test]
    fn test_update_matches_recompute() {
        let mut board = parse_board(indoc! {"
            1..#..2
            .3.....
            ..#.4..
            5......
            ...#..1
        "})
        .unwrap();
        let target = parse_target(indoc! {"
            ..1#...
            ......2
            ..#....
            .3..5..
            4..#1..
        "})
        .unwrap();
        let field = EvalField::build(&board, &target, &FieldParam::default());

        let mut rng = StdRng::seed_from_u64(3);
        let mut eval = field.evaluate(&board);

        for _ in 0..500 {
            let id = rng.gen_range(0..board.ball_count());
            let dir = Direction::ALL[rng.gen_range(0..Direction::NUM)];
            let ball = board.ball(id);
            let dst = board.roll(id, dir);

            eval = field.update(eval, ball.color, ball.square, dst);
            assert_eq!(eval, field.evaluate(&board));
        }
    }
}
