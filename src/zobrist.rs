//! 盤面の Zobrist ハッシュ。
//!
//! (マス, 色) の組ごとに独立な乱数を割り当て、ボールのある組について XOR をとる。
//! 壁と空マスは寄与しない。

use crate::board::Board;
use crate::cell::Color;
use crate::rng::Xorshift128;
use crate::square::Square;

/// 乱数シードの既定値。
pub const ZOBRIST_SEED_DEFAULT: u64 = 0;

/// (マス, 色) ごとの乱数表。最大サイズの盤面全体をカバーする。
#[derive(Clone, Debug)]
pub struct ZobristTable {
    keys: Vec<u64>,
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new(ZOBRIST_SEED_DEFAULT)
    }
}

impl ZobristTable {
    pub fn new(seed: u64) -> Self {
        let mut rng = Xorshift128::new(seed);
        let keys = (0..Square::NUM * Color::NUM)
            .map(|_| rng.next_u64())
            .collect();

        Self { keys }
    }

    pub fn key(&self, sq: Square, color: Color) -> u64 {
        self.keys[Color::NUM * sq.index() + color.index()]
    }

    /// 盤面全体のハッシュ値を計算する。
    pub fn hash_board(&self, board: &Board) -> u64 {
        board
            .balls()
            .iter()
            .fold(0, |acc, ball| acc ^ self.key(ball.square, ball.color))
    }

    /// 色 `color` のボールが `src` から `dst` へ移ったときのハッシュ値を返す。
    ///
    /// XOR は自身が逆元なので、同じ引数でもう一度呼べば元に戻る。
    pub fn update(&self, hash: u64, color: Color, src: Square, dst: Square) -> u64 {
        hash ^ self.key(src, color) ^ self.key(dst, color)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand::prelude::*;

    use crate::direction::Direction;
    use crate::problem::parse_board;

    use super::*;

    #[test]
    fn test_hash_ignores_walls_and_empties() {
        let table = ZobristTable::default();

        let a = parse_board("1.#").unwrap();
        let b = parse_board("1..").unwrap();
        assert_eq!(table.hash_board(&a), table.hash_board(&b));

        let c = parse_board("2..").unwrap();
        assert_ne!(table.hash_board(&a), table.hash_board(&c));

        let empty = parse_board("#..").unwrap();
        assert_eq!(table.hash_board(&empty), 0);
    }

    #[test]
    fn test_update_matches_recompute() {
        let table = ZobristTable::new(0xC0FFEE);
        let mut board = parse_board(indoc! {"
            1..#..2
            .3.....
            ..#.4..
            5......
            ...#..0
        "})
        .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let mut hash = table.hash_board(&board);

        for _ in 0..500 {
            let id = rng.gen_range(0..board.ball_count());
            let dir = Direction::ALL[rng.gen_range(0..Direction::NUM)];
            let ball = board.ball(id);
            let dst = board.roll(id, dir);

            hash = table.update(hash, ball.color, ball.square, dst);
            assert_eq!(hash, table.hash_board(&board));
        }
    }

    #[test]
    fn test_update_is_involution() {
        let table = ZobristTable::default();
        let color = Color::new(3).unwrap();
        let src = Square::new(1, 2);
        let dst = Square::new(4, 2);

        let h0 = 0x0123_4567_89AB_CDEF;
        let h1 = table.update(h0, color, src, dst);
        assert_ne!(h0, h1);
        assert_eq!(table.update(h1, color, src, dst), h0);
        // 逆向きの移動でも戻る。
        assert_eq!(table.update(h1, color, dst, src), h0);
    }

    #[test]
    fn test_same_seed_same_table() {
        let a = ZobristTable::new(1);
        let b = ZobristTable::new(1);
        let c = ZobristTable::new(2);

        let sq = Square::new(5, 5);
        let color = Color::new(0).unwrap();
        assert_eq!(a.key(sq, color), b.key(sq, color));
        assert_ne!(a.key(sq, color), c.key(sq, color));
    }
}
