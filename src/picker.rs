use crate::board::BallId;
use crate::rng::Xorshift128;

/// 各反復でビームサーチを開始するボールを選ぶ。
pub trait StartBallPicker {
    /// `ball_count > 0` のとき、`0..ball_count` の値を返す。
    fn pick(&mut self, iteration: usize, ball_count: usize) -> BallId;
}

/// ボールを順番に選ぶ。
#[derive(Clone, Copy, Debug, Default)]
pub struct Rotation;

impl StartBallPicker for Rotation {
    fn pick(&mut self, iteration: usize, ball_count: usize) -> BallId {
        iteration % ball_count
    }
}

/// ボールを乱数で選ぶ。
#[derive(Clone, Debug, Default)]
pub struct RandomPicker {
    rng: Xorshift128,
}

impl RandomPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xorshift128::new(seed),
        }
    }
}

impl StartBallPicker for RandomPicker {
    fn pick(&mut self, _iteration: usize, ball_count: usize) -> BallId {
        self.rng.gen_index(ball_count)
    }
}
