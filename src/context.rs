use crate::board::{Ball, BallId, Board};
use crate::field::{EvalField, FieldParam, Potential};
use crate::problem::Problem;
use crate::roll::Roll;
use crate::score::{RewardTable, Score};
use crate::square::Square;
use crate::target::Target;
use crate::zobrist::ZobristTable;

/// 求解 1 回分の状態。現在の盤面と、探索中は不変な目標盤面・ポテンシャル場・Zobrist 表を持つ。
///
/// ビームサーチは `&SearchContext` だけを受け取るので、現在の盤面を変更しない。
/// 盤面を進めるのは `apply` だけ。
#[derive(Clone, Debug)]
pub struct SearchContext {
    board: Board,
    target: Target,
    field: EvalField,
    zobrist: ZobristTable,
    rewards: RewardTable,
}

impl SearchContext {
    pub fn new(
        problem: &Problem,
        field_param: &FieldParam,
        rewards: RewardTable,
        zobrist_seed: u64,
    ) -> Self {
        let field = EvalField::build(&problem.start, &problem.target, field_param);

        Self {
            board: problem.start.clone(),
            target: problem.target.clone(),
            field,
            zobrist: ZobristTable::new(zobrist_seed),
            rewards,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn field(&self) -> &EvalField {
        &self.field
    }

    pub fn rewards(&self) -> RewardTable {
        self.rewards
    }

    /// 報酬テーブルを差し替える (探索フェーズの切り替え用)。
    pub fn set_rewards(&mut self, rewards: RewardTable) {
        self.rewards = rewards;
    }

    /// 現在の盤面のスコア。
    pub fn score(&self) -> Score {
        self.rewards.score(&self.board, &self.target)
    }

    /// 転がし操作を現在の盤面に適用し、停止マスを返す。
    pub fn apply(&mut self, roll: Roll) -> Square {
        debug_assert_eq!(self.board.ball(roll.ball).square, roll.from);
        self.board.roll(roll.ball, roll.dir)
    }
}

/// 探索ノードが持つ局面。盤面のスナップショットと、差分更新されるハッシュ値・スコア・評価値の組。
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    hash: u64,
    score: Score,
    eval: Potential,
}

impl Position {
    /// 盤面全体を走査して局面を作る。探索 1 回につきルートでのみ使う。
    pub fn new(ctx: &SearchContext, board: Board) -> Self {
        let hash = ctx.zobrist.hash_board(&board);
        let score = ctx.rewards.score(&board, &ctx.target);
        let eval = ctx.field.evaluate(&board);

        Self {
            board,
            hash,
            score,
            eval,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn eval(&self) -> Potential {
        self.eval
    }

    /// 探索の順位付けに使う値。
    pub fn rank(&self) -> i64 {
        rank_key(self.score, self.eval)
    }

    /// ボール `id` を `dst` へ移し、ハッシュ値・スコア・評価値を差分更新する。
    ///
    /// 元の位置を `dst` として再度呼べば取り消しになる。
    pub fn move_ball(&mut self, ctx: &SearchContext, id: BallId, dst: Square) {
        let Ball { square: src, color } = self.board.ball(id);

        self.board.move_ball(id, dst);
        self.hash = ctx.zobrist.update(self.hash, color, src, dst);
        self.score = ctx.rewards.update(self.score, &ctx.target, color, src, dst);
        self.eval = ctx.field.update(self.eval, color, src, dst);
    }
}

/// 探索の順位付けキー (スコア + 評価値)。大きいほど良い。
pub fn rank_key(score: Score, eval: Potential) -> i64 {
    i64::from(score) + i64::from(eval)
}
