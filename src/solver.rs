use log::{debug, info};

use crate::beam_search::BeamSearch;
use crate::context::SearchContext;
use crate::field::FieldParam;
use crate::param::SearchParam;
use crate::picker::StartBallPicker;
use crate::problem::Problem;
use crate::roll::RollLog;
use crate::score::{RewardSchedule, Score};
use crate::zobrist::ZOBRIST_SEED_DEFAULT;

/// 求解結果。
#[derive(Clone, Debug, PartialEq)]
pub struct SolveReport {
    pub rolls: RollLog,

    /// 初期盤面のスコア (`RewardSchedule::initial` による)。
    pub initial_score: Score,

    /// 最終盤面のスコア (`RewardSchedule::initial` による)。
    pub final_score: Score,

    /// `final_score` を完全一致時のスコアで割った値。
    pub normalized_score: f64,

    /// ビームサーチが生成した子局面の総数。
    pub searched_nodes: u64,
}

/// 貪欲に 1 手ずつ確定させていくソルバー。
///
/// 各反復でビームサーチを呼び、返ってきた 1 手を盤面に適用する。
/// 一度確定した手は取り消さない。
#[derive(Clone, Debug)]
pub struct Solver {
    param: SearchParam,
    field_param: FieldParam,
    rewards: RewardSchedule,
    zobrist_seed: u64,
}

impl Solver {
    pub fn new(param: SearchParam) -> Self {
        Self {
            param,
            field_param: FieldParam::default(),
            rewards: RewardSchedule::default(),
            zobrist_seed: ZOBRIST_SEED_DEFAULT,
        }
    }

    /// 盤面の面積に応じたパラメータでソルバーを作る。
    pub fn for_problem(problem: &Problem) -> Self {
        Self::new(SearchParam::for_area(problem.start.area()))
    }

    pub fn param(&self) -> &SearchParam {
        &self.param
    }

    pub fn with_field_param(mut self, field_param: FieldParam) -> Self {
        self.field_param = field_param;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardSchedule) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_zobrist_seed(mut self, seed: u64) -> Self {
        self.zobrist_seed = seed;
        self
    }

    /// 問題を解き、転がし操作の列を返す。
    ///
    /// 反復回数は `ボール数 * iteration_factor`。探索が手を返さなかった反復は単に飛ばす。
    pub fn solve(&self, problem: &Problem, picker: &mut impl StartBallPicker) -> SolveReport {
        let mut ctx = SearchContext::new(
            problem,
            &self.field_param,
            self.rewards.initial,
            self.zobrist_seed,
        );
        let mut search = BeamSearch::new(self.param);

        let ball_count = ctx.board().ball_count();
        let iterations = ball_count * self.param.iteration_factor;
        let initial_score = self.rewards.initial.score(ctx.board(), ctx.target());

        info!(
            "Solve: {}x{} balls={ball_count} iterations={iterations} param={:?}",
            ctx.board().height(),
            ctx.board().width(),
            self.param
        );
        debug!("Start:\n{}", ctx.board());
        debug!("Target:\n{}", ctx.target());

        let mut rolls = RollLog::new();
        for iteration in 0..iterations {
            let rewards = self.rewards.table_at(iteration);
            if rewards != ctx.rewards() {
                info!("Iteration {iteration}: switch rewards to {rewards:?}");
                ctx.set_rewards(rewards);
            }

            let start_ball = picker.pick(iteration, ball_count);
            let roll = match search.search(&ctx, start_ball) {
                Ok(roll) => roll,
                Err(reason) => {
                    debug!("Iteration {iteration}: no move {reason:?} (start_ball={start_ball})");
                    continue;
                }
            };

            let dst = ctx.apply(roll);
            debug!(
                "Iteration {iteration}: ball {} ({}) -> ({dst}) score={}",
                roll.ball,
                roll.from,
                ctx.score()
            );
            rolls.push(roll);
        }

        let final_score = self.rewards.initial.score(ctx.board(), ctx.target());
        let normalized_score = self.rewards.initial.normalize(final_score, ctx.target());

        info!(
            "Done: rolls={} score={initial_score}->{final_score} ({normalized_score:.4}) searched_nodes={}",
            rolls.len(),
            search.searched_nodes()
        );
        debug!("Final:\n{}", ctx.board());

        SolveReport {
            rolls,
            initial_score,
            final_score,
            normalized_score,
            searched_nodes: search.searched_nodes(),
        }
    }
}
