use std::io::Read as _;

use anyhow::Context as _;
use clap::Parser;
use log::info;

use rolling_balls::*;

/// 標準入力から問題を 1 つ読み、転がし操作の列を標準出力に書き出す。
#[derive(Debug, Parser)]
struct Cli {
    /// ビーム幅 (省略時は盤面サイズから決める)。
    #[arg(long, value_parser = parse_int::parse::<usize>)]
    beam_width: Option<usize>,

    /// 先読みの深さ (省略時は盤面サイズから決める)。
    #[arg(long, value_parser = parse_int::parse::<usize>)]
    depth: Option<usize>,

    /// 1 層で動かす候補ボール数 (省略時は盤面サイズから決める)。
    #[arg(long, value_parser = parse_int::parse::<usize>)]
    ball_window: Option<usize>,

    /// 反復回数のボール数に対する倍率。
    #[arg(long, default_value_t = 20)]
    iteration_factor: usize,

    /// 色が一致したマスの報酬。
    #[arg(long, default_value_t = 100, allow_hyphen_values = true)]
    matched: Score,

    /// 色が一致しないマスの報酬。
    #[arg(long, default_value_t = 50, allow_hyphen_values = true)]
    mismatched: Score,

    /// この反復以降、色が一致しないマスの報酬を `late_mismatched` に切り替える。
    #[arg(long, requires = "late_mismatched")]
    switch_at: Option<usize>,

    #[arg(long, requires = "switch_at", allow_hyphen_values = true)]
    late_mismatched: Option<Score>,

    /// 現局面より良い局面が見つからない反復では手を打たない。
    #[arg(long)]
    require_improvement: bool,

    /// Zobrist テーブルのシード。
    #[arg(long, default_value_t = 0, value_parser = parse_int::parse::<u64>)]
    zobrist_seed: u64,

    /// 指定すると開始ボールを乱数で選ぶ (値はシード)。
    #[arg(long, value_parser = parse_int::parse::<u64>)]
    random_start: Option<u64>,
}

impl Cli {
    fn search_param(&self, area: usize) -> SearchParam {
        let mut param = SearchParam::for_area(area);
        if let Some(beam_width) = self.beam_width {
            param.beam_width = beam_width;
        }
        if let Some(depth) = self.depth {
            param.depth = depth;
        }
        if let Some(ball_window) = self.ball_window {
            param.ball_window = ball_window;
        }
        param.iteration_factor = self.iteration_factor;
        param.require_improvement = self.require_improvement;
        param
    }

    fn rewards(&self) -> RewardSchedule {
        let initial = RewardTable {
            matched: self.matched,
            mismatched: self.mismatched,
        };
        let switch = self.switch_at.zip(self.late_mismatched).map(|(at, mismatched)| {
            (
                at,
                RewardTable {
                    mismatched,
                    ..initial
                },
            )
        });

        RewardSchedule { initial, switch }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    let problem: Problem = input.parse()?;

    let solver = Solver::new(cli.search_param(problem.start.area()))
        .with_rewards(cli.rewards())
        .with_zobrist_seed(cli.zobrist_seed);

    let report = if let Some(seed) = cli.random_start {
        solver.solve(&problem, &mut RandomPicker::new(seed))
    } else {
        solver.solve(&problem, &mut Rotation)
    };

    info!(
        "Score: {} ({:.4})",
        report.final_score, report.normalized_score
    );
    println!("{}", report.rolls);

    Ok(())
}
