use std::io::Read as _;

use anyhow::Context as _;
use clap::Parser;
use itertools::Itertools as _;
use log::info;

use rolling_balls::*;

/// 標準入力から空行区切りで複数の問題を読み、それぞれを解いてスコアを集計する。
#[derive(Debug, Parser)]
struct Cli {
    /// ビーム幅 (省略時は盤面サイズから決める)。
    #[arg(long, value_parser = parse_int::parse::<usize>)]
    beam_width: Option<usize>,

    /// 先読みの深さ (省略時は盤面サイズから決める)。
    #[arg(long, value_parser = parse_int::parse::<usize>)]
    depth: Option<usize>,

    #[arg(long, default_value_t = 0, value_parser = parse_int::parse::<u64>)]
    zobrist_seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let cli = Cli::parse();

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let mut sum = 0.0;
    let mut count = 0u32;
    for (i, chunk) in split_problems(&input).iter().enumerate() {
        let problem: Problem = chunk
            .parse()
            .with_context(|| format!("invalid problem #{i}"))?;

        let mut param = SearchParam::for_area(problem.start.area());
        if let Some(beam_width) = cli.beam_width {
            param.beam_width = beam_width;
        }
        if let Some(depth) = cli.depth {
            param.depth = depth;
        }

        let report = Solver::new(param)
            .with_zobrist_seed(cli.zobrist_seed)
            .solve(&problem, &mut Rotation);

        info!(
            "#{i}: {}x{} balls={} rolls={} nodes={}",
            problem.start.height(),
            problem.start.width(),
            problem.start.ball_count(),
            report.rolls.len(),
            report.searched_nodes
        );
        println!("{i}\t{}\t{:.4}", report.final_score, report.normalized_score);

        sum += report.normalized_score;
        count += 1;
    }

    if count > 0 {
        println!("mean\t{:.4}", sum / f64::from(count));
    }

    Ok(())
}

/// 空行 (空白のみの行を含む) で区切られた問題を切り出す。
fn split_problems(input: &str) -> Vec<String> {
    input
        .lines()
        .group_by(|line| line.trim().is_empty())
        .into_iter()
        .filter(|(blank, _)| !blank)
        .map(|(_, mut lines)| lines.join("\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_problems() {
        let input = "1\r\n1.\r\n1\r\n.1\r\n\r\n1\r\n.2\r\n1\r\n2.\r\n";
        let chunks = split_problems(input);
        assert_eq!(chunks, ["1\n1.\n1\n.1", "1\n.2\n1\n2."]);

        let problems: Vec<Problem> = chunks.iter().map(|chunk| chunk.parse().unwrap()).collect();
        assert_eq!(problems.len(), 2);

        assert!(split_problems("\n  \n").is_empty());
    }
}
