//! 入力テキストの読み込み。
//!
//! 形式:
//!
//! ```text
//! H
//! (初期盤面 H 行)
//! H
//! (目標盤面 H 行)
//! ```
//!
//! 各行は `#` (壁), `.` (空), `0`-`9` (その色のボール) からなる。

use std::str::FromStr;

use anyhow::{bail, ensure, Context as _};

use crate::board::Board;
use crate::cell::Cell;
use crate::square::{Square, MAX_HEIGHT, MAX_WIDTH};
use crate::target::Target;

/// 問題 (初期盤面と目標盤面の組)。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Problem {
    pub start: Board,
    pub target: Target,
}

impl Problem {
    /// 初期盤面と目標盤面の整合性を検査して問題を作る。
    pub fn new(start: Board, target: Target) -> anyhow::Result<Self> {
        ensure!(
            (start.height(), start.width()) == (target.height(), target.width()),
            "dimension mismatch: start is {}x{}, target is {}x{}",
            start.height(),
            start.width(),
            target.height(),
            target.width()
        );

        for sq in start.squares() {
            ensure!(
                start.get(sq).is_wall() == target.get(sq).is_wall(),
                "wall layout mismatch at ({sq})"
            );
        }

        Ok(Self { start, target })
    }
}

impl FromStr for Problem {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();

        let start = read_grid(&mut tokens).context("failed to read start grid")?;
        let target = read_grid(&mut tokens).context("failed to read target grid")?;
        ensure!(tokens.next().is_none(), "trailing garbage after target grid");

        let (h, w, cells) = start;
        let start = Board::new(h, w, cells);
        let (h, w, cells) = target;
        let target = Target::new(h, w, cells);

        Self::new(start, target)
    }
}

/// 行数に続けてその行数分の盤面行を読む。
fn read_grid<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
) -> anyhow::Result<(usize, usize, Vec<Cell>)> {
    let h_str = tokens.next().context("missing row count")?;
    let h: usize =
        parse_int::parse(h_str).with_context(|| format!("invalid row count: {h_str:?}"))?;

    let rows: Vec<&str> = tokens.take(h).collect();
    ensure!(rows.len() == h, "expected {h} rows, got {}", rows.len());

    parse_grid(&rows)
}

/// 盤面行の列を (高さ, 幅, 行優先のマス配列) に変換する。
fn parse_grid(rows: &[&str]) -> anyhow::Result<(usize, usize, Vec<Cell>)> {
    let h = rows.len();
    ensure!(h > 0, "grid must have at least one row");
    ensure!(h <= MAX_HEIGHT, "too many rows: {h} (max {MAX_HEIGHT})");

    let w = rows[0].chars().count();
    ensure!(w > 0, "grid must have at least one column");
    ensure!(w <= MAX_WIDTH, "too many columns: {w} (max {MAX_WIDTH})");

    let mut cells = Vec::with_capacity(h * w);
    for (row, line) in rows.iter().enumerate() {
        let len = line.chars().count();
        if len != w {
            bail!("row {row} has {len} columns (expected {w})");
        }
        for (col, ch) in line.chars().enumerate() {
            let cell = Cell::from_char(ch)
                .with_context(|| format!("at ({})", Square::new(row, col)))?;
            cells.push(cell);
        }
    }

    Ok((h, w, cells))
}

/// 改行区切りの盤面テキストから盤面を作る (行数の行は含まない)。
pub fn parse_board(s: &str) -> anyhow::Result<Board> {
    let rows: Vec<&str> = s.split_whitespace().collect();
    let (h, w, cells) = parse_grid(&rows)?;
    Ok(Board::new(h, w, cells))
}

/// 改行区切りの盤面テキストから目標盤面を作る (行数の行は含まない)。
pub fn parse_target(s: &str) -> anyhow::Result<Target> {
    let rows: Vec<&str> = s.split_whitespace().collect();
    let (h, w, cells) = parse_grid(&rows)?;
    Ok(Target::new(h, w, cells))
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn test_parse_problem() {
        let problem: Problem = indoc! {"
            3
            1.2
            ###
            ...
            3
            ..1
            ###
            2..
        "}
        .parse()
        .unwrap();

        assert_eq!(problem.start.to_string(), "1.2\n###\n...");
        assert_eq!(problem.target.to_string(), "..1\n###\n2..");
        assert_eq!(problem.start.ball_count(), 2);
        assert_eq!(problem.target.goal_count(), 2);
    }

    #[test]
    fn test_parse_problem_errors() {
        // 行が足りない。
        assert!("3\n1.2\n###\n".parse::<Problem>().is_err());
        // 行数が数値でない。
        assert!("x\n1.2\n1\n2.1\n".parse::<Problem>().is_err());
        // 行の長さが揃っていない。
        assert!("2\n1.2\n##\n2\n...\n...\n".parse::<Problem>().is_err());
        // 不正な文字。
        assert!("1\n1x2\n1\n...\n".parse::<Problem>().is_err());
        // サイズが一致しない。
        assert!("1\n1.2\n1\n1.\n".parse::<Problem>().is_err());
        // 壁の配置が一致しない。
        assert!("1\n1#2\n1\n1.2\n".parse::<Problem>().is_err());
        // 余計な入力がある。
        assert!("1\n1.2\n1\n1.2\n1\n".parse::<Problem>().is_err());
    }

    #[test]
    fn test_parse_too_large() {
        let row = ".".repeat(MAX_WIDTH + 1);
        assert!(parse_board(&row).is_err());

        let rows = vec!["."; MAX_HEIGHT + 1].join("\n");
        assert!(parse_board(&rows).is_err());

        let row = ".".repeat(MAX_WIDTH);
        let rows = vec![row.as_str(); MAX_HEIGHT].join("\n");
        let board = parse_board(&rows).unwrap();
        assert_eq!(board.area(), MAX_HEIGHT * MAX_WIDTH);
    }
}
