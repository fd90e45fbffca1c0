use std::fmt;

use crate::board::BallId;
use crate::direction::Direction;
use crate::square::Square;

/// 1 回の転がし操作。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Roll {
    pub ball: BallId,

    /// 転がす前のボールの位置。
    pub from: Square,

    pub dir: Direction,
}

impl fmt::Display for Roll {
    /// 出力形式 `row col direction` で書き出す。
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.from, self.dir)
    }
}

/// 転がし操作の履歴。
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RollLog(Vec<Roll>);

impl RollLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, roll: Roll) {
        self.0.push(roll);
    }

    pub fn as_slice(&self) -> &[Roll] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a RollLog {
    type Item = &'a Roll;
    type IntoIter = std::slice::Iter<'a, Roll>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Roll> for RollLog {
    fn from_iter<T: IntoIterator<Item = Roll>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RollLog {
    /// 1 行目に操作数、以降 1 行に 1 操作ずつ書き出す。
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.len())?;
        for roll in &self.0 {
            write!(f, "\n{roll}")?;
        }
        Ok(())
    }
}
