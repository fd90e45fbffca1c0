use std::fmt;

/// 転がす方向。
///
/// 出力形式における方向番号と判別子が一致する。
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Direction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl Direction {
    pub const NUM: usize = 4;

    pub const ALL: [Self; Self::NUM] = [Self::Left, Self::Down, Self::Right, Self::Up];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// 逆方向を返す。
    pub const fn reverse(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
        }
    }

    /// (行の変位, 列の変位)。
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Left => (0, -1),
            Self::Down => (1, 0),
            Self::Right => (0, 1),
            Self::Up => (-1, 0),
        }
    }

    /// 進行方向に垂直な 2 方向を返す。
    pub const fn laterals(self) -> [Self; 2] {
        match self {
            Self::Left | Self::Right => [Self::Up, Self::Down],
            Self::Down | Self::Up => [Self::Left, Self::Right],
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use itertools::assert_equal;

    use super::*;

    #[test]
    fn test_index() {
        assert_equal(Direction::ALL.iter().map(|dir| dir.index()), 0..4);
    }

    #[test]
    fn test_reverse() {
        for dir in Direction::ALL {
            assert_ne!(dir.reverse(), dir);
            assert_eq!(dir.reverse().reverse(), dir);

            let (dr, dc) = dir.delta();
            assert_eq!(dir.reverse().delta(), (-dr, -dc));
        }
    }

    #[test]
    fn test_laterals() {
        for dir in Direction::ALL {
            for lat in dir.laterals() {
                assert_ne!(lat, dir);
                assert_ne!(lat, dir.reverse());
            }
        }
    }
}
