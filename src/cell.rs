use std::fmt;

use anyhow::bail;

/// ボールの色 (0..=9)。
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Color(u8);

impl Color {
    pub const NUM: usize = 10;

    pub fn new(inner: u8) -> Option<Self> {
        (usize::from(inner) < Self::NUM).then_some(Self(inner))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// マスの内容。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Cell {
    Wall,
    Empty,
    Ball(Color),
}

impl Cell {
    pub fn from_char(ch: char) -> anyhow::Result<Self> {
        let cell = match ch {
            '#' => Self::Wall,
            '.' => Self::Empty,
            '0'..='9' => Self::Ball(Color(ch as u8 - b'0')),
            _ => bail!("invalid cell char: {ch:?}"),
        };
        Ok(cell)
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Empty => '.',
            Self::Ball(color) => char::from(b'0' + color.0),
        }
    }

    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Ball(color) => Some(color),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color() {
        assert_eq!(Color::new(0).map(Color::index), Some(0));
        assert_eq!(Color::new(9).map(Color::index), Some(9));
        assert_eq!(Color::new(10), None);
    }

    #[test]
    fn test_cell_char() {
        for ch in "#.0123456789".chars() {
            assert_eq!(Cell::from_char(ch).unwrap().to_char(), ch);
        }
        assert!(Cell::from_char('x').is_err());
        assert!(Cell::from_char(' ').is_err());

        assert!(Cell::from_char('#').unwrap().is_wall());
        assert!(Cell::from_char('.').unwrap().is_empty());
        assert_eq!(Cell::from_char('7').unwrap().color(), Color::new(7));
    }
}
