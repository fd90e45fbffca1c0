use crate::field::Potential;

/// ビームサーチのパラメータ。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchParam {
    /// ビーム幅。
    pub beam_width: usize,

    /// 先読みの深さ。
    pub depth: usize,

    /// 1 層で動かす候補ボール数 (開始ボールからの連番)。
    pub ball_window: usize,

    /// 反復回数のボール数に対する倍率。
    pub iteration_factor: usize,

    /// 停止マスのポテンシャルがこれ未満となる転がしは候補にしない。
    pub min_potential: Option<Potential>,

    /// `true` ならば、現局面より評価の高い局面が見つからないとき手を返さない。
    ///
    /// 既定は `false` で、生成された候補の中の最良手を (現局面より悪くても) 返す。
    /// 目標と一致したボールを動かしては戻す振動を避けたいときに有効にする。
    pub require_improvement: bool,
}

impl Default for SearchParam {
    fn default() -> Self {
        Self {
            beam_width: 100,
            depth: 2,
            ball_window: 7,
            iteration_factor: 20,
            min_potential: None,
            require_improvement: false,
        }
    }
}

impl SearchParam {
    /// 盤面の面積に応じた既定パラメータを返す。
    pub fn for_area(area: usize) -> Self {
        let (beam_width, depth, ball_window) = match area {
            0..=100 => (200, 3, 10),
            101..=400 => (100, 3, 8),
            401..=1600 => (100, 2, 7),
            _ => (50, 2, 5),
        };

        Self {
            beam_width,
            depth,
            ball_window,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_area() {
        assert_eq!(SearchParam::for_area(25).depth, 3);
        assert_eq!(SearchParam::for_area(400).ball_window, 8);
        assert_eq!(SearchParam::for_area(900), SearchParam::default());
        assert_eq!(SearchParam::for_area(3600).beam_width, 50);
        assert!(!SearchParam::for_area(25).require_improvement);
    }
}
