//! 転がるボールのパズル: 初期盤面から目標盤面にできるだけ近づける転がし操作列を探すソルバーライブラリ。
//!
//! ボールは壁・他のボール・盤端に当たるまで一直線に転がる。
//! 固定回数の反復の各回で、浅いビームサーチにより最良の 1 手を選んで確定させる。

mod beam_search;
mod board;
mod cell;
mod cmp;
mod context;
mod direction;
mod field;
mod hash;
mod hint;
mod param;
mod picker;
mod problem;
mod rng;
mod roll;
mod score;
mod solver;
mod square;
mod target;
mod zobrist;

pub use self::beam_search::*;
pub use self::board::*;
pub use self::cell::*;
pub use self::context::*;
pub use self::direction::*;
pub use self::field::*;
pub use self::hash::*;
pub use self::param::*;
pub use self::picker::*;
pub use self::problem::*;
pub use self::rng::*;
pub use self::roll::*;
pub use self::score::*;
pub use self::solver::*;
pub use self::square::*;
pub use self::target::*;
pub use self::zobrist::*;
