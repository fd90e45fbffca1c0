//! 1 手を選ぶための固定深さビームサーチ。

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::trace;

use crate::board::BallId;
use crate::cmp::chmax;
use crate::context::{Position, SearchContext};
use crate::hash::{u64_hashset_with_capacity, U64HashSet};
use crate::hint::assert_unchecked;
use crate::param::SearchParam;
use crate::roll::Roll;

/// 探索が手を返さなかった理由。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoMove {
    /// 候補となる転がしが 1 つも生成されなかった。
    NoCandidate,

    /// 候補はあったが、`require_improvement` が有効で現局面より良い局面がなかった。
    NoImprovement,
}

/// ビームサーチによる手の選択器。求解中に何度も呼ばれる。
///
/// 1 回の呼び出しでは、開始ボールから連番の `ball_window` 個のボールを 4 方向に転がす候補を
/// `depth` 層まで展開し、各層で評価値上位 `beam_width` 個だけを残す。
/// 見つかった最良局面に至る手順の最初の 1 手を返す。
#[derive(Debug)]
pub struct BeamSearch {
    param: SearchParam,

    /// 評価値上位 k 件の子局面を保持する。
    /// 毎回確保し直すのは無駄なのでソルバー自体に持つ。
    children: Children,

    /// 探索 1 回の中で既に生成した局面のハッシュ値。
    visited: U64HashSet<u64>,

    /// これまでに生成した子局面の総数。
    searched_nodes: u64,
}

impl BeamSearch {
    pub fn new(param: SearchParam) -> Self {
        Self {
            param,
            children: Children::with_capacity(param.beam_width.max(1)),
            visited: u64_hashset_with_capacity(4 * param.beam_width.max(1)),
            searched_nodes: 0,
        }
    }

    pub fn param(&self) -> &SearchParam {
        &self.param
    }

    /// これまでに生成した子局面の総数を返す。
    pub fn searched_nodes(&self) -> u64 {
        self.searched_nodes
    }

    /// 現在の盤面から、ボール `start_ball` を起点に探索して最良の 1 手を返す。
    ///
    /// 既定では、候補が 1 つでも生成されれば (現局面より悪くても) その中の最良の 1 手を返す。
    /// 候補が 1 つも生成されなかった場合は `NoMove::NoCandidate` を返す。
    /// `require_improvement` が有効で現局面より良い局面がなかった場合は `NoMove::NoImprovement` を返す。
    /// `ctx` の盤面は変更しない。
    pub fn search(&mut self, ctx: &SearchContext, start_ball: BallId) -> Result<Roll, NoMove> {
        let ball_count = ctx.board().ball_count();
        if ball_count == 0 {
            return Err(NoMove::NoCandidate);
        }

        // 必要な初期化を行う (メソッド末尾でやってもいいが、バグらせがちなので)。
        self.visited.clear();
        self.children.clear();

        let root = Position::new(ctx, ctx.board().clone());
        self.visited.insert(root.hash());

        let mut best_rank = if self.param.require_improvement {
            root.rank()
        } else {
            i64::MIN
        };
        let mut best_roll = None;
        let mut generated = false;

        let window = self.param.ball_window.min(ball_count);
        let mut beam = vec![Node {
            first: None,
            pos: root,
        }];

        for depth in 0..self.param.depth {
            // beam 内の各局面について、候補ボールを 4 方向に転がした子局面を列挙する。
            // 子局面は一旦 pos 上で試し、採用されそうなものだけを複製する。
            for node in &beam {
                let mut pos = node.pos.clone();

                for i in 0..window {
                    let id = (start_ball + i) % ball_count;
                    let ball = pos.board().ball(id);

                    for (dir, dst) in pos.board().roll_targets(ball.square) {
                        if let Some(min) = self.param.min_potential {
                            if ctx.field().potential(dst, ball.color) < min {
                                continue;
                            }
                        }

                        pos.move_ball(ctx, id, dst);

                        if self.visited.insert(pos.hash()) {
                            generated = true;
                            self.searched_nodes += 1;
                            let first = node.first.unwrap_or(Roll {
                                ball: id,
                                from: ball.square,
                                dir,
                            });
                            self.children.insert(pos.rank(), || Node {
                                first: Some(first),
                                pos: pos.clone(),
                            });
                        }

                        // 同じ交換をもう一度行って親局面に戻す。
                        pos.move_ball(ctx, id, ball.square);
                    }
                }
            }

            trace!(
                "Depth {depth}: beam_len={} children_len={}",
                beam.len(),
                self.children.len()
            );

            // children を次のビームとする (評価値の降順)。
            // 次のビームが空なら終了。
            beam = self.children.drain_sorted();
            let Some(top) = beam.first() else {
                break;
            };

            // 同点の場合は先に見つかった方を優先する。
            if chmax!(best_rank, top.pos.rank()) {
                best_roll = top.first;
            }
        }

        best_roll.ok_or(if generated {
            NoMove::NoImprovement
        } else {
            NoMove::NoCandidate
        })
    }
}

/// 探索ノード。
#[derive(Clone, Debug)]
struct Node {
    /// ルートからの最初の 1 手。ルートノードの場合 `None`。
    first: Option<Roll>,

    pos: Position,
}

#[derive(Debug)]
struct ChildState {
    rank: i64,

    /// 挿入順。同点の場合に先に挿入された方を優先するために使う。
    seq: u64,

    node: Node,
}

impl ChildState {
    /// 大きいほど良い。
    fn key(&self) -> (i64, Reverse<u64>) {
        (self.rank, Reverse(self.seq))
    }
}

impl PartialEq for ChildState {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ChildState {}

impl PartialOrd for ChildState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChildState {
    /// 評価値による比較。
    /// `Children` 内のヒープを min-heap にするため、順序を逆にする (良い方が先になる)。
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// 評価値上位 k 件の子局面を保持する固定容量のヒープ。
#[derive(Debug)]
struct Children {
    heap: BinaryHeap<ChildState>,
    capacity: usize,
    seq: u64,
}

impl Children {
    fn with_capacity(capacity: usize) -> Self {
        unsafe { assert_unchecked!(capacity != 0) }

        Self {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
            seq: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    #[allow(dead_code)]
    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }

    /// 評価値 `rank` の子局面の挿入を試み、実際に挿入されたかどうかを返す。
    ///
    /// 残り容量がなく、かつ `self` 内の最悪の子局面が `rank` より良いか同点の場合は挿入しない。
    /// さもなくば最悪の子局面を削除して挿入する。
    /// `make_node` は実際に挿入するときだけ呼ばれる。
    fn insert(&mut self, rank: i64, make_node: impl FnOnce() -> Node) -> bool {
        let seq = self.seq;
        self.seq += 1;

        if self.is_full() {
            let better = self
                .heap
                .peek()
                .map_or(true, |worst| (rank, Reverse(seq)) > worst.key());
            if !better {
                return false;
            }
            self.heap.pop();
        }

        self.heap.push(ChildState {
            rank,
            seq,
            node: make_node(),
        });
        true
    }

    /// 中身を良い順に取り出す。`self` は空になる (容量は変化しない)。
    fn drain_sorted(&mut self) -> Vec<Node> {
        let mut xs: Vec<ChildState> = self.heap.drain().collect();
        xs.sort_unstable();
        xs.into_iter().map(|x| x.node).collect()
    }
}
