/// xorshift128 による疑似乱数生成器。
///
/// Zobrist テーブルの生成と、開始ボールのランダム選択に使う。
/// シードが同じなら同じ系列を返すので、解の再現性が保たれる。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Xorshift128 {
    x: u64,
    y: u64,
    z: u64,
    w: u64,
}

impl Default for Xorshift128 {
    fn default() -> Self {
        Self {
            x: 123456789,
            y: 362436069,
            z: 521288629,
            w: 88675123,
        }
    }
}

impl Xorshift128 {
    /// 既定の内部状態の `w` に `seed` を混ぜ、16 回空回しした生成器を返す。
    ///
    /// 空回しの分だけ進むので、`seed == 0` でも `Default` とは異なる位置から始まる。
    /// `x, y, z` は非零の定数なので、内部状態が全て 0 になることはない。
    pub fn new(seed: u64) -> Self {
        let mut rng = Self::default();
        rng.w ^= seed;
        // 撹拌が全状態に行き渡るまで空回しする。
        for _ in 0..16 {
            rng.next_u64();
        }
        rng
    }

    pub fn next_u64(&mut self) -> u64 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = (self.w ^ (self.w >> 19)) ^ (t ^ (t >> 8));
        self.w
    }

    /// `0..n` の一様乱数を返す (厳密には一様でないが、用途上問題ない)。
    pub fn gen_index(&mut self, n: usize) -> usize {
        assert!(n > 0);
        (self.next_u64() % n as u64) as usize
    }
}
