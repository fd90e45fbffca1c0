//! キーが既にランダムな `u64` (Zobrist ハッシュ値など) である場合用のハッシュ集合。

use std::collections::HashSet;
use std::hash::{BuildHasherDefault, Hasher};

/// `u64` をそのままハッシュ値として使う `Hasher`。
///
/// `u64` 以外の書き込みは想定していない。
#[derive(Clone, Copy, Debug, Default)]
pub struct U64Hasher(u64);

impl Hasher for U64Hasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, _bytes: &[u8]) {
        unimplemented!("U64Hasher only supports write_u64");
    }

    fn write_u64(&mut self, x: u64) {
        self.0 = x;
    }
}

pub type U64BuildHasher = BuildHasherDefault<U64Hasher>;

pub type U64HashSet<K> = HashSet<K, U64BuildHasher>;

pub fn u64_hashset_with_capacity<K>(capacity: usize) -> U64HashSet<K> {
    U64HashSet::with_capacity_and_hasher(capacity, U64BuildHasher::default())
}
