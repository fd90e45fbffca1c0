/// デバッグビルドでは `assert!` と同等。
/// リリースビルドでは条件が成り立つことをコンパイラに伝える (成り立たなければ UB)。
///
/// `unsafe` ブロック内で使うこと。
macro_rules! assert_unchecked {
    ($cond:expr) => {{
        let cond: bool = $cond;
        if cfg!(debug_assertions) {
            assert!(cond);
        } else if !cond {
            std::hint::unreachable_unchecked();
        }
    }};
}
pub(crate) use assert_unchecked;
