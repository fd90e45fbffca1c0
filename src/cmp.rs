/// `$lhs < $rhs` ならば `$lhs = $rhs` として `true` を返す。さもなくば `false` を返す。
macro_rules! chmax {
    ($lhs:expr, $rhs:expr) => {{
        let rhs = $rhs;
        if $lhs < rhs {
            $lhs = rhs;
            true
        } else {
            false
        }
    }};
}
pub(crate) use chmax;
