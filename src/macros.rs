/// Composes filters left to right: `chain![a, b, c]` feeds `a` into `b` into `c`.
#[macro_export]
macro_rules! chain {
    ($f1:expr) => { $f1 };
    ($f1:expr, $($rest:expr),+ $(,)?) => {
        {
            use $crate::FilterExt;
            $f1.then($crate::chain!($($rest),+))
        }
    };
}
