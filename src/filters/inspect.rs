use crate::filter::Filter;

/// Passes the value through while performing a side effect.
pub struct Inspect<F> {
    f: F,
}

impl<F: FnMut(&f64)> Filter for Inspect<F> {
    #[inline(always)]
    fn get(&mut self, next: f64) -> f64 {
        (self.f)(&next);
        next
    }
}

pub fn inspect<F: FnMut(&f64)>(f: F) -> Inspect<F> {
    Inspect { f }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_inspect_logic() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut f = inspect(|_x: &f64| {
            count.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(f.get(4.2), 4.2);
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }
}
