use crate::filter::Filter;

/// Applies a stateless (or closure-captured state) transform to each value.
pub struct Map<F> {
    f: F,
}

impl<F: FnMut(f64) -> f64> Map<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: FnMut(f64) -> f64> Filter for Map<F> {
    #[inline(always)]
    fn get(&mut self, next: f64) -> f64 {
        (self.f)(next)
    }
}

pub fn map<F: FnMut(f64) -> f64>(f: F) -> Map<F> {
    Map::new(f)
}

/// Zeroes inputs whose magnitude is at most `threshold`.
pub fn deadband(threshold: f64) -> Map<impl FnMut(f64) -> f64> {
    map(move |x| if x.abs() <= threshold { 0.0 } else { x })
}

/// Limits inputs to `[min, max]`.
pub fn clamp(min: f64, max: f64) -> Map<impl FnMut(f64) -> f64> {
    map(move |x| x.clamp(min, max))
}
