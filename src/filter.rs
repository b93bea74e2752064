/// A stateful transform over a stream of scalar samples.
///
/// `get` is called once per new observation and returns the filtered value.
/// Implementations must not assume a fixed call rate.
pub trait Filter {
    fn get(&mut self, next: f64) -> f64;
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    #[inline(always)]
    fn get(&mut self, next: f64) -> f64 {
        (**self).get(next)
    }
}

impl<F: Filter + ?Sized> Filter for &mut F {
    #[inline(always)]
    fn get(&mut self, next: f64) -> f64 {
        (**self).get(next)
    }
}

/// Two filters applied in sequence.
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: Filter, B: Filter> Filter for Chain<A, B> {
    #[inline(always)]
    fn get(&mut self, next: f64) -> f64 {
        let mid = self.first.get(next);
        self.second.get(mid)
    }
}

impl<A, B> Chain<A, B> {
    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

pub trait FilterExt: Filter {
    /// Feeds the output of `self` into `next`.
    #[inline(always)]
    fn then<B: Filter>(self, next: B) -> Chain<Self, B>
    where
        Self: Sized,
    {
        Chain {
            first: self,
            second: next,
        }
    }

    fn boxed<'a>(self) -> Box<dyn Filter + 'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

impl<F: Filter + ?Sized> FilterExt for F {}
