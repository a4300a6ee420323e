//! Core generator trait and combinators.
//!
//! Every sampler in this crate draws from a caller-supplied random source so a
//! whole generation run can share one seeded RNG.

use rand::RngCore;

/// A generator that produces values of type `T` from a random source.
pub trait Gen<T> {
    /// Generate a value using the provided random source.
    fn generate(&self, rng: &mut dyn RngCore) -> T;

    /// Transform the generated value using a function.
    fn map<U, F>(self, f: F) -> Mapped<Self, F, T>
    where
        Self: Sized,
        F: Fn(T) -> U,
    {
        Mapped {
            gen: self,
            f,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Filter generated values, resampling until the predicate passes.
    ///
    /// There is no retry limit: the predicate must accept a value with
    /// non-zero probability.
    fn filter<F>(self, predicate: F) -> Filtered<Self, F>
    where
        Self: Sized,
        F: Fn(&T) -> bool,
    {
        Filtered {
            gen: self,
            predicate,
        }
    }

    /// Box this generator for dynamic dispatch.
    fn boxed(self) -> BoxedGen<T>
    where
        Self: Sized + 'static,
        T: 'static,
    {
        Box::new(self)
    }
}

/// Boxed generator for dynamic dispatch.
pub type BoxedGen<T> = Box<dyn Gen<T>>;

impl<T> Gen<T> for BoxedGen<T> {
    fn generate(&self, rng: &mut dyn RngCore) -> T {
        (**self).generate(rng)
    }
}

/// A generator that applies a function to transform generated values.
pub struct Mapped<G, F, T> {
    gen: G,
    f: F,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, U, G, F> Gen<U> for Mapped<G, F, T>
where
    G: Gen<T>,
    F: Fn(T) -> U,
{
    fn generate(&self, rng: &mut dyn RngCore) -> U {
        (self.f)(self.gen.generate(rng))
    }
}

/// A generator that rejects values failing a predicate.
pub struct Filtered<G, F> {
    gen: G,
    predicate: F,
}

impl<T, G, F> Gen<T> for Filtered<G, F>
where
    G: Gen<T>,
    F: Fn(&T) -> bool,
{
    fn generate(&self, rng: &mut dyn RngCore) -> T {
        loop {
            let value = self.gen.generate(rng);
            if (self.predicate)(&value) {
                return value;
            }
        }
    }
}
