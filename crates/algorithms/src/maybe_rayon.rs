//! rayon or sequential execution, chosen by the `parallel` feature.
//!
//! Without the feature the shim below maps `into_par_iter()` onto
//! `into_iter()`, so builder code compiles unchanged and runs one load case
//! after another.

#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    /// Sequential stand-in for `rayon::prelude::IntoParallelIterator`
    pub trait IntoParallelIterator {
        type Iter;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;

/// Whether load cases can actually run on more than one thread
pub fn parallel_available() -> bool {
    cfg!(feature = "parallel")
}
