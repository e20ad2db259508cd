//! Revolving-door (minimal change) enumeration of combinations.
//!
//! [`Combinations`] walks the t-subsets of `0..n` and [`CombinationsWithReplacement`]
//! walks the t-multisets over `0..n`, both in the Gray code order of Knuth's
//! Algorithm R (TAOCP 7.2.1.3). Each step reports the elements that left and
//! entered the combination, so a consumer can update incrementally instead of
//! rescanning the whole state.
//!
//! ```
//! use revdoor::{Combinations, Swap};
//!
//! let mut gen = Combinations::new(5, 3);
//! assert_eq!(gen.get(), &[0, 1, 2]);
//! assert_eq!(gen.step(), Some(Swap::new(1, 3)));
//! assert_eq!(gen.get(), &[0, 2, 3]);
//! ```

use std::fmt;
use std::iter::FusedIterator;

pub mod check;
pub mod cli;
mod combinations;
mod combinations_with_replacement;
mod error;
pub mod utils;

pub use combinations::Combinations;
pub use combinations_with_replacement::{CombinationsWithReplacement, RepTransition};
pub use error::{Result, RevdoorError, StateViolation};

/// One element leaving the combination and one element entering it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Swap {
    pub removed: usize,
    pub added: usize,
}

impl Swap {
    pub fn new(removed: usize, added: usize) -> Swap {
        Swap { removed, added }
    }

    pub fn reversed(self) -> Swap {
        Swap::new(self.added, self.removed)
    }

    /// Replaces one occurrence of `removed` by `added` in a sorted slice and
    /// restores the sorted order. Returns false (leaving `values` untouched)
    /// if `removed` is not present.
    pub fn apply_to(&self, values: &mut [usize]) -> bool {
        let mut i = match values.iter().position(|&v| v == self.removed) {
            Some(i) => i,
            None => return false,
        };
        values[i] = self.added;
        if self.added > self.removed {
            while i + 1 < values.len() && values[i] > values[i + 1] {
                values.swap(i, i + 1);
                i += 1;
            }
        } else {
            while i > 0 && values[i - 1] > values[i] {
                values.swap(i - 1, i);
                i -= 1;
            }
        }
        true
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.removed, self.added)
    }
}

/// What a generator reports for a single step.
pub trait Transition: Copy + PartialEq + fmt::Debug + fmt::Display {
    /// Applies the transition to a sorted copy of the previous state.
    fn apply_to(&self, values: &mut [usize]) -> bool;

    /// Number of element swaps making up the transition.
    fn swap_count(&self) -> usize;
}

impl Transition for Swap {
    fn apply_to(&self, values: &mut [usize]) -> bool {
        Swap::apply_to(self, values)
    }

    fn swap_count(&self) -> usize {
        1
    }
}

/// Common surface of both generators, used by enumeration loops that do not
/// care which kind of combination they walk.
pub trait RevolvingDoor {
    type Transition: Transition;

    /// Largest transition a single step may report.
    const MAX_SWAPS: usize;

    /// Size of the universe the combination is drawn from.
    fn n(&self) -> usize;

    /// Number of elements in each combination.
    fn t(&self) -> usize;

    /// Number of combinations in a full enumeration, if it fits in a `u64`.
    fn total(&self) -> Option<u64>;

    /// The current combination, without the sentinel.
    fn get(&self) -> &[usize];

    /// Owned snapshot of the current combination. Meant for checkpoints, not
    /// for the stepping loop.
    fn state(&self) -> Vec<usize> {
        self.get().to_vec()
    }

    /// Is `values` ordered the way this generator's states are?
    fn is_ordered(values: &[usize]) -> bool;

    fn set_state(&mut self, values: &[usize]) -> Result<()>;

    fn step(&mut self) -> Option<Self::Transition>;

    fn transitions(&mut self) -> Transitions<'_, Self>
    where
        Self: Sized,
    {
        Transitions { gen: self }
    }
}

/// Iterator over the remaining transitions of a generator.
pub struct Transitions<'a, G> {
    gen: &'a mut G,
}

impl<G: RevolvingDoor> Transitions<'_, G> {
    pub fn generator(&self) -> &G {
        self.gen
    }
}

impl<G: RevolvingDoor> Iterator for Transitions<'_, G> {
    type Item = G::Transition;

    fn next(&mut self) -> Option<Self::Item> {
        self.gen.step()
    }
}

impl<G: RevolvingDoor> FusedIterator for Transitions<'_, G> {}
