use std::fmt;

use crate::error::{Result, RevdoorError, StateViolation};
use crate::utils::combinations;
use crate::{RevolvingDoor, Swap, Transition};

/// Revolving-door enumeration of the t-multisets over `0..n`.
///
/// A non-decreasing `c` corresponds to the strictly increasing
/// `d[i] = c[i] + i` over `0..n+t-1`, and the walk is Algorithm R on `d`.
/// The state is kept in the unshifted form, so the sentinel `d[t] = n+t-1`
/// is stored as `n-1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinationsWithReplacement {
    n: usize,
    t: usize,
    c: Vec<usize>,
}

/// A step of [`CombinationsWithReplacement`]: either one value changes or
/// two do, since a carry moves the boundaries of two runs at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RepTransition {
    Single(Swap),
    Double(Swap, Swap),
}

impl RepTransition {
    /// Flat `(out1, in1, out2, in2)` form. For a single swap the first pair
    /// repeats the removed value, so `out1 == in1` marks "no first swap".
    pub fn to_raw(self) -> (usize, usize, usize, usize) {
        match self {
            RepTransition::Single(s) => (s.removed, s.removed, s.removed, s.added),
            RepTransition::Double(a, b) => (a.removed, a.added, b.removed, b.added),
        }
    }

    pub fn swaps(&self) -> impl Iterator<Item = Swap> {
        let (first, second) = match *self {
            RepTransition::Single(s) => (None, s),
            RepTransition::Double(a, b) => (Some(a), b),
        };
        first.into_iter().chain(std::iter::once(second))
    }
}

impl Transition for RepTransition {
    fn apply_to(&self, values: &mut [usize]) -> bool {
        match *self {
            RepTransition::Single(s) => s.apply_to(values),
            RepTransition::Double(a, b) => {
                if !a.apply_to(values) {
                    return false;
                }
                if !b.apply_to(values) {
                    a.reversed().apply_to(values);
                    return false;
                }
                true
            }
        }
    }

    fn swap_count(&self) -> usize {
        match self {
            RepTransition::Single(_) => 1,
            RepTransition::Double(..) => 2,
        }
    }
}

impl fmt::Display for RepTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepTransition::Single(s) => write!(f, "{}", s),
            RepTransition::Double(a, b) => write!(f, "{}, {}", a, b),
        }
    }
}

impl CombinationsWithReplacement {
    /// Starts at `{0, 0, ..., 0}`. Panics unless `n + t - 1 > t > 1`.
    pub fn new(n: usize, t: usize) -> CombinationsWithReplacement {
        match Self::try_new(n, t) {
            Ok(gen) => gen,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_new(n: usize, t: usize) -> Result<CombinationsWithReplacement> {
        let shifted = n.checked_add(t).and_then(|s| s.checked_sub(1));
        if t <= 1 || !matches!(shifted, Some(s) if s > t) {
            return Err(RevdoorError::InvalidParameters {
                n,
                t,
                requirement: "n + t - 1 > t > 1",
            });
        }
        let mut c = vec![0; t];
        c.push(n - 1);
        log::debug!("combinations with replacement n={} t={}", n, t);
        Ok(CombinationsWithReplacement { n, t, c })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn t(&self) -> usize {
        self.t
    }

    pub fn get(&self) -> &[usize] {
        &self.c[..self.t]
    }

    pub fn state(&self) -> Vec<usize> {
        self.get().to_vec()
    }

    /// Jumps to an arbitrary multiset. Only the length and the range of the
    /// values are checked; the caller must pass them in non-decreasing order.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `values` is not non-decreasing. Release
    /// builds accept such a state and the following steps are unspecified.
    pub fn set_state(&mut self, values: &[usize]) -> Result<()> {
        if values.len() != self.t {
            return Err(StateViolation::Length {
                expected: self.t,
                found: values.len(),
            }
            .into());
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, &v)| v >= self.n) {
            return Err(StateViolation::OutOfRange {
                index,
                value,
                bound: self.n,
            }
            .into());
        }
        debug_assert!(
            values.windows(2).all(|w| w[0] <= w[1]),
            "state {:?} is not non-decreasing",
            values
        );
        self.c[..self.t].copy_from_slice(values);
        log::debug!(
            "combinations with replacement n={} t={} resume at {:?}",
            self.n,
            self.t,
            values
        );
        Ok(())
    }

    /// Moves to the next multiset, or returns None once `{0, ..., 0, n-1}`
    /// has been reached.
    pub fn step(&mut self) -> Option<RepTransition> {
        let t = self.t;
        let c = &mut self.c;

        let mut decrease = if t & 1 == 1 {
            if c[0] < c[1] {
                let out = c[0];
                c[0] += 1;
                return Some(RepTransition::Single(Swap::new(out, c[0])));
            }
            true
        } else {
            if c[0] > 0 {
                let out = c[0];
                c[0] -= 1;
                return Some(RepTransition::Single(Swap::new(out, c[0])));
            }
            false
        };

        let mut j = 1;
        loop {
            if decrease {
                // c[j] == c[j-1] here
                if c[j] > 0 {
                    let out1 = c[j];
                    c[j] = c[j - 1] - 1;
                    let out2 = c[j - 1];
                    c[j - 1] = 0;
                    return Some(RepTransition::Double(
                        Swap::new(out1, c[j]),
                        Swap::new(out2, 0),
                    ));
                }
                j += 1;
            }
            if c[j] < c[j + 1] {
                let out1 = c[j - 1];
                c[j - 1] = c[j] + 1;
                let out2 = c[j];
                c[j] += 1;
                return Some(RepTransition::Double(
                    Swap::new(out1, c[j - 1]),
                    Swap::new(out2, c[j]),
                ));
            }
            j += 1;
            if j >= t {
                return None;
            }
            decrease = true;
        }
    }
}

impl RevolvingDoor for CombinationsWithReplacement {
    type Transition = RepTransition;

    const MAX_SWAPS: usize = 2;

    fn n(&self) -> usize {
        self.n
    }

    fn t(&self) -> usize {
        self.t
    }

    fn total(&self) -> Option<u64> {
        combinations((self.n + self.t - 1) as u64, self.t as u64)
    }

    fn get(&self) -> &[usize] {
        CombinationsWithReplacement::get(self)
    }

    fn is_ordered(values: &[usize]) -> bool {
        values.windows(2).all(|w| w[0] <= w[1])
    }

    fn set_state(&mut self, values: &[usize]) -> Result<()> {
        CombinationsWithReplacement::set_state(self, values)
    }

    fn step(&mut self) -> Option<RepTransition> {
        CombinationsWithReplacement::step(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // Same shape as the raw reporting: the first pair is dropped when
    // out1 == in1.
    fn all_states_and_swaps(
        mut gen: CombinationsWithReplacement,
    ) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
        let mut states = vec![gen.state()];
        let mut swaps = Vec::new();
        while let Some(tr) = gen.step() {
            let (out1, in1, out2, in2) = tr.to_raw();
            let mut v = Vec::new();
            if out1 != in1 {
                v.push(out1);
                v.push(in1);
            }
            v.push(out2);
            v.push(in2);
            states.push(gen.state());
            swaps.push(v);
        }
        (states, swaps)
    }

    #[test]
    fn test_5_3() {
        let gen = CombinationsWithReplacement::new(5, 3);
        assert_eq!(gen.get(), &[0, 0, 0]);
        let (states, swaps) = all_states_and_swaps(gen);
        let expected: Vec<Vec<usize>> = vec![
            vec![0, 1, 0, 1],
            vec![0, 1],
            vec![1, 0, 1, 0],
            vec![0, 2, 1, 2],
            vec![0, 1],
            vec![1, 2],
            vec![2, 1, 2, 0],
            vec![0, 1],
            vec![1, 0, 1, 0],
            vec![0, 3, 2, 3],
            vec![0, 1],
            vec![1, 2],
            vec![2, 3],
            vec![3, 2, 3, 0],
            vec![0, 1],
            vec![1, 2],
            vec![2, 1, 2, 0],
            vec![0, 1],
            vec![1, 0, 1, 0],
            vec![0, 4, 3, 4],
            vec![0, 1],
            vec![1, 2],
            vec![2, 3],
            vec![3, 4],
            vec![4, 3, 4, 0],
            vec![0, 1],
            vec![1, 2],
            vec![2, 3],
            vec![3, 2, 3, 0],
            vec![0, 1],
            vec![1, 2],
            vec![2, 1, 2, 0],
            vec![0, 1],
            vec![1, 0, 1, 0],
        ];
        assert_eq!(swaps, expected);
        assert_eq!(swaps.len(), 34);
        assert_eq!(states.last(), Some(&vec![0, 0, 4]));
    }

    #[test]
    fn test_3_2() {
        let (states, _) = all_states_and_swaps(CombinationsWithReplacement::new(3, 2));
        assert_eq!(
            states,
            vec![
                vec![0, 0],
                vec![1, 1],
                vec![0, 1],
                vec![2, 2],
                vec![1, 2],
                vec![0, 2],
            ]
        );
    }

    #[test]
    fn test_raw_single() {
        let mut gen = CombinationsWithReplacement::new(4, 2);
        gen.set_state(&[1, 3]).unwrap();
        let tr = gen.step().unwrap();
        assert_eq!(tr, RepTransition::Single(Swap::new(1, 0)));
        assert_eq!(tr.to_raw(), (1, 1, 1, 0));
        assert_eq!(tr.swap_count(), 1);
        assert_eq!(tr.swaps().collect::<Vec<_>>(), vec![Swap::new(1, 0)]);
    }

    #[test]
    fn test_apply_double() {
        let tr = RepTransition::Double(Swap::new(2, 1), Swap::new(2, 0));
        let mut values = vec![2, 2, 3];
        assert!(tr.apply_to(&mut values));
        assert_eq!(values, vec![0, 1, 3]);

        let mut values = vec![1, 2, 3];
        assert!(!tr.apply_to(&mut values));
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(tr.to_string(), "2 -> 1, 2 -> 0");
    }

    #[test]
    fn test_exhausted() {
        let mut gen = CombinationsWithReplacement::new(2, 4);
        let mut count = 0;
        while gen.step().is_some() {
            count += 1;
        }
        assert_eq!(count, 4);
        assert_eq!(gen.get(), &[0, 0, 0, 1]);
        assert_eq!(gen.step(), None);
        assert_eq!(gen.get(), &[0, 0, 0, 1]);
    }

    #[test]
    fn test_resume() {
        let (states, swaps) = all_states_and_swaps(CombinationsWithReplacement::new(4, 3));
        for (i, state) in states.iter().enumerate() {
            let mut gen = CombinationsWithReplacement::new(4, 3);
            gen.set_state(state).unwrap();
            let (rest_states, rest_swaps) = all_states_and_swaps(gen);
            assert_eq!(rest_states, states[i..]);
            assert_eq!(rest_swaps, swaps[i..]);
        }
    }

    #[test]
    fn test_set_state_invalid() {
        let mut gen = CombinationsWithReplacement::new(5, 3);
        assert_eq!(
            gen.set_state(&[0, 0, 0, 0]),
            Err(StateViolation::Length {
                expected: 3,
                found: 4
            }
            .into())
        );
        assert_eq!(
            gen.set_state(&[0, 5, 5]),
            Err(StateViolation::OutOfRange {
                index: 1,
                value: 5,
                bound: 5
            }
            .into())
        );
        assert!(gen.set_state(&[4, 4, 4]).is_ok());
        assert_eq!(gen.get(), &[4, 4, 4]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "is not non-decreasing")]
    fn test_set_state_unordered_debug() {
        let mut gen = CombinationsWithReplacement::new(5, 3);
        let _ = gen.set_state(&[3, 1, 2]);
    }

    #[test]
    fn test_try_new() {
        assert!(CombinationsWithReplacement::try_new(2, 2).is_ok());
        assert!(CombinationsWithReplacement::try_new(1, 3).is_err());
        assert!(CombinationsWithReplacement::try_new(5, 1).is_err());
        assert!(CombinationsWithReplacement::try_new(0, 0).is_err());
        assert!(CombinationsWithReplacement::try_new(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_many() {
        for n in 2..8 {
            for t in 2..7 {
                let gen = CombinationsWithReplacement::new(n, t);
                let total = gen.total().unwrap() as usize;
                let (states, swaps) = all_states_and_swaps(gen);
                assert_eq!(swaps.len(), total - 1, "n={} t={}", n, t);
                let mut last = vec![0; t];
                last[t - 1] = n - 1;
                assert_eq!(states.last(), Some(&last));
                for state in &states {
                    assert!(state.windows(2).all(|w| w[0] <= w[1]), "{:?}", state);
                }
            }
        }
    }
}
