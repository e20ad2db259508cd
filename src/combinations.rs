use crate::error::{Result, RevdoorError, StateViolation};
use crate::utils::combinations;
use crate::{RevolvingDoor, Swap};

/// Revolving-door enumeration of the t-subsets of `0..n`.
///
/// The state always holds `t + 1` values: the combination in strictly
/// increasing order followed by the sentinel `n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combinations {
    n: usize,
    t: usize,
    c: Vec<usize>,
}

impl Combinations {
    /// Starts at `{0, 1, ..., t-1}`. Panics unless `n > t > 1`.
    pub fn new(n: usize, t: usize) -> Combinations {
        match Self::try_new(n, t) {
            Ok(gen) => gen,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_new(n: usize, t: usize) -> Result<Combinations> {
        if !(n > t && t > 1) {
            return Err(RevdoorError::InvalidParameters {
                n,
                t,
                requirement: "n > t > 1",
            });
        }
        let mut c = (0..t).collect::<Vec<_>>();
        c.push(n);
        log::debug!("combinations n={} t={}", n, t);
        Ok(Combinations { n, t, c })
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

    /// Owned copy of the current combination.
    pub fn state(&self) -> Vec<usize> {
        self.get().to_vec()
    }

    /// Jumps to an arbitrary combination, given in increasing order. The
    /// following steps are exactly those the generator would have taken after
    /// reaching `values` on its own. On error the state is left unchanged.
    pub fn set_state(&mut self, values: &[usize]) -> Result<()> {
        validate_state(self.n, self.t, values)?;
        self.c[..self.t].copy_from_slice(values);
        log::debug!("combinations n={} t={} resume at {:?}", self.n, self.t, values);
        Ok(())
    }

    /// Moves to the next combination. Returns the element that left and the
    /// one that entered, or None when the last combination `{0, ..., t-2, n-1}`
    /// has been reached. Once exhausted the state no longer changes.
    pub fn step(&mut self) -> Option<Swap> {
        let t = self.t;
        let c = &mut self.c;

        // R3: the easy case touches only c[0]
        let mut decrease = if t & 1 == 1 {
            if c[0] + 1 < c[1] {
                let out = c[0];
                c[0] += 1;
                return Some(Swap::new(out, c[0]));
            }
            true
        } else {
            if c[0] > 0 {
                let out = c[0];
                c[0] -= 1;
                return Some(Swap::new(out, c[0]));
            }
            false
        };

        let mut j = 1;
        loop {
            if decrease {
                // R4: c[j] == c[j-1] + 1 here, and j has the parity of t,
                // so j <= t - 2.
                if c[j] > j {
                    let out = c[j];
                    c[j] = c[j - 1];
                    c[j - 1] = j - 1;
                    return Some(Swap::new(out, j - 1));
                }
                j += 1;
            }
            // R5: c[j-1] == j-1 here
            if c[j] + 1 < c[j + 1] {
                let out = c[j - 1];
                c[j - 1] = c[j];
                c[j] += 1;
                return Some(Swap::new(out, c[j]));
            }
            j += 1;
            if j >= t {
                return None;
            }
            decrease = true;
        }
    }
}

fn validate_state(n: usize, t: usize, values: &[usize]) -> Result<()> {
    if values.len() != t {
        return Err(StateViolation::Length {
            expected: t,
            found: values.len(),
        }
        .into());
    }
    for (index, &value) in values.iter().enumerate() {
        if value >= n {
            return Err(StateViolation::OutOfRange {
                index,
                value,
                bound: n,
            }
            .into());
        }
        if index > 0 {
            let prev = values[index - 1];
            if prev == value {
                return Err(StateViolation::Duplicate { index, value }.into());
            }
            if prev > value {
                return Err(StateViolation::Unordered { index }.into());
            }
        }
    }
    Ok(())
}

impl RevolvingDoor for Combinations {
    type Transition = Swap;

    const MAX_SWAPS: usize = 1;

    fn n(&self) -> usize {
        self.n
    }

    fn t(&self) -> usize {
        self.t
    }

    fn total(&self) -> Option<u64> {
        combinations(self.n as u64, self.t as u64)
    }

    fn get(&self) -> &[usize] {
        Combinations::get(self)
    }

    fn is_ordered(values: &[usize]) -> bool {
        values.windows(2).all(|w| w[0] < w[1])
    }

    fn set_state(&mut self, values: &[usize]) -> Result<()> {
        Combinations::set_state(self, values)
    }

    fn step(&mut self) -> Option<Swap> {
        Combinations::step(self)
    }
}
