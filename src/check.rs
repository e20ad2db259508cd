//! Exhaustive verification of the generators against the lexicographic
//! enumerators in [`crate::utils`].

use std::collections::HashSet;

use thiserror::Error;

use crate::utils::{CombineIter, CombineWithRepIter};
use crate::{
    Combinations, CombinationsWithReplacement, RepTransition, RevdoorError, RevolvingDoor,
    Transition,
};

/// Enumerations longer than this are refused, since every state is kept.
pub const MAX_CHECKED: u64 = 1 << 22;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error(transparent)]
    Generator(#[from] RevdoorError),

    #[error("n={n} t={t} has {total:?} combinations, more than the {max} that can be checked")]
    TooLarge {
        n: usize,
        t: usize,
        total: Option<u64>,
        max: u64,
    },

    #[error("step {step}: {transition} takes {from:?} to {found:?}, generator is at {to:?}")]
    BadTransition {
        step: usize,
        transition: String,
        from: Vec<usize>,
        to: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("step {step}: {transition} makes {swaps} swaps, at most {max} allowed")]
    TooManySwaps {
        step: usize,
        transition: String,
        swaps: usize,
        max: usize,
    },

    #[error("step {step}: {transition} changes {changed} coordinates, expected {expected}")]
    Coordinates {
        step: usize,
        transition: String,
        changed: usize,
        expected: usize,
    },

    #[error("step {step}: state {state:?} is not a valid combination")]
    Malformed { step: usize, state: Vec<usize> },

    #[error("step {step}: state {state:?} was already visited")]
    Repeated { step: usize, state: Vec<usize> },

    #[error("{which} state is {found:?}, expected {expected:?}")]
    Endpoint {
        which: &'static str,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("{found} combinations visited, expected {expected}")]
    Count { expected: u64, found: u64 },

    #[error("combination {state:?} was never visited")]
    Missed { state: Vec<usize> },

    #[error("resuming at {state:?} (step {step}) diverges from the full enumeration")]
    Resume { step: usize, state: Vec<usize> },
}

/// Every state visited by a generator, and the transitions between them.
#[derive(Clone, Debug)]
pub struct Walk<T> {
    pub states: Vec<Vec<usize>>,
    pub transitions: Vec<T>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    pub n: usize,
    pub t: usize,
    pub transitions: u64,
    pub resumes: usize,
}

/// Steps `gen` until it is exhausted, checking each transition against the
/// state it produced.
pub fn walk<G: RevolvingDoor>(gen: &mut G) -> Result<Walk<G::Transition>, CheckError> {
    let n = gen.n();
    let valid = |state: &[usize]| G::is_ordered(state) && state.iter().all(|&v| v < n);

    let mut current = gen.state();
    if !valid(&current) {
        return Err(CheckError::Malformed {
            step: 0,
            state: current,
        });
    }
    let mut seen = HashSet::new();
    seen.insert(current.clone());
    let mut states = vec![current.clone()];
    let mut transitions = Vec::new();

    while let Some(tr) = gen.step() {
        let step = transitions.len() + 1;
        let next = gen.get();
        if tr.swap_count() > G::MAX_SWAPS {
            return Err(CheckError::TooManySwaps {
                step,
                transition: tr.to_string(),
                swaps: tr.swap_count(),
                max: G::MAX_SWAPS,
            });
        }
        let from = current.clone();
        if !tr.apply_to(&mut current) || current != next {
            return Err(CheckError::BadTransition {
                step,
                transition: tr.to_string(),
                from,
                to: next.to_vec(),
                found: current,
            });
        }
        if !valid(next) {
            return Err(CheckError::Malformed {
                step,
                state: next.to_vec(),
            });
        }
        if !seen.insert(next.to_vec()) {
            return Err(CheckError::Repeated {
                step,
                state: next.to_vec(),
            });
        }
        states.push(next.to_vec());
        transitions.push(tr);
    }
    Ok(Walk {
        states,
        transitions,
    })
}

/// Checks that each with-replacement transition moves exactly as many
/// coordinates of the sorted state as it reports swaps, so that the raw
/// `out1 == in1` marker means a single coordinate changed.
pub fn check_coordinates(walk: &Walk<RepTransition>) -> Result<(), CheckError> {
    let pairs = walk.states.windows(2).zip(&walk.transitions);
    for (i, (states, tr)) in pairs.enumerate() {
        let changed = states[0]
            .iter()
            .zip(&states[1])
            .filter(|(a, b)| a != b)
            .count();
        let (out1, in1, _, _) = tr.to_raw();
        if changed != tr.swap_count() || (out1 == in1) != (changed == 1) {
            return Err(CheckError::Coordinates {
                step: i + 1,
                transition: tr.to_string(),
                changed,
                expected: tr.swap_count(),
            });
        }
    }
    Ok(())
}

fn verify_with<G: RevolvingDoor + Clone>(
    gen: G,
    first: Vec<usize>,
    last: Vec<usize>,
    oracle: impl FnOnce() -> Vec<Vec<usize>>,
    per_step: impl Fn(&Walk<G::Transition>) -> Result<(), CheckError>,
    resume_every: usize,
) -> Result<Report, CheckError> {
    let (n, t) = (gen.n(), gen.t());
    let total = match gen.total() {
        Some(total) if total <= MAX_CHECKED => total,
        total => {
            return Err(CheckError::TooLarge {
                n,
                t,
                total,
                max: MAX_CHECKED,
            })
        }
    };

    let template = gen.clone();
    let mut gen = gen;
    let full = walk(&mut gen)?;
    per_step(&full)?;

    if full.states[0] != first {
        return Err(CheckError::Endpoint {
            which: "first",
            expected: first,
            found: full.states[0].clone(),
        });
    }
    if full.states[full.states.len() - 1] != last {
        return Err(CheckError::Endpoint {
            which: "last",
            expected: last,
            found: full.states[full.states.len() - 1].clone(),
        });
    }
    if full.states.len() as u64 != total {
        return Err(CheckError::Count {
            expected: total,
            found: full.states.len() as u64,
        });
    }

    // walk() already rules out repeats, so equal counts plus no miss means
    // the same set
    let visited = full.states.iter().collect::<HashSet<_>>();
    if let Some(state) = oracle().into_iter().find(|s| !visited.contains(s)) {
        return Err(CheckError::Missed { state });
    }

    let mut resumes = 0;
    if resume_every > 0 {
        for step in (0..full.states.len()).step_by(resume_every) {
            let state = &full.states[step];
            let mut resumed = template.clone();
            resumed.set_state(state)?;
            let rest = walk(&mut resumed)?;
            if rest.states[..] != full.states[step..]
                || rest.transitions[..] != full.transitions[step..]
            {
                return Err(CheckError::Resume {
                    step,
                    state: state.clone(),
                });
            }
            resumes += 1;
        }
    }

    let report = Report {
        n,
        t,
        transitions: total - 1,
        resumes,
    };
    log::debug!("verified {:?}", report);
    Ok(report)
}

/// Full check of [`Combinations`] for one `(n, t)`. A positive `resume_every`
/// also reseeds a fresh generator at every `resume_every`-th state.
pub fn verify_combinations(n: usize, t: usize, resume_every: usize) -> Result<Report, CheckError> {
    let gen = Combinations::try_new(n, t)?;
    let first = (0..t).collect::<Vec<_>>();
    let mut last = (0..t - 1).collect::<Vec<_>>();
    last.push(n - 1);
    let oracle = || CombineIter::new(n, t).collect();
    verify_with(gen, first, last, oracle, |_| Ok(()), resume_every)
}

/// Full check of [`CombinationsWithReplacement`] for one `(n, t)`.
pub fn verify_combinations_with_replacement(
    n: usize,
    t: usize,
    resume_every: usize,
) -> Result<Report, CheckError> {
    let gen = CombinationsWithReplacement::try_new(n, t)?;
    let first = vec![0; t];
    let mut last = vec![0; t];
    last[t - 1] = n - 1;
    let oracle = || CombineWithRepIter::new(n, t).collect();
    verify_with(gen, first, last, oracle, check_coordinates, resume_every)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Swap;

    #[test]
    fn test_walk_5_3() {
        let mut gen = Combinations::new(5, 3);
        let walk = walk(&mut gen).unwrap();
        assert_eq!(walk.states.len(), 10);
        assert_eq!(walk.transitions[2], Swap::new(2, 0));
        assert_eq!(walk.states[3], vec![0, 1, 3]);
    }

    #[test]
    fn test_walk_rep_5_3() {
        let mut gen = CombinationsWithReplacement::new(5, 3);
        let walk = walk(&mut gen).unwrap();
        assert_eq!(walk.transitions.len(), 34);
        assert_eq!(
            walk.transitions[0],
            RepTransition::Double(Swap::new(0, 1), Swap::new(0, 1))
        );
        assert_eq!(walk.states[1], vec![0, 1, 1]);
    }

    #[test]
    fn test_walk_from_middle() {
        let mut gen = Combinations::new(5, 3);
        gen.set_state(&[2, 3, 4]).unwrap();
        let walk = walk(&mut gen).unwrap();
        assert_eq!(
            walk.states,
            vec![vec![2, 3, 4], vec![0, 2, 4], vec![1, 2, 4], vec![0, 1, 4]]
        );
    }

    #[test]
    fn test_coordinates() {
        for n in 2..8 {
            for t in 2..7 {
                let mut gen = CombinationsWithReplacement::new(n, t);
                check_coordinates(&walk(&mut gen).unwrap()).unwrap();
            }
        }

        // a double that only moves one coordinate of the sorted state
        let forged = Walk {
            states: vec![vec![0, 0, 1], vec![0, 0, 2]],
            transitions: vec![RepTransition::Double(Swap::new(1, 2), Swap::new(0, 0))],
        };
        assert_eq!(
            check_coordinates(&forged),
            Err(CheckError::Coordinates {
                step: 1,
                transition: forged.transitions[0].to_string(),
                changed: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn test_verify_report() {
        assert_eq!(
            verify_combinations(5, 3, 1),
            Ok(Report {
                n: 5,
                t: 3,
                transitions: 9,
                resumes: 10
            })
        );
        assert_eq!(
            verify_combinations_with_replacement(5, 3, 4),
            Ok(Report {
                n: 5,
                t: 3,
                transitions: 34,
                resumes: 9
            })
        );
    }

    #[test]
    fn test_verify_invalid() {
        assert!(matches!(
            verify_combinations(3, 3, 0),
            Err(CheckError::Generator(RevdoorError::InvalidParameters { .. }))
        ));
        assert!(matches!(
            verify_combinations(80, 40, 0),
            Err(CheckError::TooLarge { n: 80, t: 40, .. })
        ));
    }

    #[test]
    fn test_many() {
        for n in 3..11 {
            for t in 2..n {
                verify_combinations(n, t, 3).unwrap();
            }
        }
        for n in 2..7 {
            for t in 2..7 {
                verify_combinations_with_replacement(n, t, 3).unwrap();
            }
        }
    }
}
