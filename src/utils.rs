//! Plain lexicographic enumerators and counting, used as an independent
//! reference for the revolving-door generators.

/// Lexicographic t-subsets of `0..n`.
#[derive(Clone, Debug)]
pub struct CombineIter {
    n: usize,
    item: Option<Vec<usize>>,
}

impl CombineIter {
    pub fn new(n: usize, t: usize) -> CombineIter {
        assert!(t <= n);
        CombineIter {
            n,
            item: Some((0..t).collect()),
        }
    }
}

impl Iterator for CombineIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.item.take()?;
        // the rightmost value that is not yet at its maximum n - t + i
        let offset = self.n - current.len();
        let mut succ = current.clone();
        if let Some(i) = (0..succ.len()).rev().find(|&i| succ[i] < offset + i) {
            let base = succ[i] + 1;
            for (j, v) in succ[i..].iter_mut().enumerate() {
                *v = base + j;
            }
            self.item = Some(succ);
        }
        Some(current)
    }
}

/// Lexicographic non-decreasing t-sequences over `0..n`.
#[derive(Clone, Debug)]
pub struct CombineWithRepIter {
    n: usize,
    item: Option<Vec<usize>>,
}

impl CombineWithRepIter {
    pub fn new(n: usize, t: usize) -> CombineWithRepIter {
        assert!(n > 0 || t == 0);
        CombineWithRepIter {
            n,
            item: Some(vec![0; t]),
        }
    }
}

impl Iterator for CombineWithRepIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.item.take()?;
        let mut succ = current.clone();
        if let Some(i) = succ.iter().rposition(|&v| v + 1 < self.n) {
            let value = succ[i] + 1;
            succ[i..].iter_mut().for_each(|v| *v = value);
            self.item = Some(succ);
        }
        Some(current)
    }
}

impl std::iter::FusedIterator for CombineIter {}
impl std::iter::FusedIterator for CombineWithRepIter {}

/// Binomial coefficient C(n, k), or None if it does not fit in a `u64`.
pub fn combinations(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = std::cmp::min(k, n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // exact: acc * (n - i) is divisible by i + 1
        acc = acc * u128::from(n - i) / u128::from(i + 1);
        if acc > u128::from(u64::MAX) {
            return None;
        }
    }
    Some(acc as u64)
}
