//! Sublinear prime counting in the Lucy_Hedgehog formulation.
//!
//! S(v) starts as |{2..=v}| and is reduced prime by prime: after processing
//! all primes p ≤ √n, S(v) = π(v). Only the O(√n) distinct values of ⌊n/k⌋
//! ever need tracking, split across two arrays: `small[i]` for arguments
//! i ≤ √n and `large[k]` for arguments ⌊n/k⌋. Time O(n^(3/4)), space O(√n),
//! and no prime above √n is ever materialized.

use crate::common::{FactorError, isqrt};
use crate::count::PrimeCounter;

/// Precomputed π table for a fixed n, answering exactly the key points
/// {1..⌊√n⌋} ∪ {⌊n/k⌋}. Harmonic segment boundaries of the same n are always
/// key points, so the high-range pipeline never leaves the table; anything
/// else gets `Unsupported` and the caller falls back to enumeration.
pub struct LucyCounter {
    n: u64,
    root: u64,
    /// small[i] = π(i) for i ≤ root
    small: Vec<u64>,
    /// large[k] = π(⌊n/k⌋) for 1 ≤ k ≤ root
    large: Vec<u64>,
}

impl LucyCounter {
    pub fn new(n: u64) -> LucyCounter {
        let root = isqrt(n);
        let r = root as usize;

        // S(v) = v - 1: every integer in 2..=v assumed prime to start.
        let mut small: Vec<u64> = (0..=root).map(|i| i.saturating_sub(1)).collect();
        let mut large: Vec<u64> = (0..=root)
            .map(|k| if k == 0 { 0 } else { n / k - 1 })
            .collect();

        for p in 2..=r {
            // p is prime exactly when the previous passes did not remove it.
            if small[p] == small[p - 1] {
                continue;
            }
            let pu = p as u64;
            let sp = small[p - 1]; // π(p − 1)
            let p2 = pu * pu;

            // Strip numbers whose least prime factor is p from every key
            // point ≥ p². Larger keys first: they read values from this
            // same pass's *unmodified* smaller arguments.
            let kmax = root.min(n / p2);
            for k in 1..=kmax {
                let d = k * pu;
                let s_nd = if d <= root {
                    large[d as usize]
                } else {
                    small[(n / d) as usize]
                };
                large[k as usize] -= s_nd - sp;
            }
            for i in (p2..=root).rev() {
                small[i as usize] -= small[(i / pu) as usize] - sp;
            }
        }

        LucyCounter { n, root, small, large }
    }

    /// The n this table was built for; π is answerable up to here.
    pub fn limit(&self) -> u64 {
        self.n
    }

    /// π(x) for x a key point of the table.
    pub fn pi(&self, x: u64) -> Result<u64, FactorError> {
        if x <= self.root {
            return Ok(self.small[x as usize]);
        }
        if x > self.n {
            return Err(FactorError::Unsupported(format!(
                "π({x}) is beyond the table limit {}",
                self.n
            )));
        }
        let k = self.n / x;
        if self.n / k != x {
            return Err(FactorError::Unsupported(format!(
                "π({x}) is not a key point of the table for {}",
                self.n
            )));
        }
        Ok(self.large[k as usize])
    }
}

impl PrimeCounter for LucyCounter {
    fn count(&self, lo: u64, hi: u64) -> Result<u64, FactorError> {
        if hi < lo || hi < 2 {
            return Ok(0);
        }
        let below = if lo <= 2 { 0 } else { self.pi(lo - 1)? };
        Ok(self.pi(hi)? - below)
    }
}
