//! Prime counting over an interval, behind a swappable backend seam.
//!
//! Two conformant strategies exist: enumerate the primes (correct anywhere,
//! cost scales with the interval width) or answer from a precomputed
//! sublinear π table ([`super::LucyCounter`] — counts only, no identities).
//! Keeping the seam a trait lets the assembler pick per segment and lets
//! benchmarks race the backends against each other.

use crate::common::FactorError;
use crate::sieve;

/// Backend selection for high-range prime counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMode {
    /// Segmented sieving of every interval. Correct but cost scales with
    /// interval width; guarded by the enumeration budget.
    Enumerate,
    /// Sublinear counting-function table; counts without enumerating.
    Sublinear,
    /// Sublinear once n exceeds the enumeration budget, enumerative below.
    Auto,
}

/// Count primes in closed intervals [lo, hi].
pub trait PrimeCounter: Sync {
    fn count(&self, lo: u64, hi: u64) -> Result<u64, FactorError>;
}

/// Counts by sieving the interval. Also able to produce the primes
/// themselves, which the sublinear backend cannot.
#[derive(Debug, Clone, Copy)]
pub struct EnumerativeCounter {
    budget: u64,
}

impl EnumerativeCounter {
    pub fn new(budget: u64) -> EnumerativeCounter {
        EnumerativeCounter { budget }
    }

    /// The primes in [lo, hi], ascending. `ResourceExceeded` past the budget.
    pub fn enumerate(&self, lo: u64, hi: u64) -> Result<Vec<u64>, FactorError> {
        sieve::primes_in(lo, hi, self.budget)
    }
}

impl PrimeCounter for EnumerativeCounter {
    fn count(&self, lo: u64, hi: u64) -> Result<u64, FactorError> {
        sieve::count_in(lo, hi, self.budget)
    }
}
