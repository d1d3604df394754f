//! Prime generation: a bit-packed base sieve plus a blocked segmented sieve.
//!
//! Two access patterns are served:
//!
//! - [`SegmentedSieve`] — lazy iterator over *all* primes up to a limit,
//!   sweeping fixed-size blocks so memory stays O(√limit) regardless of how
//!   many primes are produced.
//! - [`primes_in`] / [`count_in`] — one bounded window [lo, hi] anywhere on
//!   the number line, guarded by an explicit span budget so callers can
//!   never ask for an infeasible materialization by accident.
//!
//! All buffers are owned per call; there is no shared or static sieve state,
//! so every entry point is reentrant and safe to run from parallel workers.

use crate::common::{FactorError, isqrt, prime_count_upper};

/// Generate all primes ≤ `limit` with an odd-only bit-packed sieve.
///
/// One bit per odd number (index i represents 2i + 1). Intended for base
/// primes — callers wanting primes near a large n should use
/// [`SegmentedSieve`] or [`primes_in`] instead of sieving up to n directly.
pub fn small_primes(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return vec![];
    }
    // Highest index representing an odd number ≤ limit.
    let h = (limit - 1) / 2;
    let mut bits = vec![!0u64; (h / 64 + 1) as usize];
    bits[0] &= !1; // 1 is not prime

    let sqrt = isqrt(limit);
    for i in 1..=(sqrt / 2) {
        if bits[(i >> 6) as usize] >> (i & 63) & 1 == 1 {
            let p = 2 * i + 1;
            let mut j = 2 * i * (i + 1); // index of p², = (p² - 1) / 2
            while j <= h {
                bits[(j >> 6) as usize] &= !(1u64 << (j & 63));
                j += p;
            }
        }
    }

    let mut primes = Vec::with_capacity(prime_count_upper(limit));
    primes.push(2);
    for i in 1..=h {
        if bits[(i >> 6) as usize] >> (i & 63) & 1 == 1 {
            primes.push(2 * i + 1);
        }
    }
    primes
}

/// Lazy iterator over all primes ≤ `limit`.
///
/// Base primes up to √limit come from the classic sieve; the range
/// (√limit, limit] is then swept in blocks of ≈ √limit numbers. Each base
/// prime keeps a next-multiple cursor that survives from block to block, so
/// no block ever recomputes first multiples from scratch. Block boundaries
/// are deterministic for a given limit.
pub struct SegmentedSieve {
    limit: u64,
    block_size: u64,
    base: Vec<u64>,
    next_multiple: Vec<u64>,
    buffer: Vec<u64>,
    pos: usize,
    next_lo: u64,
    exhausted: bool,
}

impl SegmentedSieve {
    pub fn new(limit: u64) -> SegmentedSieve {
        let sqrt = isqrt(limit);
        let base = small_primes(sqrt);
        let next_lo = sqrt + 1;
        // First multiple of p inside [next_lo, ..]; never below p² since
        // smaller composites were already covered by the base sieve range.
        let next_multiple = base
            .iter()
            .map(|&p| (p * p).max((next_lo + p - 1) / p * p))
            .collect();
        // Base primes are the initial output buffer.
        let buffer = base.clone();
        SegmentedSieve {
            limit,
            block_size: sqrt.max(256),
            base,
            next_multiple,
            buffer,
            pos: 0,
            next_lo,
            exhausted: false,
        }
    }

    /// Sieve the next block [next_lo, next_lo + block_size) into the buffer.
    fn sieve_block(&mut self) {
        let lo = self.next_lo;
        let hi = lo.saturating_add(self.block_size - 1).min(self.limit);
        let len = (hi - lo + 1) as usize;
        let mut composite = vec![false; len];

        for (idx, &p) in self.base.iter().enumerate() {
            let mut m = self.next_multiple[idx];
            while m <= hi {
                composite[(m - lo) as usize] = true;
                m = match m.checked_add(p) {
                    Some(next) => next,
                    None => break,
                };
            }
            self.next_multiple[idx] = m;
        }

        self.buffer.clear();
        self.pos = 0;
        for (off, &c) in composite.iter().enumerate() {
            if !c {
                self.buffer.push(lo + off as u64);
            }
        }
        match hi.checked_add(1) {
            Some(next) => self.next_lo = next,
            None => self.exhausted = true, // hi == u64::MAX
        }
    }
}

impl Iterator for SegmentedSieve {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        loop {
            if self.pos < self.buffer.len() {
                let p = self.buffer[self.pos];
                self.pos += 1;
                return Some(p);
            }
            if self.exhausted || self.next_lo > self.limit {
                return None;
            }
            self.sieve_block();
        }
    }
}

/// Mark composites in the window [lo, hi]; returns one flag per value,
/// `true` meaning prime. Fails with `ResourceExceeded` when the window is
/// wider than `budget`.
fn mark_window(lo: u64, hi: u64, budget: u64) -> Result<Vec<bool>, FactorError> {
    let span = hi - lo + 1;
    if span > budget {
        return Err(FactorError::ResourceExceeded(format!(
            "window [{lo}, {hi}] spans {span} values, budget is {budget}"
        )));
    }

    let mut is_prime = vec![true; span as usize];
    for v in lo..=hi.min(1) {
        is_prime[(v - lo) as usize] = false;
    }

    for p in small_primes(isqrt(hi)) {
        // First multiple of p in the window, but never p itself. Checked
        // arithmetic: windows may sit right below u64::MAX.
        let first = match lo.div_ceil(p).checked_mul(p) {
            Some(m) => m.max(p * p),
            None => continue,
        };
        let mut m = first;
        while m <= hi {
            is_prime[(m - lo) as usize] = false;
            m = match m.checked_add(p) {
                Some(next) => next,
                None => break,
            };
        }
    }
    Ok(is_prime)
}

/// All primes in the closed window [lo, hi], ascending.
///
/// Cost scales with the window span (plus a base sieve up to √hi), so the
/// span is capped by `budget`.
pub fn primes_in(lo: u64, hi: u64, budget: u64) -> Result<Vec<u64>, FactorError> {
    if hi < lo || hi < 2 {
        return Ok(vec![]);
    }
    let flags = mark_window(lo, hi, budget)?;
    Ok(flags
        .iter()
        .enumerate()
        .filter(|&(_, &prime)| prime)
        .map(|(off, _)| lo + off as u64)
        .collect())
}

/// Number of primes in the closed window [lo, hi], without materializing them.
pub fn count_in(lo: u64, hi: u64, budget: u64) -> Result<u64, FactorError> {
    if hi < lo || hi < 2 {
        return Ok(0);
    }
    let flags = mark_window(lo, hi, budget)?;
    Ok(flags.iter().filter(|&&prime| prime).count() as u64)
}
