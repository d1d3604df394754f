//! Harmonic segmentation of the high range (T, n].
//!
//! ⌊n/x⌋ is a step function taking O(√n) distinct values. Every prime p in a
//! maximal interval where ⌊n/p⌋ is constant has that constant as its exponent
//! in n! (for p > √n, Legendre's sum collapses to its first term). The
//! divisor-jump identity gives each interval's right edge in closed form:
//! the largest x with ⌊n/x⌋ = v is ⌊n/v⌋.

use crate::common::isqrt;

/// A maximal run [lo, hi] of integers sharing ⌊n/x⌋ = `exponent`; every
/// prime inside has exactly that exponent in n!.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub lo: u64,
    pub hi: u64,
    pub exponent: u64,
}

impl Segment {
    /// Width of the closed interval.
    pub fn span(&self) -> u64 {
        self.hi - self.lo + 1
    }
}

/// Iterator over the segments covering (T, n] in increasing `lo` order,
/// strictly decreasing `exponent`. T = ⌊√n⌋ is recomputed from n rather than
/// trusted from a caller.
pub struct HighRangeSegmenter {
    n: u64,
    next_lo: u64,
    exhausted: bool,
}

impl HighRangeSegmenter {
    pub fn new(n: u64) -> HighRangeSegmenter {
        HighRangeSegmenter {
            n,
            next_lo: isqrt(n) + 1,
            exhausted: false,
        }
    }
}

impl Iterator for HighRangeSegmenter {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.exhausted || self.next_lo > self.n {
            return None;
        }
        let v = self.n / self.next_lo; // ≥ 1 while next_lo ≤ n
        let hi = self.n / v; // divisor jump: largest x with ⌊n/x⌋ = v
        let seg = Segment {
            lo: self.next_lo,
            hi,
            exponent: v,
        };
        match hi.checked_add(1) {
            Some(next) => self.next_lo = next,
            None => self.exhausted = true, // hi == u64::MAX
        }
        Some(seg)
    }
}
