//! Low-range exponents via Legendre's formula:
//! e_p(n!) = Σ_{k≥1} ⌊n / p^k⌋.

use rayon::prelude::*;

use crate::common::isqrt;
use crate::sieve::SegmentedSieve;

/// Exponent of the prime `p` in n!.
///
/// The loop must stop *before* `power * p` can wrap: once `power > n / p`
/// every further term is ⌊n/p^k⌋ = 0 anyway, but a native-width multiply
/// would already have wrapped before that could be observed. Accumulation
/// is u128 so the sum stays wide even when n sits at the top of u64.
pub fn legendre_exponent(n: u64, p: u64) -> u128 {
    debug_assert!(p >= 2, "legendre_exponent requires a prime p >= 2");
    let mut total: u128 = 0;
    let mut power = p;
    loop {
        total += (n / power) as u128;
        if power > n / p {
            break;
        }
        power *= p;
    }
    total
}

/// (p, e_p) for every prime p ≤ T = ⌊√n⌋, ascending by prime.
///
/// Each prime's exponent is independent of every other's, so the evaluation
/// is a parallel map; the indexed collect keeps the ascending order of the
/// underlying sieve.
pub fn low_range_exponents(n: u64) -> Vec<(u64, u128)> {
    let t = isqrt(n);
    let primes: Vec<u64> = SegmentedSieve::new(t).collect();
    primes
        .into_par_iter()
        .map(|p| (p, legendre_exponent(n, p)))
        .collect()
}
