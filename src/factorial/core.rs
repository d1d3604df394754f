//! Assembly of the full factorization of n! from the two regimes.
//!
//! Low range (p ≤ T = ⌊√n⌋): per-prime Legendre exponents. High range
//! (T < p ≤ n): harmonic segments, each counted or enumerated by the chosen
//! backend. The two phases touch disjoint prime ranges by construction and
//! merge without coordination.
//!
//! Output is an explicit choice: a fully expanded per-prime mapping is
//! Θ(n / log n) entries and only makes sense while n is enumerable; past
//! that the aggregate view (low-range mapping plus exponent→count rows per
//! segment) is the product. Neither mode ever returns a partial result —
//! any failure aborts the whole call.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rayon::prelude::*;

use crate::common::FactorError;
use crate::count::{CounterMode, EnumerativeCounter, LucyCounter, PrimeCounter};
use crate::legendre::low_range_exponents;
use crate::segments::{HighRangeSegmenter, Segment};

/// Default ceiling on any window the enumerative sieve may materialize, and
/// on n for expanded output.
pub const DEFAULT_BUDGET: u64 = 1 << 26;

/// Segments are dispatched to workers in chunks of this many; cancellation
/// is observed between chunks, never mid-count.
const SEGMENT_CHUNK: usize = 8192;

/// Prime → exponent mapping with ascending-by-prime iteration.
///
/// Invariants: every key is prime, every exponent is > 0, and a finished
/// mapping is complete — each prime ≤ n appears exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Factorization {
    map: BTreeMap<u64, BigUint>,
}

impl Factorization {
    pub fn insert(&mut self, prime: u64, exponent: BigUint) {
        debug_assert!(!exponent.is_zero(), "zero exponent for prime {prime}");
        self.map.insert(prime, exponent);
    }

    pub fn exponent_of(&self, prime: u64) -> Option<&BigUint> {
        self.map.get(&prime)
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, u64, BigUint> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Σ e_p over the mapping (number of prime factors with multiplicity).
    pub fn total_exponents(&self) -> BigUint {
        self.map.values().sum()
    }
}

impl<'a> IntoIterator for &'a Factorization {
    type Item = (&'a u64, &'a BigUint);
    type IntoIter = std::collections::btree_map::Iter<'a, u64, BigUint>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

/// One aggregate-view row: `primes` primes in [lo, hi], each with exponent
/// `exponent` in n!.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentCount {
    pub lo: u64,
    pub hi: u64,
    pub exponent: u64,
    pub primes: u64,
}

/// Output shape selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Materialize every prime ≤ n with its exponent. Refused with
    /// `ResourceExceeded` when n exceeds the enumeration budget.
    Expand,
    /// Low-range mapping plus one exponent→count row per high segment.
    Aggregate,
    /// Expand while n fits the budget, aggregate beyond.
    Auto,
}

/// The factorization of n!, in whichever shape was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactorialFactors {
    Expanded(Factorization),
    Aggregate {
        low: Factorization,
        high: Vec<SegmentCount>,
        /// π(n): low-range primes plus all segment counts.
        distinct_primes: BigUint,
    },
}

impl FactorialFactors {
    /// Number of distinct primes dividing n!, i.e. π(n).
    pub fn distinct_primes(&self) -> BigUint {
        match self {
            FactorialFactors::Expanded(map) => BigUint::from(map.len()),
            FactorialFactors::Aggregate { distinct_primes, .. } => distinct_primes.clone(),
        }
    }

    /// Σ e_p over all primes — the number of prime factors of n! counted
    /// with multiplicity. Cheap in both shapes; agreement across backends
    /// is a useful cross-check.
    pub fn total_exponent_sum(&self) -> BigUint {
        match self {
            FactorialFactors::Expanded(map) => map.total_exponents(),
            FactorialFactors::Aggregate { low, high, .. } => {
                let mut sum = low.total_exponents();
                for row in high {
                    sum += BigUint::from(row.exponent as u128 * row.primes as u128);
                }
                sum
            }
        }
    }

    /// The per-prime mapping, when this is the expanded shape.
    pub fn expanded(&self) -> Option<&Factorization> {
        match self {
            FactorialFactors::Expanded(map) => Some(map),
            FactorialFactors::Aggregate { .. } => None,
        }
    }
}

/// Knobs for [`factorize_factorial`]. `budget` caps every window the
/// enumerative sieve may materialize; `cancel` is observed cooperatively at
/// segment-chunk granularity.
#[derive(Debug, Clone)]
pub struct FactorizeConfig {
    pub counter: CounterMode,
    pub output: OutputMode,
    pub budget: u64,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for FactorizeConfig {
    fn default() -> Self {
        FactorizeConfig {
            counter: CounterMode::Auto,
            output: OutputMode::Auto,
            budget: DEFAULT_BUDGET,
            cancel: None,
        }
    }
}

/// Compute the prime factorization of n! without computing n!.
///
/// n enters as a `BigUint` but must fit the 64-bit core width (which covers
/// the 10^18-scale target with headroom); anything wider is `InvalidInput`.
pub fn factorize_factorial(
    n: &BigUint,
    cfg: &FactorizeConfig,
) -> Result<FactorialFactors, FactorError> {
    let n = n.to_u64().ok_or_else(|| {
        FactorError::InvalidInput(format!("n = {n} does not fit the 64-bit core width"))
    })?;
    factorize_factorial_u64(n, cfg)
}

/// Native-width entry point; see [`factorize_factorial`].
pub fn factorize_factorial_u64(
    n: u64,
    cfg: &FactorizeConfig,
) -> Result<FactorialFactors, FactorError> {
    let expand = match cfg.output {
        OutputMode::Expand => {
            if n > cfg.budget {
                return Err(FactorError::ResourceExceeded(format!(
                    "expanded output for n = {n} exceeds the enumeration budget {}",
                    cfg.budget
                )));
            }
            true
        }
        OutputMode::Aggregate => false,
        OutputMode::Auto => n <= cfg.budget,
    };

    if expand {
        expand_factorization(n, cfg).map(FactorialFactors::Expanded)
    } else {
        aggregate_factorization(n, cfg)
    }
}

fn check_cancel(cancel: &Option<Arc<AtomicBool>>) -> Result<(), FactorError> {
    if let Some(flag) = cancel {
        if flag.load(Ordering::Relaxed) {
            return Err(FactorError::ResourceExceeded(
                "computation cancelled".to_string(),
            ));
        }
    }
    Ok(())
}

/// Low regime: Legendre exponents for every prime ≤ ⌊√n⌋.
fn low_phase(n: u64, cancel: &Option<Arc<AtomicBool>>) -> Result<Factorization, FactorError> {
    check_cancel(cancel)?;
    let mut low = Factorization::default();
    for (p, e) in low_range_exponents(n) {
        low.insert(p, BigUint::from(e));
    }
    Ok(low)
}

/// Full per-prime expansion. Only reachable once n ≤ budget, which also
/// bounds every segment span, so enumeration cannot fail mid-way.
fn expand_factorization(n: u64, cfg: &FactorizeConfig) -> Result<Factorization, FactorError> {
    let mut map = low_phase(n, &cfg.cancel)?;
    let low_len = map.len();

    let counter = EnumerativeCounter::new(cfg.budget);
    let segments: Vec<Segment> = HighRangeSegmenter::new(n).collect();
    for chunk in segments.chunks(SEGMENT_CHUNK) {
        check_cancel(&cfg.cancel)?;
        let tagged: Result<Vec<Vec<(u64, u64)>>, FactorError> = chunk
            .par_iter()
            .map(|seg| {
                let primes = counter.enumerate(seg.lo, seg.hi)?;
                Ok(primes.into_iter().map(|p| (p, seg.exponent)).collect())
            })
            .collect();
        for (p, e) in tagged?.into_iter().flatten() {
            // High-range keys are > T, disjoint from the low phase.
            debug_assert!(map.exponent_of(p).is_none());
            map.insert(p, BigUint::from(e));
        }
    }

    debug_assert!(verify_distinct_total(n, (map.len() - low_len) as u64, low_len as u64));
    Ok(map)
}

/// Aggregate assembly: count each segment with the selected backend.
fn aggregate_factorization(
    n: u64,
    cfg: &FactorizeConfig,
) -> Result<FactorialFactors, FactorError> {
    let low = low_phase(n, &cfg.cancel)?;

    let backend = HighBackend::select(n, cfg);
    let segments: Vec<Segment> = HighRangeSegmenter::new(n).collect();
    let mut high = Vec::with_capacity(segments.len());
    for chunk in segments.chunks(SEGMENT_CHUNK) {
        check_cancel(&cfg.cancel)?;
        let counted: Result<Vec<SegmentCount>, FactorError> = chunk
            .par_iter()
            .map(|seg| {
                let primes = backend.count(seg)?;
                Ok(SegmentCount {
                    lo: seg.lo,
                    hi: seg.hi,
                    exponent: seg.exponent,
                    primes,
                })
            })
            .collect();
        high.extend(counted?);
    }

    let high_total: u64 = high.iter().map(|row| row.primes).sum();
    if let HighBackend::Sublinear { lucy, .. } = &backend {
        // π(n) must equal low-range primes plus all segment counts.
        debug_assert_eq!(lucy.pi(n)?, low.len() as u64 + high_total);
    }
    let distinct_primes = BigUint::from(low.len() as u64 + high_total);

    Ok(FactorialFactors::Aggregate {
        low,
        high,
        distinct_primes,
    })
}

/// Debug-build cross-check of the π(n) completeness invariant.
#[cfg(debug_assertions)]
fn verify_distinct_total(n: u64, high_len: u64, low_len: u64) -> bool {
    if n < 2 {
        return high_len == 0 && low_len == 0;
    }
    match LucyCounter::new(n).pi(n) {
        Ok(pi_n) => pi_n == high_len + low_len,
        Err(_) => false,
    }
}

#[cfg(not(debug_assertions))]
fn verify_distinct_total(_n: u64, _high_len: u64, _low_len: u64) -> bool {
    true
}

/// High-range counting strategy, resolved once per call.
enum HighBackend {
    Enumerative(EnumerativeCounter),
    Sublinear {
        lucy: LucyCounter,
        fallback: EnumerativeCounter,
    },
}

impl HighBackend {
    fn select(n: u64, cfg: &FactorizeConfig) -> HighBackend {
        let enumerative = EnumerativeCounter::new(cfg.budget);
        let sublinear = match cfg.counter {
            CounterMode::Enumerate => false,
            CounterMode::Sublinear => true,
            CounterMode::Auto => n > cfg.budget,
        };
        if sublinear {
            HighBackend::Sublinear {
                lucy: LucyCounter::new(n),
                fallback: enumerative,
            }
        } else {
            HighBackend::Enumerative(enumerative)
        }
    }

    fn count(&self, seg: &Segment) -> Result<u64, FactorError> {
        match self {
            HighBackend::Enumerative(counter) => counter.count(seg.lo, seg.hi),
            HighBackend::Sublinear { lucy, fallback } => {
                match lucy.count(seg.lo, seg.hi) {
                    // Out-of-table query: recoverable per segment by
                    // enumerating, if the span fits the budget.
                    Err(FactorError::Unsupported(_)) => fallback.count(seg.lo, seg.hi),
                    other => other,
                }
            }
        }
    }
}
