use super::*;
use crate::common::FactorError;
use crate::segments::HighRangeSegmenter;

#[test]
fn test_lucy_pi_known_values() {
    // π at the full-table point x = n.
    for (n, pi_n) in [
        (1u64, 0u64),
        (2, 1),
        (3, 2),
        (10, 4),
        (100, 25),
        (1000, 168),
        (10_000, 1229),
        (1_000_000, 78498),
        (10_000_000, 664_579),
    ] {
        let lucy = LucyCounter::new(n);
        assert_eq!(lucy.pi(n).unwrap(), pi_n, "π({n})");
    }
}

#[test]
fn test_lucy_pi_small_arguments() {
    let lucy = LucyCounter::new(10_000);
    // Everything ≤ √n is answerable directly.
    assert_eq!(lucy.pi(0).unwrap(), 0);
    assert_eq!(lucy.pi(1).unwrap(), 0);
    assert_eq!(lucy.pi(2).unwrap(), 1);
    assert_eq!(lucy.pi(10).unwrap(), 4);
    assert_eq!(lucy.pi(100).unwrap(), 25);
}

#[test]
fn test_lucy_pi_key_points_match_sieve() {
    let n = 100_000u64;
    let lucy = LucyCounter::new(n);
    for k in 1..=316 {
        let x = n / k;
        let expected = crate::sieve::small_primes(x).len() as u64;
        assert_eq!(lucy.pi(x).unwrap(), expected, "π({x})");
    }
}

#[test]
fn test_lucy_rejects_non_key_points() {
    let lucy = LucyCounter::new(100);
    // 97 is not of the form ⌊100/k⌋ and is above √100.
    assert!(matches!(lucy.pi(97), Err(FactorError::Unsupported(_))));
    // Beyond the table limit entirely.
    assert!(matches!(lucy.pi(101), Err(FactorError::Unsupported(_))));
    assert_eq!(lucy.limit(), 100);
}

#[test]
fn test_lucy_counts_all_segments_of_n() {
    // Segment boundaries are key points by construction, so counting never
    // leaves the table; results must agree with direct enumeration.
    let n = 1_000_000u64;
    let lucy = LucyCounter::new(n);
    let enumerative = EnumerativeCounter::new(n + 1);
    let mut total = 0;
    for seg in HighRangeSegmenter::new(n) {
        let counted = lucy.count(seg.lo, seg.hi).unwrap();
        assert_eq!(counted, enumerative.count(seg.lo, seg.hi).unwrap(), "{seg:?}");
        total += counted;
    }
    // π(10^6) − π(10^3) primes above T = 1000.
    assert_eq!(total, 78498 - 168);
}

#[test]
fn test_enumerative_counter_budget() {
    let counter = EnumerativeCounter::new(1000);
    assert_eq!(counter.count(0, 999).unwrap(), 168);
    assert!(matches!(
        counter.count(0, 2000),
        Err(FactorError::ResourceExceeded(_))
    ));
    assert!(matches!(
        counter.enumerate(1_000_000, 2_000_000),
        Err(FactorError::ResourceExceeded(_))
    ));
}

#[test]
fn test_enumerative_counter_enumerate() {
    let counter = EnumerativeCounter::new(1 << 16);
    assert_eq!(counter.enumerate(90, 100).unwrap(), vec![97]);
    assert_eq!(counter.enumerate(2, 30).unwrap().len(), 10);
    assert_eq!(counter.count(2, 30).unwrap(), 10);
}

#[test]
fn test_counters_trivial_intervals() {
    let lucy = LucyCounter::new(50);
    let counter = EnumerativeCounter::new(1 << 16);
    for c in [&lucy as &dyn PrimeCounter, &counter] {
        assert_eq!(c.count(10, 9).unwrap(), 0); // empty interval
        assert_eq!(c.count(0, 1).unwrap(), 0); // below the first prime
    }
}
