pub mod error;

pub use error::FactorError;

/// Integer square root — exact for all u64 values.
/// Newton-corrected from an f64 seed; the f64 mantissa alone is not enough
/// above 2^53, so both directions are re-checked with overflow-safe squares.
#[inline]
pub fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u64;
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) {
        x += 1;
    }
    x
}

/// Prime-counting upper bound for pre-allocation, from Dusart's
/// π(x) ≤ x/ln x · (1 + 1.2762/ln x) — guarantees zero reallocation.
#[inline]
pub fn prime_count_upper(n: u64) -> usize {
    if n < 10 {
        return 4;
    }
    let ln = (n as f64).ln();
    (n as f64 / ln * (1.0 + 1.2762 / ln)) as usize + 1
}

/// Reset SIGPIPE to default behavior (SIG_DFL).
/// Rust sets SIGPIPE to SIG_IGN by default, but a pipeline consumer going
/// away should kill the process (exit code 141 = 128 + 13) rather than turn
/// every write into an error. Called at the start of main().
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
