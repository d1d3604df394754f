use thiserror::Error;

/// Errors surfaced by the factorial factorization core.
///
/// All failures are synchronous: either the full, verified result is
/// produced or one of these is returned — never a partial factorization.
#[derive(Debug, Error)]
pub enum FactorError {
    /// n is malformed or wider than the 64-bit core width.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A requested enumeration or expansion is too large for the configured
    /// budget, or the computation was cancelled between segments.
    #[error("resource budget exceeded: {0}")]
    ResourceExceeded(String),

    /// The sublinear counter was queried outside its precomputed key points.
    #[error("unsupported query: {0}")]
    Unsupported(String),

    /// Guarded native-width overflow; surfacing one indicates a bug.
    #[error("arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),
}
