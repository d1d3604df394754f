// Allow pre-existing clippy lints across the codebase
#![allow(
    clippy::manual_div_ceil,
    clippy::manual_range_contains,
    clippy::needless_range_loop,
    clippy::unnecessary_map_or
)]

/// Use mimalloc as the global allocator for all binaries.
/// 2-3x faster than glibc malloc for small allocations,
/// better thread-local caching, and reduced fragmentation.
/// Matters here: the expanded output path does one small alloc per prime.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod count;
pub mod factorial;
pub mod legendre;
pub mod segments;
pub mod sieve;
