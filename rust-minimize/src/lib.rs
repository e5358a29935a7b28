//! Minimize Again
//! =========================================
//!
//! Problem
//! -------
//! Given an array `a` and a budget `k`, replace up to `k` non-prime elements
//! with 2, then minimize the sum over all elements of
//!   cost(x) = the minimum number of primes (repetition allowed) summing to x.
//! A prime costs 1.
//!
//! Approach
//! --------
//! 1) Sieve (`sieve`):
//!    - Eratosthenes over `[0, limit]` (10^7 by default), built once per
//!      process. Keeps a byte marker per integer and the ascending prime list.
//!
//! 2) Cost (`cost`, `memo`):
//!    - cost(0) = 0, cost(prime) = 1, otherwise 1 + min cost(x - p) over
//!      primes p < x; 1 is infeasible.
//!    - A direct-mapped memo (one byte per value) owned by the `CostEngine`
//!      makes each value computed at most once.
//!    - Two-prime splits settle most values at 2 without looking deeper;
//!      the rest go through an explicit frame stack instead of recursion.
//!
//! 3) Greedy (`solver`):
//!    - Pick the `min(k, #non-primes)` largest non-prime values, set them to 2
//!      and sum the costs.
//!
//! Performance notes
//! -----------------
//! - The sieve and the memo together take ~23 MB at the default limit and are
//!   allocated once; nothing is allocated per value.
//! - Build with release settings (opt-level=3, lto=thin, codegen-units=1,
//!   panic=abort).
//!
//! Correctness notes
//! -----------------
//! - Infeasibility is `None`, never a magic count, so it can't leak into a sum.
//! - Values outside `[1, limit]` and an element left at 1 are reported as
//!   errors rather than producing an answer.

pub mod cost;
pub mod input;
pub mod logging;
pub mod memo;
pub mod server;
pub mod sieve;
pub mod solver;

pub use cost::{Cost, CostEngine, Terms};
pub use input::parse_cases;
pub use server::run_server;
pub use sieve::PrimeTable;
pub use solver::{replacement_targets, Solver, TestCase};

/// Sieve bound used when none is given.
pub const DEFAULT_LIMIT: u32 = 10_000_000;
