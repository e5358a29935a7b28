//! Prime table built once per process by a sieve of Eratosthenes.
//!
//! The table keeps two views of the same set:
//! - `marks`: one byte per integer in `[0, limit]`, answering `is_prime` in O(1).
//! - `primes`: the ascending list of every prime `<= limit`, used to enumerate
//!   subtraction candidates and for exact lookups by binary search.
//!
//! Both views are immutable after construction and shared read-only by every
//! test case.

/// Ascending primes up to a fixed bound plus a per-integer primality marker.
pub struct PrimeTable {
    limit: u32,
    marks: Vec<bool>,
    primes: Vec<u32>,
}

impl PrimeTable {
    /// Sieve every integer in `[0, limit]`.
    ///
    /// Algorithm:
    /// - mark everything prime except 0 and 1;
    /// - for each still-marked `p` with `p * p <= limit`, clear the multiples of
    ///   `p` starting at `p * p`;
    /// - collect the surviving indices in ascending order.
    pub fn new(limit: u32) -> Self {
        let n = limit as usize;
        let mut marks = vec![true; n + 1];
        marks[0] = false;
        if n >= 1 {
            marks[1] = false;
        }

        // usize arithmetic: p * p never overflows for a u32 limit on 64-bit targets
        let mut p = 2usize;
        while p * p <= n {
            if marks[p] {
                let mut multiple = p * p;
                while multiple <= n {
                    marks[multiple] = false;
                    multiple += p;
                }
            }
            p += 1;
        }

        let mut primes = Vec::with_capacity(estimate_prime_count(n));
        primes.extend(
            marks
                .iter()
                .enumerate()
                .filter(|&(_, &prime)| prime)
                .map(|(value, _)| value as u32),
        );

        Self {
            limit,
            marks,
            primes,
        }
    }

    /// Largest integer covered by the table.
    #[inline(always)]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Every prime `<= limit`, ascending.
    #[inline(always)]
    pub fn primes(&self) -> &[u32] {
        &self.primes
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// O(1) marker lookup. Values above the limit are reported as not prime.
    #[inline(always)]
    pub fn is_prime(&self, n: u32) -> bool {
        self.marks.get(n as usize).copied().unwrap_or(false)
    }

    /// Exact lookup against the ascending sequence (binary search).
    #[inline]
    pub fn contains(&self, n: u32) -> bool {
        self.primes.binary_search(&n).is_ok()
    }

    /// The primes strictly less than `n`.
    #[inline]
    pub fn primes_below(&self, n: u32) -> &[u32] {
        let end = self.primes.partition_point(|&p| p < n);
        &self.primes[..end]
    }
}

/// Upper estimate of pi(n), so collecting never reallocates.
fn estimate_prime_count(n: usize) -> usize {
    if n < 17 {
        return 6;
    }
    let nf = n as f64;
    (1.26 * nf / nf.ln()) as usize
}
