//! Minimum number of primes (repetition allowed) summing to a value.
//!
//! Definition
//! ----------
//!   cost(0)     = 0
//!   cost(p)     = 1                              for p prime
//!   cost(n)     = 1 + min { cost(n - p) : p prime, p < n }
//!   cost(1)     = infeasible (no prime below 1, and 1 is not prime)
//!
//! Evaluation
//! ----------
//! - Results live in a `CostMemo` owned by the engine, so every value is
//!   computed at most once per engine.
//! - "Settling" a value answers it without looking at sub-values whenever
//!   possible:
//!     * prime -> 1
//!     * splits into two primes -> 2 (a non-prime can't do better)
//!     * an odd value can only split as `2 + (n - 2)`, since any other pair of
//!       primes has an even sum.
//! - Values that don't settle cost at least 3. They are evaluated on an
//!   explicit frame stack (no call recursion):
//!     * Scan: take the minimum over sub-values that settle; stop at 3.
//!       Sub-values that don't settle cost >= 3 themselves, so they can only
//!       matter when the scan found nothing at or below 4.
//!     * Descend: only then walk the primes again and push a frame for each
//!       unsettled sub-value before using it.
//!
//! Both shortcuts only skip candidates that cannot lower the minimum, so the
//! result is exactly the definition above.

use anyhow::{bail, Result};
use arrayvec::ArrayVec;
use tracing::trace;

use crate::memo::CostMemo;
use crate::sieve::PrimeTable;

/// Minimum number of prime terms, or `None` when no sum of primes exists.
pub type Cost = Option<u32>;

pub const MAX_TERMS: usize = 4;

/// One concrete minimal decomposition.
pub type Terms = ArrayVec<u32, MAX_TERMS>;

/// Cost lower bound of a non-prime that has no two-prime split.
const UNSETTLED_FLOOR: u32 = 3;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scan,
    Descend,
}

struct Frame {
    num: u32,
    next: usize,
    best: Cost,
    phase: Phase,
}

impl Frame {
    #[inline(always)]
    fn new(num: u32) -> Self {
        Self {
            num,
            next: 0,
            best: None,
            phase: Phase::Scan,
        }
    }

    #[inline(always)]
    fn offer(&mut self, sub_cost: Cost) {
        if let Some(count) = sub_cost {
            let candidate = count + 1;
            self.best = Some(self.best.map_or(candidate, |best| best.min(candidate)));
        }
    }
}

/// Memoized minimum-prime-count evaluator over a shared `PrimeTable`.
pub struct CostEngine<'a> {
    table: &'a PrimeTable,
    memo: CostMemo,
}

impl<'a> CostEngine<'a> {
    /// The memo is sized to the table limit up front.
    pub fn new(table: &'a PrimeTable) -> Self {
        Self {
            table,
            memo: CostMemo::with_limit(table.limit()),
        }
    }

    #[inline(always)]
    pub fn table(&self) -> &'a PrimeTable {
        self.table
    }

    /// Number of values computed so far.
    #[inline(always)]
    pub fn cached(&self) -> usize {
        self.memo.filled()
    }

    /// Cost of any integer.
    ///
    /// Negative values are infeasible and never stored. Values above the
    /// table limit are rejected.
    pub fn solve(&mut self, num: i64) -> Result<Cost> {
        if num < 0 {
            return Ok(None);
        }
        let limit = self.table.limit();
        match u32::try_from(num) {
            Ok(n) if n <= limit => Ok(self.min_terms(n)),
            _ => bail!("{num} is above the prime table limit {limit}"),
        }
    }

    /// Cost of a value within `[0, limit]`.
    pub fn min_terms(&mut self, num: u32) -> Cost {
        debug_assert!(num <= self.table.limit());
        if let Some(cost) = self.settle(num) {
            return cost;
        }
        self.run_frames(num)
    }

    /// One minimal list of primes summing to `num`, sorted ascending.
    ///
    /// Returns `None` if `num` is infeasible or needs more than `MAX_TERMS`
    /// primes (never the case for values up to 10^7).
    pub fn decompose(&mut self, num: u32) -> Option<Terms> {
        let table = self.table;
        let mut terms = Terms::new();
        let mut rest = num;
        let mut count = self.min_terms(rest)?;

        while count > 1 {
            let p = table
                .primes_below(rest)
                .iter()
                .copied()
                .find(|&p| self.min_terms(rest - p) == Some(count - 1))?;
            terms.try_push(p).ok()?;
            rest -= p;
            count -= 1;
        }
        if count == 1 {
            terms.try_push(rest).ok()?;
        }

        terms.sort_unstable();
        Some(terms)
    }

    /// Answer `num` from the memo or the cheap rules, storing what it finds.
    /// `None` means `num` needs the frame walk.
    #[inline]
    fn settle(&mut self, num: u32) -> Option<Cost> {
        if num == 0 {
            return Some(Some(0));
        }
        if let Some(cost) = self.memo.get(num) {
            return Some(cost);
        }

        let cost = if self.table.is_prime(num) {
            Some(1)
        } else if self.has_prime_pair(num) {
            Some(2)
        } else if num == 1 {
            None
        } else {
            return None;
        };
        self.memo.insert(num, cost);
        Some(cost)
    }

    /// True if `num = p + q` for primes `p`, `q`.
    #[inline]
    fn has_prime_pair(&self, num: u32) -> bool {
        if num % 2 == 1 {
            return num > 2 && self.table.is_prime(num - 2);
        }
        let half = num / 2;
        self.table
            .primes()
            .iter()
            .take_while(|&&p| p <= half)
            .any(|&p| self.table.is_prime(num - p))
    }

    fn run_frames(&mut self, num: u32) -> Cost {
        let table = self.table;
        let mut stack = vec![Frame::new(num)];

        while let Some(frame) = stack.last_mut() {
            let primes = table.primes_below(frame.num);
            let mut descend_into = None;

            while frame.next < primes.len() {
                let sub = frame.num - primes[frame.next];
                match self.settle(sub) {
                    Some(cost) => {
                        frame.next += 1;
                        frame.offer(cost);
                        if frame.best == Some(UNSETTLED_FLOOR) {
                            break;
                        }
                    }
                    None if frame.phase == Phase::Descend => {
                        descend_into = Some(sub);
                        break;
                    }
                    None => frame.next += 1,
                }
            }

            if let Some(sub) = descend_into {
                trace!(num = sub, depth = stack.len(), "descending");
                stack.push(Frame::new(sub));
                continue;
            }

            // unsettled sub-values cost >= 3, so they add >= 4
            let beaten = frame.best.is_some_and(|best| best <= UNSETTLED_FLOOR + 1);
            if frame.phase == Phase::Scan && !beaten {
                frame.phase = Phase::Descend;
                frame.next = 0;
                continue;
            }

            let (done, best) = (frame.num, frame.best);
            stack.pop();
            self.memo.insert(done, best);
        }

        self.memo.get(num).flatten()
    }
}
