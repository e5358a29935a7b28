//! Per-test-case greedy: spend up to `k` replacements on the largest
//! non-prime values, turning each into 2, then sum the prime-term costs.

use anyhow::{bail, Result};
use tracing::debug;

use crate::cost::CostEngine;
use crate::sieve::PrimeTable;

/// Value every replaced element takes. 2 is prime, so it costs 1.
pub const REPLACEMENT: u32 = 2;

/// One query: the array and its replacement budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    pub k: u64,
    pub values: Vec<u32>,
}

/// Positions of the `min(k, non-primes)` largest non-prime values.
///
/// Order among equal values is unspecified; they cost the same either way.
pub fn replacement_targets(table: &PrimeTable, values: &[u32], k: u64) -> Vec<usize> {
    let mut candidates: Vec<(u32, usize)> = values
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, value)| !table.is_prime(value))
        .map(|(pos, value)| (value, pos))
        .collect();

    let take = usize::try_from(k).map_or(candidates.len(), |k| k.min(candidates.len()));
    if take < candidates.len() {
        candidates.select_nth_unstable_by(take, |a, b| b.0.cmp(&a.0));
    }
    candidates.truncate(take);
    candidates.sort_unstable_by(|a, b| b.0.cmp(&a.0));

    candidates.into_iter().map(|(_, pos)| pos).collect()
}

/// Shared-table solver. The cost memo lives as long as the solver, so values
/// computed for one test case are reused by every later one.
pub struct Solver<'a> {
    engine: CostEngine<'a>,
}

impl<'a> Solver<'a> {
    pub fn new(table: &'a PrimeTable) -> Self {
        Self {
            engine: CostEngine::new(table),
        }
    }

    #[inline(always)]
    pub fn table(&self) -> &'a PrimeTable {
        self.engine.table()
    }

    pub fn engine(&mut self) -> &mut CostEngine<'a> {
        &mut self.engine
    }

    /// Minimized total cost of `case`.
    ///
    /// Fails on values outside `[1, limit]`, and on an element left at 1,
    /// which has no prime decomposition.
    pub fn solve_case(&mut self, case: &TestCase) -> Result<u64> {
        let table = self.engine.table();
        let limit = table.limit();
        if let Some((pos, &value)) = case
            .values
            .iter()
            .enumerate()
            .find(|&(_, &value)| value == 0 || value > limit)
        {
            bail!("value {value} at position {pos} is outside [1, {limit}]");
        }

        let mut values = case.values.clone();
        let targets = replacement_targets(table, &values, case.k);
        for &pos in &targets {
            values[pos] = REPLACEMENT;
        }

        let mut total: u64 = 0;
        for (pos, &value) in values.iter().enumerate() {
            if table.is_prime(value) {
                total += 1;
                continue;
            }
            match self.engine.min_terms(value) {
                Some(count) => total += u64::from(count),
                None => bail!("value {value} at position {pos} is not a sum of primes"),
            }
        }

        debug!(
            n = values.len(),
            k = case.k,
            replaced = targets.len(),
            total,
            cached = self.engine.cached(),
            "solved test case"
        );
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(k: u64, values: &[u32]) -> TestCase {
        TestCase {
            k,
            values: values.to_vec(),
        }
    }

    #[test]
    fn replaces_largest_non_prime() {
        let table = PrimeTable::new(1_000);
        let mut solver = Solver::new(&table);
        // 9 -> 2; 4 and 6 cost 2 each
        assert_eq!(solver.solve_case(&case(1, &[4, 6, 9])).unwrap(), 5);
    }

    #[test]
    fn all_primes_need_nothing() {
        let table = PrimeTable::new(1_000);
        let mut solver = Solver::new(&table);
        assert_eq!(solver.solve_case(&case(0, &[3, 5])).unwrap(), 2);
        assert!(replacement_targets(&table, &[3, 5], 10).is_empty());
    }

    #[test]
    fn budget_larger_than_candidates() {
        let table = PrimeTable::new(1_000);
        let mut solver = Solver::new(&table);
        assert_eq!(solver.solve_case(&case(5, &[4])).unwrap(), 1);
        assert_eq!(solver.solve_case(&case(u64::MAX, &[4, 27, 9])).unwrap(), 3);
    }

    #[test]
    fn zero_budget_sums_costs() {
        let table = PrimeTable::new(1_000);
        let mut solver = Solver::new(&table);
        // 27 -> 3, 4 -> 2, 7 -> 1
        assert_eq!(solver.solve_case(&case(0, &[27, 4, 7])).unwrap(), 6);
    }

    #[test]
    fn targets_skip_primes_and_prefer_large_values() {
        let table = PrimeTable::new(1_000);
        let values = [10, 997, 27, 4, 35, 6];
        let targets = replacement_targets(&table, &values, 2);
        let picked: Vec<u32> = targets.iter().map(|&pos| values[pos]).collect();
        assert_eq!(picked, vec![35, 27]);
    }

    #[test]
    fn equal_values_are_interchangeable() {
        let table = PrimeTable::new(1_000);
        let mut solver = Solver::new(&table);
        let targets = replacement_targets(&table, &[9, 9, 9], 2);
        assert_eq!(targets.len(), 2);
        assert_eq!(solver.solve_case(&case(2, &[9, 9, 9])).unwrap(), 4);
    }

    #[test]
    fn one_is_fine_when_replaced() {
        let table = PrimeTable::new(100);
        let mut solver = Solver::new(&table);
        assert_eq!(solver.solve_case(&case(1, &[1, 3])).unwrap(), 2);
    }

    #[test]
    fn one_left_behind_is_an_error() {
        let table = PrimeTable::new(100);
        let mut solver = Solver::new(&table);
        let err = solver.solve_case(&case(1, &[4, 1])).unwrap_err();
        assert!(err.to_string().contains("position 1"), "{err}");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let table = PrimeTable::new(100);
        let mut solver = Solver::new(&table);
        assert!(solver.solve_case(&case(0, &[101])).is_err());
        assert!(solver.solve_case(&case(3, &[0, 4])).is_err());
    }

    #[test]
    fn memo_carries_across_cases() {
        let table = PrimeTable::new(1_000);
        let mut solver = Solver::new(&table);
        solver.solve_case(&case(0, &[27, 35])).unwrap();
        let cached = solver.engine().cached();
        solver.solve_case(&case(0, &[35, 27])).unwrap();
        assert_eq!(solver.engine().cached(), cached);
    }

    #[test]
    fn empty_case_costs_nothing() {
        let table = PrimeTable::new(10);
        let mut solver = Solver::new(&table);
        assert_eq!(solver.solve_case(&case(4, &[])).unwrap(), 0);
    }
}
