use crate::cost::Cost;

// Slot encoding, one byte per value.
const VACANT: u8 = 0;
const INFEASIBLE: u8 = 1;
const COUNT_BASE: u8 = 2;

/// Largest term count a slot can hold.
pub const MAX_STORED_COUNT: u32 = (u8::MAX - COUNT_BASE) as u32;

// ---------- Monotone memo table ----------

/// Direct-mapped cost cache for every value in `[0, limit]`.
///
/// Capacity is fixed at construction. Slots only go from vacant to filled:
/// a filled slot is never overwritten, invalidated or removed, since the cost
/// of a value never changes.
pub struct CostMemo {
    slots: Vec<u8>,
    filled: usize,
}

impl CostMemo {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            slots: vec![VACANT; limit as usize + 1],
            filled: 0,
        }
    }

    /// Number of values the memo can hold (`limit + 1`).
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of filled slots.
    #[inline(always)]
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// `None` while `n` has not been computed, otherwise its stored cost.
    #[inline(always)]
    pub fn get(&self, n: u32) -> Option<Cost> {
        debug_assert!((n as usize) < self.slots.len());
        match self.slots[n as usize] {
            VACANT => None,
            INFEASIBLE => Some(None),
            code => Some(Some((code - COUNT_BASE) as u32)),
        }
    }

    /// Store `cost` for `n` unless a value is already present.
    #[inline]
    pub fn insert(&mut self, n: u32, cost: Cost) {
        let slot = &mut self.slots[n as usize];
        if *slot != VACANT {
            debug_assert_eq!(decode(*slot), cost, "memo slot {n} rewritten");
            return;
        }
        *slot = match cost {
            None => INFEASIBLE,
            Some(count) => {
                debug_assert!(count <= MAX_STORED_COUNT);
                COUNT_BASE + count as u8
            }
        };
        self.filled += 1;
    }

    /// Hot path: return the stored cost or compute, store and return it.
    #[inline]
    pub fn get_or_insert_with(&mut self, n: u32, make: impl FnOnce(u32) -> Cost) -> Cost {
        if let Some(cost) = self.get(n) {
            return cost;
        }
        let cost = make(n);
        self.insert(n, cost);
        cost
    }
}

#[inline(always)]
fn decode(code: u8) -> Cost {
    match code {
        INFEASIBLE => None,
        code => Some((code - COUNT_BASE) as u32),
    }
}
