//! Memory-bank assignment model and cost evaluator.
//!
//! A [`MemProblem`] holds the static instance definition (data structures,
//! banks, conflict pairs, externalization penalty) together with the dynamic
//! assignment state (boolean assignment matrix, per-bank used capacity,
//! cached conflict statuses). The static part is immutable once built; the
//! dynamic part is mutated by allocation and is what [`working_copy`]
//! duplicates so a decode never touches the shared template.
//!
//! [`working_copy`]: MemProblem::working_copy

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A data structure to be placed: its size and per-access placement cost.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataStruct {
    /// Size in capacity units. Must be positive.
    pub size: u64,

    /// Cost of placing this structure in a bounded bank. The external
    /// bank multiplies this by the problem penalty.
    pub cost: f64,
}

/// A bounded memory bank.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemBank {
    /// Total capacity in the same units as [`DataStruct::size`].
    pub capacity: u64,
}

/// A pairwise conflict between two data structures.
///
/// The `status` field caches the value of [`MemProblem::conflict_status`]
/// for the current assignment. It is **not** kept current on every
/// allocation; call [`MemProblem::refresh_conflicts`] before summing it
/// in [`MemProblem::total_cost`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Conflict {
    /// Index of the first endpoint.
    pub a: usize,

    /// Index of the second endpoint.
    pub b: usize,

    /// Base cost of the conflict.
    pub cost: f64,

    /// Cached status multiplier for the current assignment.
    pub status: f64,
}

impl Conflict {
    /// Creates a conflict with a cleared status cache.
    pub fn new(a: usize, b: usize, cost: f64) -> Self {
        Self {
            a,
            b,
            cost,
            status: 0.0,
        }
    }

    /// Whether `item` is one of the two endpoints.
    pub fn touches(&self, item: usize) -> bool {
        self.a == item || self.b == item
    }
}

/// A memory-bank assignment instance with its current (possibly partial)
/// assignment.
///
/// Banks are indexed `0..m` for the bounded banks; index `m` (the last
/// column of the assignment matrix) is the synthetic, capacity-unbounded
/// **external bank**. Placing a structure there costs
/// `penalty * cost` instead of `cost`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemProblem {
    datastructs: Vec<DataStruct>,
    membanks: Vec<MemBank>,
    conflicts: Vec<Conflict>,
    penalty: f64,

    /// n × (m+1) assignment matrix. After a full decode, exactly one
    /// `true` per row; rows may be all-`false` before their item is placed.
    assignment: Vec<Vec<bool>>,

    /// Running used capacity per bank, external bank included.
    cap_used: Vec<u64>,
}

impl MemProblem {
    /// Builds an instance with an empty assignment.
    ///
    /// `membanks` lists only the bounded banks; the external bank is
    /// implicit at index `membanks.len()`.
    pub fn new(
        datastructs: Vec<DataStruct>,
        membanks: Vec<MemBank>,
        conflicts: Vec<Conflict>,
        penalty: f64,
    ) -> Self {
        let n = datastructs.len();
        let banks = membanks.len() + 1;
        Self {
            datastructs,
            membanks,
            conflicts,
            penalty,
            assignment: vec![vec![false; banks]; n],
            cap_used: vec![0; banks],
        }
    }

    /// Number of data structures.
    pub fn items(&self) -> usize {
        self.datastructs.len()
    }

    /// Number of bounded banks (excluding the external bank).
    pub fn banks(&self) -> usize {
        self.membanks.len()
    }

    /// Index of the external bank (the last assignment column).
    pub fn external_bank(&self) -> usize {
        self.membanks.len()
    }

    /// Whether `bank` is the external bank.
    pub fn is_external(&self, bank: usize) -> bool {
        bank == self.membanks.len()
    }

    /// The externalization penalty multiplier.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// The data structures of this instance.
    pub fn datastructs(&self) -> &[DataStruct] {
        &self.datastructs
    }

    /// The bounded banks of this instance.
    pub fn membanks(&self) -> &[MemBank] {
        &self.membanks
    }

    /// The conflict pairs of this instance.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// An independent copy with identical definitions and a duplicated
    /// assignment, used so every decode starts from non-shared dynamic
    /// state. Conflict statuses are recomputed from the copied assignment
    /// rather than trusted from the source's cache.
    pub fn working_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.refresh_conflicts();
        copy
    }

    /// Whether `item` fits into `bank` given the remaining capacity.
    /// Always true for the external bank.
    pub fn is_allocable(&self, item: usize, bank: usize) -> bool {
        if self.is_external(bank) {
            return true;
        }
        self.membanks[bank].capacity - self.cap_used[bank] >= self.datastructs[item].size
    }

    /// Places `item` into `bank`, updating the capacity ledger.
    ///
    /// Returns `false` if the bank lacks capacity, leaving the state
    /// untouched. Callers that filter candidates through
    /// [`is_allocable`](Self::is_allocable) must treat `false` as a fatal
    /// invariant violation, not a recoverable condition.
    pub fn allocate(&mut self, item: usize, bank: usize) -> bool {
        if !self.is_allocable(item, bank) {
            return false;
        }
        self.assignment[item][bank] = true;
        self.cap_used[bank] += self.datastructs[item].size;
        true
    }

    /// The bank currently holding `item`, or `None` if unplaced.
    pub fn location_of(&self, item: usize) -> Option<usize> {
        self.assignment[item].iter().position(|&set| set)
    }

    /// Status multiplier of a conflict under the current assignment:
    ///
    /// - `0` if either endpoint is unplaced, or both sit in two different
    ///   bounded banks;
    /// - `1` if both sit in the same bounded bank;
    /// - `2 * penalty` if both sit in the external bank;
    /// - `penalty` if exactly one endpoint is external.
    pub fn conflict_status(&self, conflict: &Conflict) -> f64 {
        self.pair_status(conflict.a, conflict.b)
    }

    fn pair_status(&self, a: usize, b: usize) -> f64 {
        let (Some(j1), Some(j2)) = (self.location_of(a), self.location_of(b)) else {
            return 0.0;
        };
        if j1 == j2 {
            if self.is_external(j1) {
                self.penalty * 2.0
            } else {
                1.0
            }
        } else if self.is_external(j1) || self.is_external(j2) {
            self.penalty
        } else {
            0.0
        }
    }

    /// Recomputes every cached [`Conflict::status`] from the current
    /// assignment. Must run before [`total_cost`](Self::total_cost) for the
    /// conflict term to reflect the assignment.
    pub fn refresh_conflicts(&mut self) {
        for k in 0..self.conflicts.len() {
            let status = self.pair_status(self.conflicts[k].a, self.conflicts[k].b);
            self.conflicts[k].status = status;
        }
    }

    /// Marginal cost of placing `item` into `bank` on top of the current
    /// assignment.
    ///
    /// Base cost is the item's placement cost, multiplied by the penalty
    /// for the external bank. Every conflict touching `item` contributes
    /// `cost * status * cost`, with the status evaluated under a
    /// speculative placement of `item` at `bank` that is reverted before
    /// returning; the assignment is unchanged when this returns.
    ///
    /// Note the squared conflict cost: `total_cost` applies the cost
    /// singly. The asymmetry is deliberate and load-bearing for the greedy
    /// bank choice; do not unify the two.
    pub fn marginal_cost(&mut self, item: usize, bank: usize) -> f64 {
        let mut cost = self.datastructs[item].cost;
        if self.is_external(bank) {
            cost *= self.penalty;
        }

        for k in 0..self.conflicts.len() {
            let Conflict { a, b, cost: ccost, .. } = self.conflicts[k];
            if a != item && b != item {
                continue;
            }
            if self.assignment[item][bank] {
                cost += ccost * self.pair_status(a, b) * ccost;
            } else {
                self.assignment[item][bank] = true;
                cost += ccost * self.pair_status(a, b) * ccost;
                self.assignment[item][bank] = false;
            }
        }
        cost
    }

    /// Total cost of the current assignment: placement costs for items in
    /// bounded banks, `penalty * cost` for externalized items, plus
    /// `cost * status` per conflict using the **cached** statuses — call
    /// [`refresh_conflicts`](Self::refresh_conflicts) first.
    pub fn total_cost(&self) -> f64 {
        let external = self.external_bank();
        let mut cost = 0.0;

        for (item, row) in self.assignment.iter().enumerate() {
            if row[..external].iter().any(|&set| set) {
                cost += self.datastructs[item].cost;
            }
            if row[external] {
                cost += self.penalty * self.datastructs[item].cost;
            }
        }

        for conflict in &self.conflicts {
            cost += conflict.cost * conflict.status;
        }
        cost
    }

    /// Whether the assignment is complete and feasible: exactly one bank
    /// per item, and no bounded bank over capacity.
    pub fn is_feasible(&self) -> bool {
        for row in &self.assignment {
            if row.iter().filter(|&&set| set).count() != 1 {
                return false;
            }
        }

        let mut used = vec![0u64; self.membanks.len()];
        for (item, row) in self.assignment.iter().enumerate() {
            for (bank, &set) in row.iter().enumerate().take(self.membanks.len()) {
                if set {
                    used[bank] += self.datastructs[item].size;
                    if used[bank] > self.membanks[bank].capacity {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Fraction of total bounded capacity occupied by the current
    /// assignment. External placements do not count.
    pub fn usage(&self) -> f64 {
        let capacity: u64 = self.membanks.iter().map(|bank| bank.capacity).sum();
        if capacity == 0 {
            return 0.0;
        }
        let used: u64 = self.cap_used[..self.membanks.len()].iter().sum();
        used as f64 / capacity as f64
    }
}
